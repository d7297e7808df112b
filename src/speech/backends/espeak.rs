//! espeak-ng subprocess backend
//!
//! Used on WSL (with WSLG's PulseAudio server) and as a fallback on Linux
//! systems without Speech Dispatcher. Each utterance runs one espeak-ng
//! process; cancelling kills it.
//!
//! Dependencies:
//! - espeak-ng (install with: sudo apt install espeak-ng)

use crate::platform::is_wsl;
use crate::speech::{Gender, Synth, Utterance, Voice};
use crate::{Result, SpellError};
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;
use std::process::{Child, Command, Stdio};

/// espeak-ng's default speed in words per minute
const NORMAL_WPM: f32 = 175.0;

/// espeak-ng's default pitch (0-99)
const NORMAL_PITCH: f32 = 50.0;

/// One row of `espeak-ng --voices`:
/// ` 2  en-us  --/M  English_(America)  gmw/en-US  (en 3)`
static VOICE_LINE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s+(\S+)\s+\S*/([MF-])\s+(\S+)\s+\S+").ok());

/// espeak-ng backend
pub struct EspeakSynth {
    /// Currently running espeak-ng process
    current_process: Option<Child>,

    /// Path to espeak-ng
    espeak_path: String,
}

impl EspeakSynth {
    /// Point espeak-ng at WSLG's PulseAudio server when needed
    fn setup_pulseaudio() -> Result<()> {
        const WSLG_PULSE_PATH: &str = "/mnt/wslg/PulseServer";

        if std::env::var("PULSE_SERVER").is_ok() {
            debug!("PULSE_SERVER already set via environment");
            return Ok(());
        }

        if std::path::Path::new(WSLG_PULSE_PATH).exists() {
            info!("Auto-detected WSLG PulseAudio server at {}", WSLG_PULSE_PATH);
            std::env::set_var("PULSE_SERVER", WSLG_PULSE_PATH);
            return Ok(());
        }

        if is_wsl() {
            warn!("WSLG PulseAudio server not found at {}", WSLG_PULSE_PATH);
            warn!("Make sure WSLg is installed and running, or set PULSE_SERVER");
            return Err(SpellError::Speech(
                "PulseAudio server not found. Install WSLg or set PULSE_SERVER environment variable."
                    .to_string(),
            ));
        }

        // Native Linux: espeak-ng finds the default audio output itself
        Ok(())
    }

    /// Create a new espeak-ng synthesizer
    pub fn new() -> Result<Self> {
        debug!("Creating espeak-ng backend");

        Self::setup_pulseaudio()?;

        let espeak_path = Self::find_espeak()?;
        debug!("Found espeak-ng at: {}", espeak_path);

        Ok(Self {
            current_process: None,
            espeak_path,
        })
    }

    /// Find espeak-ng executable
    fn find_espeak() -> Result<String> {
        let paths = ["espeak-ng", "/usr/bin/espeak-ng"];

        for path in paths {
            if let Ok(status) = Command::new(path)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
            {
                if status.success() {
                    return Ok(path.to_string());
                }
            }
        }

        Err(SpellError::Speech(
            "espeak-ng not found. Install with: sudo apt install espeak-ng".to_string(),
        ))
    }

    /// Convert a rate multiple to espeak speed (80-450 wpm)
    fn speed(rate: f32) -> u16 {
        (NORMAL_WPM * rate).clamp(80.0, 450.0).round() as u16
    }

    /// Convert a pitch multiple to espeak pitch (0-99)
    fn pitch(pitch: f32) -> u8 {
        (NORMAL_PITCH * pitch).clamp(0.0, 99.0).round() as u8
    }

    /// Parse the table printed by `espeak-ng --voices`
    fn parse_voices(listing: &str) -> Vec<Voice> {
        let Some(re) = VOICE_LINE.as_ref() else {
            return Vec::new();
        };
        listing
            .lines()
            .filter_map(|line| re.captures(line))
            .map(|caps| {
                let lang = &caps[1];
                let mut voice = Voice::new(lang, &caps[3].replace('_', " "), lang);
                voice.gender = match &caps[2] {
                    "F" => Some(Gender::Female),
                    "M" => Some(Gender::Male),
                    _ => None,
                };
                voice
            })
            .collect()
    }

    /// espeak-ng invocation for one utterance
    ///
    /// The text goes in on stdin so words starting with `-` are never
    /// read as options.
    fn command(&self, utterance: &Utterance) -> Command {
        let voice = utterance
            .voice
            .as_ref()
            .map(|v| v.id.clone())
            .unwrap_or_else(|| utterance.lang.to_lowercase());

        let mut cmd = Command::new(&self.espeak_path);
        cmd.arg("-v").arg(voice);
        cmd.arg("-s").arg(Self::speed(utterance.rate).to_string());
        cmd.arg("-p").arg(Self::pitch(utterance.pitch).to_string());
        cmd.arg("--stdin");
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
        cmd
    }

    /// Cancel any currently running speech process
    fn cancel_process(&mut self) {
        if let Some(mut child) = self.current_process.take() {
            debug!("Killing espeak-ng process");
            match child.kill() {
                Ok(_) => {
                    let _ = child.wait();
                }
                Err(e) => debug!("Failed to kill espeak-ng process: {}", e),
            }
        }
    }
}

impl Synth for EspeakSynth {
    fn voices(&mut self) -> Result<Vec<Voice>> {
        let output = Command::new(&self.espeak_path)
            .arg("--voices")
            .stderr(Stdio::null())
            .output()?;

        let listing = String::from_utf8(output.stdout)?;
        Ok(Self::parse_voices(&listing))
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        if utterance.text.is_empty() {
            return Ok(());
        }

        self.cancel_process();

        debug!("Speaking: {}", utterance.text);
        let mut child = self.command(utterance).spawn().map_err(|e| {
            error!("Failed to spawn espeak-ng: {}", e);
            SpellError::Speech(format!("Failed to start espeak-ng: {}", e))
        })?;

        // Dropping stdin after the write closes it so espeak-ng starts speaking
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(utterance.text.as_bytes()),
            None => Ok(()),
        };
        self.current_process = Some(child);

        written.map_err(|e| {
            error!("Failed to send text to espeak-ng: {}", e);
            SpellError::Speech(format!("Failed to send text to espeak-ng: {}", e))
        })
    }

    fn cancel(&mut self) -> Result<()> {
        debug!("Canceling speech");
        self.cancel_process();
        Ok(())
    }
}

impl Drop for EspeakSynth {
    fn drop(&mut self) {
        debug!("Shutting down espeak-ng backend");
        self.cancel_process();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_conversion() {
        assert_eq!(EspeakSynth::speed(1.0), 175);
        assert_eq!(EspeakSynth::speed(0.8), 140);
        assert_eq!(EspeakSynth::speed(0.1), 80);
        assert_eq!(EspeakSynth::speed(5.0), 450);
    }

    #[test]
    fn test_pitch_conversion() {
        assert_eq!(EspeakSynth::pitch(1.0), 50);
        assert_eq!(EspeakSynth::pitch(0.0), 0);
        assert_eq!(EspeakSynth::pitch(3.0), 99);
    }

    #[test]
    fn test_text_not_passed_as_argument() {
        let synth = EspeakSynth {
            current_process: None,
            espeak_path: "espeak-ng".to_string(),
        };
        let utterance = Utterance {
            text: "-x".to_string(),
            rate: 0.8,
            pitch: 1.0,
            lang: "en-US".to_string(),
            voice: None,
        };

        let cmd = synth.command(&utterance);
        let args: Vec<&str> = cmd.get_args().filter_map(|a| a.to_str()).collect();
        assert_eq!(args, vec!["-v", "en-us", "-s", "140", "-p", "50", "--stdin"]);
    }

    #[test]
    fn test_parse_voices() {
        let listing = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  en-gb           --/M      English_(Great_Britain) gmw/en           (en 2)
 2  en-us           --/F      English_(America)  gmw/en-US            (en 3)
 5  fr-fr           --/-      French             roa/fr
";
        let voices = EspeakSynth::parse_voices(listing);
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[0].id, "en-gb");
        assert_eq!(voices[0].gender, Some(Gender::Male));
        assert_eq!(voices[1].name, "English (America)");
        assert_eq!(voices[1].lang, "en-us");
        assert_eq!(voices[1].gender, Some(Gender::Female));
        assert_eq!(voices[2].gender, None);
    }

    #[test]
    fn test_create_espeak_synth() {
        match EspeakSynth::new() {
            Ok(_) => println!("✓ espeak-ng backend available"),
            Err(e) => println!("⚠ espeak-ng backend not available: {}", e),
        }
    }
}
