//! Native Rust TTS backend using the tts crate
//!
//! This backend uses the `tts` crate which provides a unified interface to:
//! - Speech Dispatcher on Linux (via native bindings)
//! - AVFoundation on macOS/iOS (via native bindings)
//! - WinRT on Windows

use crate::speech::{Gender, Synth, Utterance, Voice};
use crate::{Result, SpellError};
use log::{debug, error, warn};
use std::time::{Duration, Instant};
use tts::Tts as TtsCrate;

/// Pause between checks for late-loading voices
const VOICE_PROBE_INTERVAL: Duration = Duration::from_secs(1);

/// Checks made before assuming the platform has no voices at all
const VOICE_PROBE_LIMIT: u32 = 30;

/// Rate limit for asking the platform whether voices have appeared
#[derive(Debug)]
struct VoiceProbe {
    next: Instant,
    remaining: u32,
}

impl VoiceProbe {
    fn new(now: Instant) -> Self {
        Self {
            next: now,
            remaining: VOICE_PROBE_LIMIT,
        }
    }

    /// True if a check may run at `now`; uses up one check
    fn due(&mut self, now: Instant) -> bool {
        if self.remaining == 0 || now < self.next {
            return false;
        }
        self.remaining -= 1;
        self.next = now + VOICE_PROBE_INTERVAL;
        if self.remaining == 0 {
            debug!("Giving up waiting for platform voices");
        }
        true
    }
}

/// Native TTS backend using the tts crate
pub struct NativeSynth {
    /// The tts crate's TTS instance
    tts: TtsCrate,

    /// Voices as last reported by the platform, for `set_voice`
    platform_voices: Vec<tts::Voice>,

    /// Voice id currently selected on the platform
    current_voice: Option<String>,

    /// Throttles `voices_changed` while the platform reports no voices
    probe: VoiceProbe,
}

impl NativeSynth {
    /// Create a new native TTS synthesizer
    pub fn new() -> Result<Self> {
        debug!("Creating native TTS backend");

        let tts = TtsCrate::default()
            .map_err(|e| SpellError::Speech(format!("Failed to initialize TTS: {}", e)))?;

        debug!("Native TTS backend created successfully");

        Ok(Self {
            tts,
            platform_voices: Vec::new(),
            current_voice: None,
            probe: VoiceProbe::new(Instant::now()),
        })
    }

    /// Map a rate multiple onto the platform's own rate range
    fn scale(normal: f32, min: f32, max: f32, factor: f32) -> f32 {
        (normal * factor).clamp(min, max)
    }

    fn convert_voice(voice: &tts::Voice) -> Voice {
        Voice {
            id: voice.id(),
            name: voice.name(),
            lang: voice.language().to_string(),
            gender: voice.gender().map(|g| match g {
                tts::Gender::Female => Gender::Female,
                tts::Gender::Male => Gender::Male,
            }),
        }
    }

    fn apply_settings(&mut self, utterance: &Utterance) -> Result<()> {
        let features = self.tts.supported_features();

        if features.rate {
            let rate = Self::scale(
                self.tts.normal_rate(),
                self.tts.min_rate(),
                self.tts.max_rate(),
                utterance.rate,
            );
            self.tts
                .set_rate(rate)
                .map_err(|e| SpellError::Speech(format!("Failed to set rate: {}", e)))?;
        } else {
            debug!("Rate control not supported on this platform");
        }

        if features.pitch {
            let pitch = Self::scale(
                self.tts.normal_pitch(),
                self.tts.min_pitch(),
                self.tts.max_pitch(),
                utterance.pitch,
            );
            self.tts
                .set_pitch(pitch)
                .map_err(|e| SpellError::Speech(format!("Failed to set pitch: {}", e)))?;
        }

        if !features.voice {
            return Ok(());
        }

        let Some(wanted) = utterance.voice.as_ref() else {
            return Ok(());
        };
        if self.current_voice.as_deref() == Some(wanted.id.as_str()) {
            return Ok(());
        }

        match self.platform_voices.iter().find(|v| v.id() == wanted.id) {
            Some(voice) => {
                debug!("Selecting voice: {}", wanted.name);
                self.tts
                    .set_voice(voice)
                    .map_err(|e| SpellError::Speech(format!("Failed to set voice: {}", e)))?;
                self.current_voice = Some(wanted.id.clone());
            }
            None => warn!("Voice {} is no longer available", wanted.name),
        }

        Ok(())
    }
}

impl Synth for NativeSynth {
    fn voices(&mut self) -> Result<Vec<Voice>> {
        if !self.tts.supported_features().voice {
            return Ok(Vec::new());
        }

        self.platform_voices = self
            .tts
            .voices()
            .map_err(|e| SpellError::Speech(format!("Failed to get voices: {}", e)))?;

        Ok(self.platform_voices.iter().map(Self::convert_voice).collect())
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        if utterance.text.is_empty() {
            return Ok(());
        }

        if let Err(e) = self.apply_settings(utterance) {
            // Speak with platform defaults rather than not at all
            warn!("{}", e);
        }

        debug!("Speaking: {}", utterance.text);
        self.tts.speak(utterance.text.as_str(), false).map_err(|e| {
            error!("Failed to speak: {}", e);
            SpellError::Speech(format!("Speak failed: {}", e))
        })?;

        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        debug!("Canceling speech");
        if !self.tts.supported_features().stop {
            return Ok(());
        }

        self.tts.stop().map_err(|e| {
            error!("Failed to cancel speech: {}", e);
            SpellError::Speech(format!("Cancel failed: {}", e))
        })?;

        Ok(())
    }

    fn voices_changed(&mut self) -> bool {
        // Some platforms fill the list in after start-up; stop asking once we have one
        if !self.platform_voices.is_empty() || !self.tts.supported_features().voice {
            return false;
        }
        if !self.probe.due(Instant::now()) {
            return false;
        }

        match self.tts.voices() {
            Ok(voices) => !voices.is_empty(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_synth() {
        // May fail without speech-dispatcher or in CI without audio
        match NativeSynth::new() {
            Ok(_) => println!("✓ Native TTS backend initialized successfully"),
            Err(e) => println!("⚠ TTS initialization failed (may be expected in CI): {}", e),
        }
    }

    #[test]
    fn test_voice_probe_is_throttled() {
        let start = Instant::now();
        let mut probe = VoiceProbe::new(start);

        assert!(probe.due(start));
        assert!(!probe.due(start));
        assert!(!probe.due(start + Duration::from_millis(100)));
        assert!(probe.due(start + VOICE_PROBE_INTERVAL));
    }

    #[test]
    fn test_voice_probe_gives_up() {
        let start = Instant::now();
        let mut probe = VoiceProbe::new(start);

        let mut checks = 0;
        for tick in 0..(VOICE_PROBE_LIMIT * 20) {
            if probe.due(start + Duration::from_millis(100) * tick) {
                checks += 1;
            }
        }
        assert_eq!(checks, VOICE_PROBE_LIMIT);
    }

    #[test]
    fn test_rate_scaling() {
        assert_eq!(NativeSynth::scale(1.0, 0.1, 10.0, 0.8), 0.8);
        assert_eq!(NativeSynth::scale(175.0, 80.0, 450.0, 0.8), 140.0);
        // Clamped to the platform range
        assert_eq!(NativeSynth::scale(100.0, 90.0, 200.0, 0.5), 90.0);
        assert_eq!(NativeSynth::scale(100.0, 0.0, 120.0, 2.0), 120.0);
    }
}
