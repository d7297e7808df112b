//! Speech synthesizer abstraction
//!
//! Provides a unified interface for text-to-speech across platforms.
//! The practice session only ever talks to a `Box<dyn Synth>`, so tests
//! can hand it a recording fake instead of a real backend.

use crate::platform::is_wsl;
use crate::Result;
use log::info;

/// Voice gender as reported by the backend, when it reports one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

/// A voice offered by a speech backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Backend-specific identifier used to select the voice
    pub id: String,
    /// Human readable name ("Samantha", "Google US English")
    pub name: String,
    /// Locale tag as the backend reports it ("en-US", "en_US", "en-us")
    pub lang: String,
    pub gender: Option<Gender>,
}

impl Voice {
    pub fn new(id: &str, name: &str, lang: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            lang: lang.to_string(),
            gender: None,
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }
}

/// One request to speak a piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Multiple of the backend's normal rate
    pub rate: f32,
    /// Multiple of the backend's normal pitch
    pub pitch: f32,
    pub lang: String,
    pub voice: Option<Voice>,
}

/// Speech synthesizer trait
///
/// All backends implement this to provide text-to-speech.
pub trait Synth: Send {
    /// Voices currently known to the backend (may be empty while loading)
    fn voices(&mut self) -> Result<Vec<Voice>>;

    /// Speak an utterance asynchronously
    fn speak(&mut self, utterance: &Utterance) -> Result<()>;

    /// Cancel/silence current speech
    fn cancel(&mut self) -> Result<()>;

    /// True once when the voice list has changed since the last call
    fn voices_changed(&mut self) -> bool {
        false
    }
}

/// Backend used when no platform speech is available
///
/// Accepts every request and produces no sound.
#[derive(Debug, Default)]
pub struct SilentSynth;

impl Synth for SilentSynth {
    fn voices(&mut self) -> Result<Vec<Voice>> {
        Ok(Vec::new())
    }

    fn speak(&mut self, _utterance: &Utterance) -> Result<()> {
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Create a platform-appropriate speech synthesizer
///
/// **WSL:** espeak-ng first (Speech Dispatcher is rarely configured there),
/// then the native backend.
///
/// **Native Linux, macOS, others:** native `tts` backend first, then
/// espeak-ng.
///
/// Never fails: with no working backend the session runs silently.
pub fn create_synth() -> Box<dyn Synth> {
    use super::backends::espeak::EspeakSynth;
    use super::backends::native::NativeSynth;

    let platform = std::env::consts::OS;

    if platform == "linux" && is_wsl() {
        info!("Detected WSL environment");

        info!("Trying espeak-ng backend...");
        match EspeakSynth::new() {
            Ok(synth) => {
                info!("✓ Successfully initialized espeak-ng backend");
                return Box::new(synth);
            }
            Err(e) => info!("✗ espeak-ng backend unavailable: {}", e),
        }
    }

    info!("Trying native TTS backend for platform: {}", platform);
    match NativeSynth::new() {
        Ok(synth) => {
            info!("✓ Successfully initialized native TTS backend");
            return Box::new(synth);
        }
        Err(e) => {
            info!("✗ Native TTS unavailable: {}", e);
            if platform == "linux" {
                info!("To install: sudo apt install speech-dispatcher");
            }
        }
    }

    if !(platform == "linux" && is_wsl()) {
        info!("Trying espeak-ng backend...");
        match EspeakSynth::new() {
            Ok(synth) => {
                info!("✓ Successfully initialized espeak-ng backend");
                return Box::new(synth);
            }
            Err(e) => info!("✗ espeak-ng backend unavailable: {}", e),
        }
    }

    info!("No speech backend available, continuing without speech");
    Box::new(SilentSynth)
}
