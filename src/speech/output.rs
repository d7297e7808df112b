//! Speech output for the practice session
//!
//! Wraps a `Synth` backend with the fixed delivery settings (slow rate,
//! normal pitch, US English) and preferred voice selection. Failures are
//! logged and swallowed: a word that could not be spoken is not a reason
//! to interrupt the child.

use super::synth::{Synth, Utterance, Voice};
use super::voice::preferred_voice;
use crate::config::{Config, DEFAULT_LANG, DEFAULT_PREFERRED_VOICES};
use log::{debug, warn};

/// Delivery settings applied to every utterance
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
    pub lang: String,
    pub preferred_voices: Vec<String>,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: 0.8,
            pitch: 1.0,
            lang: DEFAULT_LANG.to_string(),
            preferred_voices: DEFAULT_PREFERRED_VOICES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl SpeechSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            rate: config.rate(),
            pitch: config.pitch(),
            lang: config.lang(),
            preferred_voices: config.preferred_voices(),
        }
    }
}

/// Text-to-speech handle owned by the session
pub struct SpeechOutput {
    synth: Box<dyn Synth>,
    settings: SpeechSettings,
    /// Last voice list fetched from the backend
    voices: Vec<Voice>,
}

impl SpeechOutput {
    pub fn new(synth: Box<dyn Synth>, settings: SpeechSettings) -> Self {
        let mut output = Self {
            synth,
            settings,
            voices: Vec::new(),
        };
        output.refresh_voices();
        output
    }

    /// Re-read the voice list from the backend
    pub fn refresh_voices(&mut self) {
        match self.synth.voices() {
            Ok(voices) => {
                debug!("Backend reports {} voices", voices.len());
                self.voices = voices;
            }
            Err(e) => warn!("Failed to list voices: {}", e),
        }
    }

    /// Refresh the cached voices if the backend says they changed
    pub fn poll_voices(&mut self) {
        if self.synth.voices_changed() {
            debug!("Voice list changed");
            self.refresh_voices();
        }
    }

    /// Voice that the next utterance will use
    pub fn preferred_voice(&self) -> Option<&Voice> {
        preferred_voice(
            &self.voices,
            &self.settings.preferred_voices,
            &self.settings.lang,
        )
    }

    /// Speak text, interrupting anything still being spoken
    pub fn speak(&mut self, text: &str) {
        if let Err(e) = self.synth.cancel() {
            warn!("Failed to cancel speech: {}", e);
        }

        // Voices load lazily on some platforms
        if self.voices.is_empty() {
            self.refresh_voices();
        }

        let utterance = Utterance {
            text: text.to_string(),
            rate: self.settings.rate,
            pitch: self.settings.pitch,
            lang: self.settings.lang.clone(),
            voice: self.preferred_voice().cloned(),
        };

        debug!(
            "Speaking {:?} with voice {:?}",
            utterance.text,
            utterance.voice.as_ref().map(|v| v.name.as_str())
        );
        if let Err(e) = self.synth.speak(&utterance) {
            warn!("Failed to speak {:?}: {}", text, e);
        }
    }

    /// Stop any speech in progress
    pub fn cancel(&mut self) {
        if let Err(e) = self.synth.cancel() {
            warn!("Failed to cancel speech: {}", e);
        }
    }
}
