//! Speech synthesis system

pub mod backends;
pub mod output;
pub mod synth;
pub mod voice;

pub use output::{SpeechOutput, SpeechSettings};
pub use synth::{create_synth, Gender, SilentSynth, Synth, Utterance, Voice};
pub use voice::preferred_voice;
