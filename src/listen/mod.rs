//! Speech input
//!
//! A `Recognizer` captures one utterance and reports what it heard through
//! a small set of events. `SpeechInput` wraps an optional recognizer and
//! tracks whether a capture is in flight. Without a recognizer the mic is
//! simply unavailable and every request is ignored.

pub mod command;

pub use command::CommandRecognizer;

use crate::Result;
use log::{debug, warn};

/// What a recognizer reports back about a capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Transcript of what was heard
    Result(String),
    /// Capture finished (always sent last)
    End,
    /// Capture failed (permission denied, no microphone, ...)
    Error(String),
}

/// One-shot speech-to-text capability
pub trait Recognizer: Send {
    /// Begin a single, non-continuous capture
    fn start(&mut self) -> Result<()>;

    /// Next pending event, if any. Must not block.
    ///
    /// Every capture ends with exactly one `End`, after any `Result` or
    /// `Error` it produced.
    fn poll_event(&mut self) -> Option<RecognitionEvent>;
}

/// Does a spoken transcript contain the expected word?
///
/// Transcripts often carry extra words ("the word is cat"), so this is a
/// case-insensitive substring test rather than equality.
pub fn transcript_matches(transcript: &str, expected: &str) -> bool {
    transcript
        .to_lowercase()
        .contains(&expected.to_lowercase())
}

/// Microphone handle owned by the session
pub struct SpeechInput {
    recognizer: Option<Box<dyn Recognizer>>,
    listening: bool,
    /// A result was handled; the `End` of that capture is still to come
    awaiting_end: bool,
}

impl SpeechInput {
    pub fn new(recognizer: Option<Box<dyn Recognizer>>) -> Self {
        Self {
            recognizer,
            listening: false,
            awaiting_end: false,
        }
    }

    /// Speech input with no backend
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    pub fn is_available(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Start a capture unless one is running or no backend exists
    ///
    /// Returns whether a capture was started.
    pub fn start_listening(&mut self) -> bool {
        if self.listening {
            return false;
        }

        let Some(recognizer) = self.recognizer.as_mut() else {
            debug!("Speech input unavailable, ignoring mic");
            return false;
        };

        match recognizer.start() {
            Ok(()) => {
                debug!("Listening");
                self.listening = true;
                true
            }
            Err(e) => {
                warn!("Error starting recognition: {}", e);
                self.listening = false;
                false
            }
        }
    }

    /// Next recognizer event; `End` and `Error` clear the listening flag
    ///
    /// The `End` closing a capture whose result was already handled by
    /// `finish` leaves the flag alone, since a new capture may be running.
    pub fn poll_event(&mut self) -> Option<RecognitionEvent> {
        let event = self.recognizer.as_mut()?.poll_event()?;
        match &event {
            RecognitionEvent::Result(transcript) => debug!("Heard {:?}", transcript),
            RecognitionEvent::Error(message) => {
                debug!("Recognition error: {}", message);
                if !self.awaiting_end {
                    self.listening = false;
                }
            }
            RecognitionEvent::End => {
                if self.awaiting_end {
                    self.awaiting_end = false;
                } else {
                    self.listening = false;
                }
            }
        }
        Some(event)
    }

    /// Clear the listening flag once a result has been handled
    pub fn finish(&mut self) {
        self.listening = false;
        self.awaiting_end = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpellError;
    use std::collections::VecDeque;

    struct ScriptedRecognizer {
        starts: usize,
        fail_start: bool,
        events: VecDeque<RecognitionEvent>,
    }

    impl Recognizer for ScriptedRecognizer {
        fn start(&mut self) -> Result<()> {
            self.starts += 1;
            if self.fail_start {
                return Err(SpellError::Recognizer("no microphone".to_string()));
            }
            self.events.push_back(RecognitionEvent::Error("not-allowed".to_string()));
            Ok(())
        }

        fn poll_event(&mut self) -> Option<RecognitionEvent> {
            self.events.pop_front()
        }
    }

    fn scripted(fail_start: bool) -> ScriptedRecognizer {
        ScriptedRecognizer {
            starts: 0,
            fail_start,
            events: VecDeque::new(),
        }
    }

    #[test]
    fn test_transcript_matches() {
        assert!(transcript_matches("Cat", "cat"));
        assert!(transcript_matches("the word is cat", "Cat"));
        assert!(!transcript_matches("cap", "cat"));
        // Substring, not whole word
        assert!(transcript_matches("concatenate", "cat"));
    }

    #[test]
    fn test_unavailable_is_inert() {
        let mut input = SpeechInput::unavailable();
        assert!(!input.is_available());
        assert!(!input.start_listening());
        assert!(!input.is_listening());
        assert!(input.poll_event().is_none());
    }

    #[test]
    fn test_start_is_idempotent_while_listening() {
        let mut input = SpeechInput::new(Some(Box::new(scripted(false))));
        assert!(input.start_listening());
        assert!(input.is_listening());
        assert!(!input.start_listening());
    }

    #[test]
    fn test_error_clears_listening() {
        let mut input = SpeechInput::new(Some(Box::new(scripted(false))));
        input.start_listening();
        assert_eq!(
            input.poll_event(),
            Some(RecognitionEvent::Error("not-allowed".to_string()))
        );
        assert!(!input.is_listening());
        // Mic can be pressed again
        assert!(input.start_listening());
    }

    #[test]
    fn test_failed_start_leaves_idle() {
        let mut input = SpeechInput::new(Some(Box::new(scripted(true))));
        assert!(!input.start_listening());
        assert!(!input.is_listening());
    }
}
