//! Practice session state machine
//!
//! `PracticeSession` is the central data structure: it owns the word list,
//! the learner-visible state and the injected speech handles, and every
//! user action goes through one of its methods.
//!
//! The session is either Active (practising a word) or Complete (showing
//! the celebration screen). Complete is left only through `restart`.

pub mod phrases;
pub mod scheduler;

pub use phrases::Phrases;
pub use scheduler::{Scheduler, TaskHandle};

use crate::listen::{transcript_matches, RecognitionEvent, SpeechInput};
use crate::speech::SpeechOutput;
use crate::words::{WordEntry, WordList};
use log::{debug, info};
use std::time::{Duration, Instant};

/// Default pause between showing a new word and speaking it
pub const DEFAULT_NEXT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Active,
    Complete,
}

/// Everything the learner can see
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    /// Index into the word list, always valid
    pub current_index: usize,
    /// Typed answer so far
    pub input_text: String,
    /// Last encouragement or correction
    pub feedback_text: String,
    /// A speech capture is in progress
    pub is_listening: bool,
    pub show_hint: bool,
    pub phase: Phase,
}

impl SessionState {
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }
}

/// Work the session defers to a later tick
#[derive(Debug, Clone, PartialEq, Eq)]
enum Deferred {
    Speak(String),
}

pub struct PracticeSession {
    words: WordList,
    state: SessionState,
    speech: SpeechOutput,
    listener: SpeechInput,
    phrases: Phrases,
    next_delay: Duration,
    scheduler: Scheduler<Deferred>,
    /// Pending "say the new word" request from the latest next/restart
    pending_word: Option<TaskHandle>,
}

impl PracticeSession {
    pub fn new(
        words: WordList,
        speech: SpeechOutput,
        listener: SpeechInput,
        phrases: Phrases,
    ) -> Self {
        info!("Starting practice session with {} words", words.len());
        Self {
            words,
            state: SessionState::default(),
            speech,
            listener,
            phrases,
            next_delay: DEFAULT_NEXT_DELAY,
            scheduler: Scheduler::new(),
            pending_word: None,
        }
    }

    /// Change the pause before a newly shown word is spoken
    pub fn with_next_delay(mut self, delay: Duration) -> Self {
        self.next_delay = delay;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn phrases(&self) -> &Phrases {
        &self.phrases
    }

    pub fn current_entry(&self) -> &WordEntry {
        &self.words[self.state.current_index]
    }

    /// Whether the mic does anything on this system
    pub fn mic_available(&self) -> bool {
        self.listener.is_available()
    }

    fn is_active(&self) -> bool {
        self.state.phase == Phase::Active
    }

    fn is_last(&self) -> bool {
        self.state.current_index == self.words.last_index()
    }

    fn complete(&mut self) {
        info!("All words done");
        self.state.phase = Phase::Complete;
        let closing = self.phrases.closing_spoken();
        self.speech.speak(&closing);
    }

    /// Clear the per-word state shown on screen
    fn clear_word_state(&mut self) {
        self.state.input_text.clear();
        self.state.feedback_text.clear();
        self.state.show_hint = false;
    }

    /// Speak the current word after the configured delay
    ///
    /// Replaces any earlier pending request, so only the newest word is spoken.
    fn schedule_current_word(&mut self) {
        if let Some(handle) = self.pending_word.take() {
            if self.scheduler.cancel(handle) {
                debug!("Dropped stale pending word");
            }
        }
        let word = self.current_entry().word.clone();
        let when = Instant::now() + self.next_delay;
        self.pending_word = Some(self.scheduler.schedule_at(when, Deferred::Speak(word)));
    }

    // ========== Typed input ==========

    pub fn type_text(&mut self, text: &str) {
        if self.is_active() {
            self.state.input_text.push_str(text);
        }
    }

    pub fn backspace(&mut self) {
        if self.is_active() {
            self.state.input_text.pop();
        }
    }

    /// Check a typed answer against the current word
    ///
    /// Case-insensitive exact match. A correct answer on the last word
    /// completes the session.
    pub fn submit(&mut self, input: &str) {
        if !self.is_active() {
            return;
        }

        let expected = self.current_entry().word.to_lowercase();
        if input.to_lowercase() == expected {
            debug!("Correct: {:?}", input);
            self.state.feedback_text = self.phrases.typed_success_feedback();
            let praise = self.phrases.typed_success_spoken();
            self.speech.speak(&praise);

            if self.is_last() {
                self.complete();
            }
        } else {
            debug!("Incorrect: {:?} (expected {:?})", input, expected);
            self.state.feedback_text = self.phrases.retry_feedback();
            let retry = self.phrases.retry_spoken();
            self.speech.speak(&retry);
        }
    }

    /// Submit whatever has been typed so far
    pub fn submit_typed(&mut self) {
        let input = self.state.input_text.clone();
        self.submit(&input);
    }

    // ========== Buttons ==========

    /// Move to the following word, wrapping at the end of the list
    ///
    /// Landing on the last word completes the session.
    pub fn next(&mut self) {
        if !self.is_active() {
            return;
        }

        self.state.current_index = (self.state.current_index + 1) % self.words.len();
        self.clear_word_state();
        debug!("Moved to word {}", self.state.current_index);
        self.schedule_current_word();

        if self.is_last() {
            self.complete();
        }
    }

    pub fn toggle_hint(&mut self) {
        if self.is_active() {
            self.state.show_hint = !self.state.show_hint;
        }
    }

    /// Press the microphone button
    pub fn mic(&mut self) {
        if !self.is_active() || self.state.is_listening {
            return;
        }
        self.listener.start_listening();
        self.state.is_listening = self.listener.is_listening();
    }

    /// Press the speaker button
    pub fn speak_current(&mut self) {
        let word = self.current_entry().word.clone();
        self.speech.speak(&word);
    }

    /// Start over from the first word after completing the list
    pub fn restart(&mut self) {
        if self.is_active() {
            return;
        }

        info!("Restarting session");
        self.state.current_index = 0;
        self.clear_word_state();
        self.state.phase = Phase::Active;
        self.schedule_current_word();
    }

    // ========== Asynchronous events ==========

    /// Apply every pending recognizer event; returns true if any arrived
    pub fn poll_recognition(&mut self) -> bool {
        let mut any = false;
        while let Some(event) = self.listener.poll_event() {
            any = true;
            self.handle_recognition(event);
        }
        any
    }

    fn handle_recognition(&mut self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Result(transcript) => {
                self.listener.finish();
                if self.is_active() {
                    let word = self.current_entry().word.clone();
                    if transcript_matches(&transcript, &word) {
                        self.state.feedback_text = self.phrases.spoken_success_feedback();
                    } else {
                        self.state.feedback_text = self.phrases.spoken_retry_feedback();
                        self.speech.speak(&word);
                    }
                }
            }
            RecognitionEvent::End | RecognitionEvent::Error(_) => {}
        }
        self.state.is_listening = self.listener.is_listening();
    }

    /// Run deferred work that is due at `now`; returns how much ran
    pub fn run_due(&mut self, now: Instant) -> usize {
        let due = self.scheduler.take_due(now);
        let count = due.len();
        for action in due {
            match action {
                Deferred::Speak(text) => self.speech.speak(&text),
            }
        }
        if self.scheduler.is_empty() {
            self.pending_word = None;
        }
        count
    }

    /// Time until the next deferred action, for the poll timeout
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_next(now)
    }

    /// Pick up voices the speech backend loaded late
    pub fn poll_voices(&mut self) {
        self.speech.poll_voices();
    }

    /// Silence speech and drop pending work before exit
    pub fn shutdown(&mut self) {
        self.scheduler.clear();
        self.pending_word = None;
        self.speech.cancel();
    }
}
