//! Fake speech handles shared by the integration tests

#![allow(dead_code)]

use spellpal::listen::{RecognitionEvent, Recognizer, SpeechInput};
use spellpal::session::{Phrases, PracticeSession};
use spellpal::speech::{SpeechOutput, SpeechSettings, Synth, Utterance, Voice};
use spellpal::words::{WordEntry, WordList};
use spellpal::{Result, SpellError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Everything a `FakeSynth` was asked to do
#[derive(Default)]
pub struct SpeechLog {
    pub utterances: Vec<Utterance>,
    pub cancels: usize,
}

impl SpeechLog {
    pub fn spoken(&self) -> Vec<String> {
        self.utterances.iter().map(|u| u.text.clone()).collect()
    }

    pub fn last(&self) -> Option<String> {
        self.utterances.last().map(|u| u.text.clone())
    }
}

pub struct FakeSynth {
    pub log: Arc<Mutex<SpeechLog>>,
    pub voices: Vec<Voice>,
}

impl Synth for FakeSynth {
    fn voices(&mut self) -> Result<Vec<Voice>> {
        Ok(self.voices.clone())
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        self.log.lock().unwrap().utterances.push(utterance.clone());
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        self.log.lock().unwrap().cancels += 1;
        Ok(())
    }
}

/// Recognizer whose events are pushed by the test
#[derive(Clone, Default)]
pub struct FakeRecognizer {
    pub events: Arc<Mutex<VecDeque<RecognitionEvent>>>,
    pub starts: Arc<Mutex<usize>>,
    pub fail_start: bool,
}

impl FakeRecognizer {
    pub fn hear(&self, transcript: &str) {
        let mut events = self.events.lock().unwrap();
        events.push_back(RecognitionEvent::Result(transcript.to_string()));
        events.push_back(RecognitionEvent::End);
    }

    /// Queue a single event without the closing `End`
    pub fn push(&self, event: RecognitionEvent) {
        self.events.lock().unwrap().push_back(event);
    }

    pub fn fail(&self, message: &str) {
        let mut events = self.events.lock().unwrap();
        events.push_back(RecognitionEvent::Error(message.to_string()));
        events.push_back(RecognitionEvent::End);
    }

    pub fn start_count(&self) -> usize {
        *self.starts.lock().unwrap()
    }
}

impl Recognizer for FakeRecognizer {
    fn start(&mut self) -> Result<()> {
        *self.starts.lock().unwrap() += 1;
        if self.fail_start {
            Err(SpellError::Recognizer("not-allowed".to_string()))
        } else {
            Ok(())
        }
    }

    fn poll_event(&mut self) -> Option<RecognitionEvent> {
        self.events.lock().unwrap().pop_front()
    }
}

pub fn word_list(words: &[(&str, &str)]) -> WordList {
    WordList::new(
        words
            .iter()
            .map(|(word, hint)| WordEntry::new(word, hint))
            .collect(),
    )
    .unwrap()
}

pub fn cat_dog() -> WordList {
    word_list(&[("cat", "a pet"), ("dog", "barks")])
}

pub fn speech_output(voices: Vec<Voice>) -> (SpeechOutput, Arc<Mutex<SpeechLog>>) {
    let log = Arc::new(Mutex::new(SpeechLog::default()));
    let synth = FakeSynth {
        log: log.clone(),
        voices,
    };
    (
        SpeechOutput::new(Box::new(synth), SpeechSettings::default()),
        log,
    )
}

/// Session with a fake synth and no microphone
pub fn session(words: WordList) -> (PracticeSession, Arc<Mutex<SpeechLog>>) {
    let (speech, log) = speech_output(Vec::new());
    let session = PracticeSession::new(
        words,
        speech,
        SpeechInput::unavailable(),
        Phrases::new("Shelly"),
    );
    (session, log)
}

/// Session with a fake synth and a scripted microphone
pub fn session_with_mic(
    words: WordList,
    recognizer: FakeRecognizer,
) -> (PracticeSession, Arc<Mutex<SpeechLog>>) {
    let (speech, log) = speech_output(Vec::new());
    let session = PracticeSession::new(
        words,
        speech,
        SpeechInput::new(Some(Box::new(recognizer))),
        Phrases::new("Shelly"),
    );
    (session, log)
}
