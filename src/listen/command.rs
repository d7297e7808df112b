//! Recognizer backed by an external capture command
//!
//! The command is any program that records one utterance and prints the
//! transcript on stdout (a whisper.cpp wrapper script, `vosk-transcriber`,
//! ...). It runs through `sh -c` on a worker thread with the wanted locale
//! in `SPELLPAL_LANG`. A zero exit status with output is a result; a
//! non-zero status is an error.

use super::{RecognitionEvent, Recognizer};
use crate::{Result, SpellError};
use log::{debug, error};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

pub struct CommandRecognizer {
    command: String,
    lang: String,
    tx: Sender<RecognitionEvent>,
    rx: Receiver<RecognitionEvent>,
    /// Set while a capture thread is running
    busy: Arc<AtomicBool>,
}

impl CommandRecognizer {
    pub fn new(command: &str, lang: &str) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            command: command.to_string(),
            lang: lang.to_string(),
            tx,
            rx,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run the command once and turn its outcome into events
    fn capture(command: &str, lang: &str) -> Vec<RecognitionEvent> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .env("SPELLPAL_LANG", lang)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .output();

        let mut events = Vec::new();
        match output {
            Ok(output) if output.status.success() => {
                let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if transcript.is_empty() {
                    events.push(RecognitionEvent::Error("no-speech".to_string()));
                } else {
                    events.push(RecognitionEvent::Result(transcript));
                }
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                error!("Capture command failed ({}): {}", output.status, stderr);
                events.push(RecognitionEvent::Error(format!(
                    "capture exited with {}",
                    output.status
                )));
            }
            Err(e) => {
                error!("Failed to run capture command: {}", e);
                events.push(RecognitionEvent::Error(e.to_string()));
            }
        }
        events.push(RecognitionEvent::End);
        events
    }
}

impl Recognizer for CommandRecognizer {
    fn start(&mut self) -> Result<()> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(SpellError::Recognizer("capture already running".to_string()));
        }

        let command = self.command.clone();
        let lang = self.lang.clone();
        let tx = self.tx.clone();
        let busy = self.busy.clone();

        debug!("Starting capture: {}", command);
        let spawned = thread::Builder::new()
            .name("capture".to_string())
            .spawn(move || {
                let events = Self::capture(&command, &lang);
                // Free before End arrives so the next mic press can start
                busy.store(false, Ordering::SeqCst);
                for event in events {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            });

        if let Err(e) = spawned {
            self.busy.store(false, Ordering::SeqCst);
            return Err(SpellError::Recognizer(format!(
                "Failed to start capture thread: {}",
                e
            )));
        }

        Ok(())
    }

    fn poll_event(&mut self) -> Option<RecognitionEvent> {
        self.rx.try_recv().ok()
    }
}
