//! Key handler for the practice screen

use super::keymap::{KeyAction, KeySequence};
use crate::session::PracticeSession;
use log::{debug, trace};
use std::collections::HashMap;

const ESC: u8 = 0x1b;

/// Action to take after processing a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerAction {
    /// Key changed the session; redraw
    Handled,
    /// Key meant nothing here
    Ignored,
    /// Leave the program
    Quit,
}

/// Split a raw read into single keys
///
/// One read can hold several keys when typing fast or pasting. Escape
/// sequences (`ESC [ ... final`, `ESC O x`, `ESC x`) stay together and
/// multi-byte UTF-8 characters are never cut.
pub fn split_keys(input: &[u8]) -> Vec<&[u8]> {
    let mut keys = Vec::new();
    let mut i = 0;

    while i < input.len() {
        let len = if input[i] == ESC {
            escape_len(&input[i..])
        } else {
            utf8_len(input[i]).min(input.len() - i)
        };
        keys.push(&input[i..i + len]);
        i += len;
    }

    keys
}

fn escape_len(seq: &[u8]) -> usize {
    match seq.get(1) {
        None => 1,
        Some(b'[') => {
            // CSI: parameters until a final byte in 0x40..=0x7e
            seq[2..]
                .iter()
                .position(|b| (0x40..=0x7e).contains(b))
                .map_or(seq.len(), |p| p + 3)
        }
        Some(b'O') => seq.len().min(3),
        Some(_) => 2,
    }
}

fn utf8_len(lead: u8) -> usize {
    match lead {
        0xf0..=0xf7 => 4,
        0xe0..=0xef => 3,
        0xc0..=0xdf => 2,
        _ => 1,
    }
}

/// Handler that maps keys onto session actions
pub struct InputHandler {
    /// Key bindings map
    keymap: HashMap<KeySequence, KeyAction>,
}

impl InputHandler {
    pub fn new(keymap: HashMap<KeySequence, KeyAction>) -> Self {
        debug!("Creating input handler with {} bindings", keymap.len());
        Self { keymap }
    }

    /// Process everything from one read, stopping early on quit
    pub fn process(&mut self, input: &[u8], session: &mut PracticeSession) -> HandlerAction {
        let mut result = HandlerAction::Ignored;
        for key in split_keys(input) {
            match self.process_key(key, session) {
                HandlerAction::Quit => return HandlerAction::Quit,
                HandlerAction::Handled => result = HandlerAction::Handled,
                HandlerAction::Ignored => {}
            }
        }
        result
    }

    /// Process a single key
    pub fn process_key(&mut self, key: &[u8], session: &mut PracticeSession) -> HandlerAction {
        if let Some(action) = self.keymap.get(key).copied() {
            trace!("Key {:?} -> {:?}", key, action);
            return Self::execute(action, session);
        }

        // Unbound control keys and escape sequences
        if key.first().is_some_and(|&b| b < 0x20 || b == 0x7f) {
            trace!("Ignoring unbound key {:?}", key);
            return HandlerAction::Ignored;
        }

        match std::str::from_utf8(key) {
            Ok(text) if !session.state().is_complete() => {
                session.type_text(text);
                HandlerAction::Handled
            }
            _ => HandlerAction::Ignored,
        }
    }

    fn execute(action: KeyAction, session: &mut PracticeSession) -> HandlerAction {
        let complete = session.state().is_complete();

        match action {
            KeyAction::Quit => return HandlerAction::Quit,
            KeyAction::Submit | KeyAction::Restart if complete => session.restart(),
            KeyAction::Restart => return HandlerAction::Ignored,
            _ if complete => return HandlerAction::Ignored,
            KeyAction::Submit => session.submit_typed(),
            KeyAction::Backspace => session.backspace(),
            KeyAction::SpeakWord => session.speak_current(),
            KeyAction::ToggleHint => session.toggle_hint(),
            KeyAction::NextWord => session.next(),
            KeyAction::Listen => session.mic(),
        }

        HandlerAction::Handled
    }
}
