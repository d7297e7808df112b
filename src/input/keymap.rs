//! Default key bindings for spellpal

use std::collections::HashMap;

/// Key sequence type
pub type KeySequence = Vec<u8>;

/// Action identifier for key bindings
///
/// Each variant is one of the practice screen's buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Speaker button: say the word again
    SpeakWord,
    /// Hint button
    ToggleHint,
    /// "Next Word" button
    NextWord,
    /// Microphone button
    Listen,
    /// "Check Spelling" (or "Play Again!" on the completion screen)
    Submit,
    Backspace,
    /// "Play Again!" button
    Restart,
    Quit,
}

/// Create the default keymap
pub fn create_default_keymap() -> HashMap<KeySequence, KeyAction> {
    let mut map = HashMap::new();

    // Buttons (alt+s/h/n/m/r)
    map.insert(b"\x1bs".to_vec(), KeyAction::SpeakWord);
    map.insert(b"\x1bh".to_vec(), KeyAction::ToggleHint);
    map.insert(b"\x1bn".to_vec(), KeyAction::NextWord);
    map.insert(b"\x1bm".to_vec(), KeyAction::Listen);
    map.insert(b"\x1br".to_vec(), KeyAction::Restart);

    // Function keys as alternatives (F1-F4)
    map.insert(b"\x1bOP".to_vec(), KeyAction::SpeakWord);
    map.insert(b"\x1bOQ".to_vec(), KeyAction::ToggleHint);
    map.insert(b"\x1bOR".to_vec(), KeyAction::NextWord);
    map.insert(b"\x1bOS".to_vec(), KeyAction::Listen);

    // Editing
    map.insert(b"\r".to_vec(), KeyAction::Submit);
    map.insert(b"\n".to_vec(), KeyAction::Submit);
    map.insert(b"\x08".to_vec(), KeyAction::Backspace);
    map.insert(b"\x7f".to_vec(), KeyAction::Backspace);

    // Leaving (alt+q, ctrl+c, ctrl+d)
    map.insert(b"\x1bq".to_vec(), KeyAction::Quit);
    map.insert(b"\x03".to_vec(), KeyAction::Quit);
    map.insert(b"\x04".to_vec(), KeyAction::Quit);

    map
}
