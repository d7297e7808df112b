//! Input system tests
//!
//! Tests key bindings and how raw terminal input drives the session

mod common;

use common::{cat_dog, session, word_list};
use spellpal::input::{create_default_keymap, HandlerAction, InputHandler, KeyAction};

fn handler() -> InputHandler {
    InputHandler::new(create_default_keymap())
}

#[test]
fn test_keymap_creation() {
    let keymap = create_default_keymap();

    // Buttons
    assert_eq!(keymap.get(&b"\x1bs".to_vec()), Some(&KeyAction::SpeakWord));
    assert_eq!(keymap.get(&b"\x1bh".to_vec()), Some(&KeyAction::ToggleHint));
    assert_eq!(keymap.get(&b"\x1bn".to_vec()), Some(&KeyAction::NextWord));
    assert_eq!(keymap.get(&b"\x1bm".to_vec()), Some(&KeyAction::Listen));
    assert_eq!(keymap.get(&b"\x1br".to_vec()), Some(&KeyAction::Restart));

    // Function keys
    assert_eq!(keymap.get(&b"\x1bOP".to_vec()), Some(&KeyAction::SpeakWord));
    assert_eq!(keymap.get(&b"\x1bOR".to_vec()), Some(&KeyAction::NextWord));

    // Editing
    assert_eq!(keymap.get(&b"\r".to_vec()), Some(&KeyAction::Submit));
    assert_eq!(keymap.get(&b"\x7f".to_vec()), Some(&KeyAction::Backspace));

    // Quit
    assert_eq!(keymap.get(&b"\x03".to_vec()), Some(&KeyAction::Quit));
    assert_eq!(keymap.get(&b"\x1bq".to_vec()), Some(&KeyAction::Quit));

    // Plain letters are never bound
    assert_eq!(keymap.get(&b"s".to_vec()), None);
}

#[test]
fn test_typing_and_enter_checks_spelling() {
    let (mut session, log) = session(cat_dog());
    let mut handler = handler();

    assert_eq!(handler.process(b"cxa", &mut session), HandlerAction::Handled);
    assert_eq!(session.state().input_text, "cxa");

    handler.process(b"\x7f\x7ft", &mut session);
    assert_eq!(session.state().input_text, "ct");

    handler.process(b"\x7fat\r", &mut session);
    assert_eq!(session.state().input_text, "cat");
    assert_eq!(session.state().feedback_text, "Good Job Shelly! 🎉");
    assert_eq!(log.lock().unwrap().spoken(), vec!["Good Job Shelly!"]);
}

#[test]
fn test_buttons() {
    let (mut session, log) = session(word_list(&[("cat", "a pet"), ("dog", ""), ("sun", "")]));
    let mut handler = handler();

    handler.process(b"\x1bs", &mut session);
    assert_eq!(log.lock().unwrap().last(), Some("cat".to_string()));

    handler.process(b"\x1bh", &mut session);
    assert!(session.state().show_hint);

    handler.process(b"\x1bn", &mut session);
    assert_eq!(session.state().current_index, 1);
    assert!(!session.state().show_hint);
}

#[test]
fn test_unbound_escape_sequences_ignored() {
    let (mut session, _log) = session(cat_dog());
    let mut handler = handler();

    assert_eq!(handler.process(b"\x1b[A", &mut session), HandlerAction::Ignored);
    assert_eq!(handler.process(b"\x1bz", &mut session), HandlerAction::Ignored);
    assert_eq!(handler.process(b"\x01", &mut session), HandlerAction::Ignored);
    assert_eq!(session.state().input_text, "");
}

#[test]
fn test_mic_without_recognizer_is_inert() {
    let (mut session, _log) = session(cat_dog());
    let mut handler = handler();

    handler.process(b"\x1bm", &mut session);
    assert!(!session.state().is_listening);
}

#[test]
fn test_quit_stops_processing() {
    let (mut session, _log) = session(cat_dog());
    let mut handler = handler();

    assert_eq!(handler.process(b"ca\x03t", &mut session), HandlerAction::Quit);
    assert_eq!(session.state().input_text, "ca");
    assert_eq!(handler.process(b"\x1bq", &mut session), HandlerAction::Quit);
}

#[test]
fn test_enter_plays_again_when_complete() {
    let (mut session, _log) = session(cat_dog());
    let mut handler = handler();

    handler.process(b"\x1bn", &mut session);
    assert!(session.state().is_complete());

    // Typing and the practice buttons do nothing on the completion screen
    assert_eq!(handler.process(b"x", &mut session), HandlerAction::Ignored);
    assert_eq!(handler.process(b"\x1bh", &mut session), HandlerAction::Ignored);

    assert_eq!(handler.process(b"\r", &mut session), HandlerAction::Handled);
    assert!(!session.state().is_complete());
    assert_eq!(session.state().current_index, 0);
}

#[test]
fn test_restart_key_only_when_complete() {
    let (mut session, _log) = session(word_list(&[("cat", ""), ("dog", ""), ("sun", "")]));
    let mut handler = handler();

    handler.process(b"\x1bn", &mut session);
    assert_eq!(handler.process(b"\x1br", &mut session), HandlerAction::Ignored);
    assert_eq!(session.state().current_index, 1);

    handler.process(b"\x1bn", &mut session);
    assert_eq!(handler.process(b"\x1br", &mut session), HandlerAction::Handled);
    assert_eq!(session.state().current_index, 0);
}
