//! Practice screen rendering
//!
//! The whole screen is redrawn after every change. `screen_lines` builds
//! the plain text lines (easy to test), `frame` wraps them with the escape
//! codes that clear the terminal and place the cursor in the answer box.

use crate::session::PracticeSession;
use unicode_width::UnicodeWidthStr;

/// Clear screen, home cursor
const CLEAR: &str = "\x1b[H\x1b[2J";
/// Hide/show the cursor
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";

/// Written when the program exits
pub const LEAVE_SCREEN: &str = "\x1b[H\x1b[2J\x1b[?25h";

/// Marker line prefix for the answer box
const PROMPT: &str = "> ";

/// Pad `text` on the left so it sits in the middle of `width` columns
pub fn center(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    if text_width >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - text_width) / 2), text)
}

/// Lines of the current screen, already centred for `width` columns
pub fn screen_lines(session: &PracticeSession, width: usize) -> Vec<String> {
    let state = session.state();
    let phrases = session.phrases();
    let mut lines = Vec::new();

    if state.is_complete() {
        lines.push(String::new());
        lines.push(center(&phrases.completion_title(), width));
        lines.push(String::new());
        lines.push(center(
            &format!("You practised all {} words!", session.words().len()),
            width,
        ));
        lines.push(String::new());
        lines.push(center("[Enter] ✨ Play Again!", width));
        lines.push(String::new());
        lines.push(center("[alt+q] Quit", width));
        return lines;
    }

    lines.push(String::new());
    lines.push(center(&phrases.greeting(), width));
    lines.push(center(
        &format!(
            "Word {} of {}",
            state.current_index + 1,
            session.words().len()
        ),
        width,
    ));
    lines.push(String::new());
    lines.push(center("[alt+s] Hear the word    [alt+h] Hint", width));
    lines.push(String::new());

    if state.show_hint {
        lines.push(center(&format!("Hint: {}", session.current_entry().hint), width));
        lines.push(String::new());
    }

    lines.push(center("Type what you hear:", width));
    lines.push(format!("{}{}", PROMPT, state.input_text));
    lines.push(String::new());
    lines.push(center("[Enter] Check Spelling    [alt+n] Next Word →", width));

    let mic = if !session.mic_available() {
        "[alt+m] Microphone (unavailable)"
    } else if state.is_listening {
        "[alt+m] Microphone (listening...)"
    } else {
        "[alt+m] Microphone"
    };
    lines.push(center(mic, width));
    lines.push(String::new());

    if !state.feedback_text.is_empty() {
        lines.push(center(&state.feedback_text, width));
        lines.push(String::new());
    }

    lines.push(center("[alt+q] Quit", width));
    lines
}

/// Full terminal output for one redraw
pub fn frame(session: &PracticeSession, cols: u16) -> String {
    let lines = screen_lines(session, cols as usize);

    let mut out = String::from(CLEAR);
    out.push_str(&lines.join("\r\n"));

    // Park the cursor after the typed answer while practising
    match lines.iter().position(|l| l.starts_with(PROMPT)) {
        Some(row) if !session.state().is_complete() => {
            let col = UnicodeWidthStr::width(lines[row].as_str()) + 1;
            out.push_str(&format!("\x1b[{};{}H{}", row + 1, col, SHOW_CURSOR));
        }
        _ => out.push_str(HIDE_CURSOR),
    }

    out
}
