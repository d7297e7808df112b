//! Terminal handling: raw mode and screen drawing

pub mod render;
pub mod util;

pub use render::{frame, screen_lines};
pub use util::{get_terminal_size, is_tty, restore_termios, set_raw_mode, TermiosGuard};
