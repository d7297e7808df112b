//! Input handling and key bindings
//!
//! Raw terminal input is split into individual keys; bound keys press the
//! practice screen's buttons and printable characters go into the answer.

pub mod handler;
pub mod keymap;

pub use handler::{split_keys, HandlerAction, InputHandler};
pub use keymap::{create_default_keymap, KeyAction};
