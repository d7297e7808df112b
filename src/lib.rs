//! spellpal - talking spelling practice
//!
//! Reads a word aloud, accepts typed or spoken answers and gives
//! encouraging feedback while walking through a weekly word list.

pub mod config;
pub mod error;
pub mod input;
pub mod listen;
pub mod platform;
pub mod session;
pub mod speech;
pub mod terminal;
pub mod words;

pub use error::{Result, SpellError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "spellpal";
