//! Error types for spellpal

use std::io;
use thiserror::Error;

/// Main error type for spellpal
#[derive(Error, Debug)]
pub enum SpellError {
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Word list error: {0}")]
    WordList(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Speech recognition error: {0}")]
    Recognizer(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for spellpal operations
pub type Result<T> = std::result::Result<T, SpellError>;

impl From<String> for SpellError {
    fn from(s: String) -> Self {
        SpellError::Other(s)
    }
}

impl From<&str> for SpellError {
    fn from(s: &str) -> Self {
        SpellError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for SpellError {
    fn from(e: serde_json::Error) -> Self {
        SpellError::WordList(format!("JSON error: {}", e))
    }
}
