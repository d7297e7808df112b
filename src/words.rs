//! Weekly word list
//!
//! The list is read once at startup, either from the built-in set below or
//! from a JSON asset of `{"word": ..., "hint": ...}` objects, and never
//! changes afterwards.

use crate::{Result, SpellError};
use log::{debug, info};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A target word and the hint shown for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub hint: String,
}

impl WordEntry {
    pub fn new(word: &str, hint: &str) -> Self {
        Self {
            word: word.to_string(),
            hint: hint.to_string(),
        }
    }
}

/// Built-in weekly words, used when no asset file is configured
pub static DEFAULT_WORDS: Lazy<Vec<WordEntry>> = Lazy::new(|| {
    vec![
        WordEntry::new("cat", "A furry pet that says meow"),
        WordEntry::new("dog", "A pet that barks"),
        WordEntry::new("sun", "It shines in the sky during the day"),
        WordEntry::new("fish", "It swims in the water"),
        WordEntry::new("tree", "It has leaves and branches"),
        WordEntry::new("book", "You read it"),
        WordEntry::new("rain", "Water falling from the clouds"),
        WordEntry::new("frog", "A green animal that hops"),
        WordEntry::new("milk", "A white drink from cows"),
        WordEntry::new("star", "It twinkles at night"),
    ]
});

/// Ordered, non-empty list of word entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    entries: Vec<WordEntry>,
}

impl WordList {
    /// Build a list, rejecting an empty list or a blank word
    pub fn new(entries: Vec<WordEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(SpellError::WordList("word list is empty".to_string()));
        }

        if let Some(pos) = entries.iter().position(|e| e.word.trim().is_empty()) {
            return Err(SpellError::WordList(format!(
                "entry {} has an empty word",
                pos + 1
            )));
        }

        Ok(Self { entries })
    }

    /// The built-in weekly list
    pub fn builtin() -> Self {
        Self {
            entries: DEFAULT_WORDS.clone(),
        }
    }

    /// Parse a JSON array of word entries
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<WordEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Load a JSON word list asset from disk
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading word list from {:?}", path);
        let json = std::fs::read_to_string(path).map_err(|e| {
            SpellError::WordList(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let list = Self::from_json(&json)?;
        info!("Loaded {} words from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the final entry
    pub fn last_index(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.iter()
    }
}

impl std::ops::Index<usize> for WordList {
    type Output = WordEntry;

    fn index(&self, index: usize) -> &WordEntry {
        &self.entries[index]
    }
}
