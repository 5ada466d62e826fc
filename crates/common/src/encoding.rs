//! Encoding sanity check
//!
//! Generated reports are in Bosnian; text that should contain diacritics
//! but has none was most likely mangled somewhere between the webhook and
//! the reader.

use std::collections::HashSet;

/// A fixed set of required characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiacriticSet {
    chars: HashSet<char>,
}

impl DiacriticSet {
    pub fn new(chars: &str) -> Self {
        Self {
            chars: chars.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }

    /// Whether any character of `text` belongs to the set
    pub fn contains_any(&self, text: &str) -> bool {
        text.chars().any(|c| self.chars.contains(&c))
    }
}
