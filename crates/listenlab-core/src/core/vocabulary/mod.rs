//! Vocabulary List
//!
//! The learner's saved words, kept in insertion order. Order matters: the
//! highlighter applies entries in list order.

use serde::{Deserialize, Serialize};

use crate::core::captions::Segment;
use crate::core::practice::is_alphabetic_word;

/// Ordered, duplicate-free list of saved words
///
/// Deserialization goes through [`Vocabulary::add`], so stored lists are
/// trimmed and deduplicated on load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    entries: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trimmed word. Returns false for blanks and exact duplicates.
    pub fn add(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() || self.contains(word) {
            return false;
        }
        self.entries.push(word.to_string());
        true
    }

    /// Removes an exact entry. Returns false if it was not present.
    pub fn remove(&mut self, word: &str) -> bool {
        let word = word.trim();
        let before = self.entries.len();
        self.entries.retain(|entry| entry != word);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.iter().any(|entry| entry == word)
    }

    pub fn contains_ignore_case(&self, word: &str) -> bool {
        let needle = word.trim().to_lowercase();
        self.entries
            .iter()
            .any(|entry| entry.to_lowercase() == needle)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One entry per line, for download.
    pub fn export_text(&self) -> String {
        self.entries.join("\n")
    }

    /// Adds every non-blank line of `text`; returns how many were new.
    pub fn import_text(&mut self, text: &str) -> usize {
        text.lines().filter(|line| self.add(line)).count()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocabulary = Vocabulary::new();
        for word in iter {
            vocabulary.add(word.as_ref());
        }
        vocabulary
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(words: Vec<String>) -> Self {
        words.into_iter().collect()
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.entries
    }
}

/// Words of `segment` that can be saved: alphabetic only, first occurrence
/// of each exact spelling, in order.
pub fn candidate_words(segment: &Segment) -> Vec<&str> {
    let mut candidates: Vec<&str> = Vec::new();
    for word in segment.words() {
        if is_alphabetic_word(word) && !candidates.contains(&word.as_str()) {
            candidates.push(word);
        }
    }
    candidates
}
