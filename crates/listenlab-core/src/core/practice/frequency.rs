//! Word-Frequency Counter

use std::collections::HashMap;

use serde::Serialize;

use crate::core::captions::SegmentStore;

/// One row of the frequency report
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    /// Lowercased word
    pub word: String,
    pub count: usize,
}

/// Returns true if every character of `word` is alphabetic.
///
/// Tokens carrying punctuation or digits ("cat.", "it's", "2nd") fail.
pub fn is_alphabetic_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Counts lowercased alphabetic words across all segments.
///
/// Returns at most `top_n` entries by descending count; equal counts keep the
/// order in which the words were first seen.
pub fn word_frequencies(store: &SegmentStore, top_n: usize) -> Vec<WordFrequency> {
    let mut first_seen: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for word in store
        .iter()
        .flat_map(|segment| segment.words())
        .filter(|word| is_alphabetic_word(word))
    {
        let word = word.to_lowercase();
        match counts.get_mut(&word) {
            Some(count) => *count += 1,
            None => {
                counts.insert(word.clone(), 1);
                first_seen.push(word);
            }
        }
    }

    let mut report: Vec<WordFrequency> = first_seen
        .into_iter()
        .map(|word| {
            let count = counts.get(&word).copied().unwrap_or_default();
            WordFrequency { word, count }
        })
        .collect();

    // Stable, so ties stay in first-seen order.
    report.sort_by(|a, b| b.count.cmp(&a.count));
    report.truncate(top_n);
    report
}
