//! Vocabulary Highlighter

/// Wraps vocabulary entries found in `text` with `marker` on both sides.
///
/// Entries are applied in list order against the progressively rewritten
/// text. The presence test ignores case but only the first exact-case
/// occurrence is wrapped, so an entry present in another case is left as is.
/// Overlapping entries may nest markers.
pub fn highlight_vocabulary<S: AsRef<str>>(text: &str, entries: &[S], marker: &str) -> String {
    let mut display = text.to_string();

    for entry in entries.iter().map(AsRef::as_ref) {
        if entry.is_empty() {
            continue;
        }
        if display.to_lowercase().contains(&entry.to_lowercase()) {
            display = display.replacen(entry, &format!("{marker}{entry}{marker}"), 1);
        }
    }

    display
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlights_first_occurrence() {
        assert_eq!(
            highlight_vocabulary("The cat sat", &["cat"], "**"),
            "The **cat** sat"
        );
        assert_eq!(
            highlight_vocabulary("cat and cat", &["cat"], "**"),
            "**cat** and cat"
        );
    }

    #[test]
    fn test_case_mismatch_is_left_alone() {
        assert_eq!(
            highlight_vocabulary("The cat sat", &["Cat"], "**"),
            "The cat sat"
        );
    }

    #[test]
    fn test_matches_inside_words() {
        assert_eq!(
            highlight_vocabulary("concatenate", &["cat"], "**"),
            "con**cat**enate"
        );
    }

    #[test]
    fn test_entries_apply_in_order() {
        let entries = vec!["brown".to_string(), "fox".to_string()];
        assert_eq!(
            highlight_vocabulary("quick brown fox", &entries, "=="),
            "quick ==brown== ==fox=="
        );
    }

    #[test]
    fn test_overlapping_entries_nest() {
        assert_eq!(
            highlight_vocabulary("a catalog", &["catalog", "cat"], "*"),
            "a **cat*alog*"
        );
    }

    #[test]
    fn test_empty_inputs() {
        let none: [&str; 0] = [];
        assert_eq!(highlight_vocabulary("text", &none, "**"), "text");
        assert_eq!(highlight_vocabulary("text", &[""], "**"), "text");
        assert_eq!(highlight_vocabulary("", &["word"], "**"), "");
    }
}
