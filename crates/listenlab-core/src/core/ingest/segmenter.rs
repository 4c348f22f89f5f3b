//! Untimed Text Segmenter
//!
//! Gives untimed text a navigable timeline: every non-blank line becomes one
//! segment of fixed length, followed by a fixed pause. The timing makes no
//! claim of alignment with the actual audio.

use crate::core::captions::{Segment, SegmentStore};
use crate::core::settings::SegmenterSettings;
use crate::core::{
    CoreError, CoreResult, TimeSec, DEFAULT_DURATION_PER_LINE, DEFAULT_SEGMENT_GAP,
};

/// Synthetic timing policy for untimed text
#[derive(Clone, Debug, PartialEq)]
pub struct Segmenter {
    duration_per_line: TimeSec,
    gap: TimeSec,
}

impl Segmenter {
    /// Creates a segmenter, rejecting negative or non-finite timings.
    pub fn new(duration_per_line: TimeSec, gap: TimeSec) -> CoreResult<Self> {
        for (label, value) in [("durationPerLine", duration_per_line), ("gap", gap)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Validation(format!(
                    "{label} must be a non-negative number of seconds, got {value}"
                )));
            }
        }
        Ok(Self {
            duration_per_line,
            gap,
        })
    }

    pub fn from_settings(settings: &SegmenterSettings) -> CoreResult<Self> {
        Self::new(settings.duration_per_line, settings.gap_seconds)
    }

    /// Splits `raw_text` into lines and times every non-blank one.
    ///
    /// Blank lines neither consume an index nor advance the clock.
    pub fn segment(&self, raw_text: &str) -> CoreResult<SegmentStore> {
        let mut segments = Vec::new();
        let mut clock: TimeSec = 0.0;

        for line in raw_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let start = clock;
            let end = start + self.duration_per_line;
            segments.push(Segment::new(segments.len() + 1, start, end, line)?);
            clock = end + self.gap;
        }

        Ok(SegmentStore::from_segments(segments))
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            duration_per_line: DEFAULT_DURATION_PER_LINE,
            gap: DEFAULT_SEGMENT_GAP,
        }
    }
}

/// Segments `raw_text` with the standard 1-second gap between lines.
pub fn segment(raw_text: &str, duration_per_line: TimeSec) -> CoreResult<SegmentStore> {
    Segmenter::new(duration_per_line, DEFAULT_SEGMENT_GAP)?.segment(raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timings(store: &SegmentStore) -> Vec<(f64, f64)> {
        store.iter().map(|s| (s.start(), s.end())).collect()
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let store = segment("A\n\nB\nC", 5.0).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(
            timings(&store),
            vec![(0.0, 5.0), (6.0, 11.0), (12.0, 17.0)]
        );
        let texts: Vec<_> = store.iter().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
        let indices: Vec<_> = store.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_whitespace_only_lines_and_crlf() {
        let store = segment("  first line  \r\n \t \r\nsecond\r\n", 2.0).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().text(), "first line");
        assert_eq!(timings(&store), vec![(0.0, 2.0), (3.0, 5.0)]);
    }

    #[test]
    fn test_custom_gap() {
        let segmenter = Segmenter::new(4.0, 0.5).unwrap();
        let store = segmenter.segment("one\ntwo").unwrap();
        assert_eq!(timings(&store), vec![(0.0, 4.0), (4.5, 8.5)]);
    }

    #[test]
    fn test_empty_text_yields_empty_store() {
        assert!(segment("", 5.0).unwrap().is_empty());
        assert!(segment("\n  \n\t", 5.0).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_invalid_duration() {
        assert!(matches!(
            segment("line", -1.0),
            Err(CoreError::Validation(_))
        ));
        assert!(Segmenter::new(5.0, f64::NAN).is_err());
    }

    #[test]
    fn test_default_uses_standard_timing() {
        let store = Segmenter::default().segment("one\ntwo").unwrap();
        assert_eq!(
            timings(&store),
            vec![
                (0.0, DEFAULT_DURATION_PER_LINE),
                (
                    DEFAULT_DURATION_PER_LINE + DEFAULT_SEGMENT_GAP,
                    2.0 * DEFAULT_DURATION_PER_LINE + DEFAULT_SEGMENT_GAP
                ),
            ]
        );
    }

    #[test]
    fn test_words_follow_text() {
        let store = segment("The quick brown fox", 5.0).unwrap();
        assert_eq!(
            store.get(1).unwrap().words(),
            ["The", "quick", "brown", "fox"]
        );
    }
}
