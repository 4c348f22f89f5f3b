//! Study Statistics and Navigation Helpers
//!
//! Display-ready numbers for the statistics panel, the segment pager and the
//! progress bar.

use std::ops::Range;

use serde::Serialize;

use crate::core::captions::SegmentStore;
use crate::core::TimeSec;

// =============================================================================
// Transcript Statistics
// =============================================================================

/// Aggregate counts for one transcript
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptStats {
    pub total_segments: usize,
    pub total_words: usize,
    /// Mean words per segment (0 for an empty store)
    pub average_words: f64,
    pub vocabulary_size: usize,
    /// Latest segment end (0 for an empty store)
    pub total_duration: TimeSec,
}

impl TranscriptStats {
    pub fn compute(store: &SegmentStore, vocabulary_size: usize) -> Self {
        let total_segments = store.len();
        let total_words = store.word_count();
        let average_words = if total_segments > 0 {
            total_words as f64 / total_segments as f64
        } else {
            0.0
        };

        Self {
            total_segments,
            total_words,
            average_words,
            vocabulary_size,
            total_duration: store.total_duration(),
        }
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Fixed-size pages over a segment list; pages are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
}

impl Pagination {
    /// Page size is at least 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.page_size)
    }

    /// 0-based position of the first item on `page`. Page 0 is read as page 1.
    pub fn page_start(&self, page: usize) -> usize {
        page.saturating_sub(1) * self.page_size
    }

    /// 0-based positions shown on `page`, clipped to `item_count`.
    pub fn page_range(&self, page: usize, item_count: usize) -> Range<usize> {
        let start = self.page_start(page).min(item_count);
        let end = (start + self.page_size).min(item_count);
        start..end
    }
}

// =============================================================================
// Progress
// =============================================================================

/// Learner progress through a transcript
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyProgress {
    /// Segments up to and including the current one
    pub learned: usize,
    pub total: usize,
    /// 0-100
    pub percent: f64,
}

impl StudyProgress {
    /// `current` is the 0-based position of the selected segment.
    pub fn compute(current: usize, total: usize) -> Self {
        let learned = current.saturating_add(1).min(total);
        let percent = if total > 0 {
            learned as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            learned,
            total,
            percent,
        }
    }
}

// =============================================================================
// Labels
// =============================================================================

/// Formats seconds as a `MM:SS` clock label; minutes are not wrapped.
pub fn format_clock(seconds: TimeSec) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Returns the first `max_chars` characters, with `...` appended if cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
