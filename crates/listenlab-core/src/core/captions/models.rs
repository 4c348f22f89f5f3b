//! Segment Data Models
//!
//! Defines the normalized transcript representation shared by every
//! downstream consumer: derived views, the exporter, and the presentation
//! layer.
//!
//! # Overview
//!
//! - [`TimedCue`] is the raw `(start, end, text)` triple produced by timed
//!   adapters or resubmitted by a caller after an edit.
//! - [`Segment`] is a validated cue with a stable 1-based index and its word
//!   list.
//! - [`SegmentStore`] is the ordered collection. Indices are contiguous from 1
//!   in store order; chronological order and overlap are not enforced.

use serde::{Deserialize, Serialize};

use crate::core::{CoreError, CoreResult, SegmentIndex, TimeSec};

// =============================================================================
// Timed Cue
// =============================================================================

/// One unit of text paired with its timing, before indexing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedCue {
    /// Start time in seconds
    pub start: TimeSec,
    /// End time in seconds
    pub end: TimeSec,
    /// Spoken/written content
    pub text: String,
}

impl TimedCue {
    pub fn new(start: TimeSec, end: TimeSec, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

// =============================================================================
// Segment
// =============================================================================

/// A single timed sentence of the transcript
///
/// Fields are private so `words` can never drift from `text`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    index: SegmentIndex,
    start: TimeSec,
    end: TimeSec,
    text: String,
    words: Vec<String>,
}

impl Segment {
    /// Creates a validated segment.
    ///
    /// The text is trimmed; it must be non-empty afterwards. Times must be
    /// finite, non-negative and ordered (`end >= start`).
    pub fn new(
        index: SegmentIndex,
        start: TimeSec,
        end: TimeSec,
        text: &str,
    ) -> CoreResult<Self> {
        if index == 0 {
            return Err(CoreError::InvalidSegment(
                "segment index is 1-based".to_string(),
            ));
        }
        validate_times(start, end)?;
        let text = validate_text(text)?;

        Ok(Self {
            index,
            start,
            end,
            words: split_words(&text),
            text,
        })
    }

    /// Creates a segment from a cue at the given position.
    pub fn from_cue(index: SegmentIndex, cue: &TimedCue) -> CoreResult<Self> {
        Self::new(index, cue.start, cue.end, &cue.text)
    }

    pub fn index(&self) -> SegmentIndex {
        self.index
    }

    pub fn start(&self) -> TimeSec {
        self.start
    }

    pub fn end(&self) -> TimeSec {
        self.end
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whitespace-separated tokens of the text, in order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn duration(&self) -> TimeSec {
        self.end - self.start
    }

    /// Returns true if `time` falls inside `[start, end)`.
    pub fn contains_time(&self, time: TimeSec) -> bool {
        time >= self.start && time < self.end
    }

    /// Replaces the text and recomputes the word list.
    pub fn set_text(&mut self, text: &str) -> CoreResult<()> {
        let text = validate_text(text)?;
        self.words = split_words(&text);
        self.text = text;
        Ok(())
    }

    /// Returns the cue this segment was built from.
    pub fn to_cue(&self) -> TimedCue {
        TimedCue::new(self.start, self.end, self.text.clone())
    }
}

fn validate_times(start: TimeSec, end: TimeSec) -> CoreResult<()> {
    if !start.is_finite() || !end.is_finite() {
        return Err(CoreError::InvalidSegment(format!(
            "non-finite time range {start}~{end}"
        )));
    }
    if start < 0.0 {
        return Err(CoreError::InvalidSegment(format!(
            "negative start time {start}"
        )));
    }
    if end < start {
        return Err(CoreError::InvalidSegment(format!(
            "end {end} precedes start {start}"
        )));
    }
    Ok(())
}

fn validate_text(text: &str) -> CoreResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidSegment("empty segment text".to_string()));
    }
    Ok(trimmed.to_string())
}

fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

// =============================================================================
// Segment Store
// =============================================================================

/// Ordered, contiguously indexed sequence of segments
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SegmentStore {
    segments: Vec<Segment>,
}

impl SegmentStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from cues, numbering them 1..N in the given order.
    ///
    /// Fails on the first cue that violates segment invariants.
    pub fn from_cues<I>(cues: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = TimedCue>,
    {
        let segments = cues
            .into_iter()
            .enumerate()
            .map(|(i, cue)| Segment::from_cue(i + 1, &cue))
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// Builds a store from already validated segments, renumbering them.
    pub fn from_segments(mut segments: Vec<Segment>) -> Self {
        for (i, segment) in segments.iter_mut().enumerate() {
            segment.index = i + 1;
        }
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Looks up a segment by its 1-based index
    pub fn get(&self, index: SegmentIndex) -> Option<&Segment> {
        index
            .checked_sub(1)
            .and_then(|position| self.segments.get(position))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the `(start, end, text)` triples in store order.
    pub fn cues(&self) -> Vec<TimedCue> {
        self.segments.iter().map(Segment::to_cue).collect()
    }

    /// Latest end time across all segments (0 for an empty store)
    pub fn total_duration(&self) -> TimeSec {
        self.segments
            .iter()
            .map(Segment::end)
            .fold(0.0, TimeSec::max)
    }

    /// Total number of words across all segments
    pub fn word_count(&self) -> usize {
        self.segments.iter().map(Segment::word_count).sum()
    }

    /// Finds the first segment playing at `time`.
    pub fn segment_at(&self, time: TimeSec) -> Option<&Segment> {
        self.segments.iter().find(|s| s.contains_time(time))
    }
}

impl<'a> IntoIterator for &'a SegmentStore {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
