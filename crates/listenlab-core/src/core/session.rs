//! Study Session
//!
//! Caller-owned state for one learner working through one transcript: the
//! current store, the editable source text, the vocabulary list, the
//! selected segment and the practice mode. The engine functions stay
//! stateless; this type only bundles their inputs.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::captions::{export_srt, Segment, SegmentStore};
use crate::core::ingest::{AdapterRegistry, Segmenter, SourceFormat};
use crate::core::notes::{NoteLog, StudyNote};
use crate::core::practice::{
    highlight_vocabulary, preview, render_cloze, word_frequencies, Pagination, StudyProgress,
    TranscriptStats, WordFrequency,
};
use crate::core::settings::{clamp_playback_rate, EngineSettings, SegmenterSettings};
use crate::core::vocabulary::Vocabulary;
use crate::core::{CoreResult, SegmentIndex};

/// Built-in lesson for trying the app without an upload
pub const SAMPLE_LESSON: &str = "Hello, welcome to English listening practice.
Today we will learn about daily conversations.
How are you doing today?
I'm doing great, thank you for asking.
What do you do for a living?
I work as a software developer.
That sounds interesting.
Yes, I enjoy solving problems with code.
Let's practice some more sentences.
The weather is nice today.";

/// How segments are presented
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
    #[default]
    Normal,
    /// Random words masked
    Cloze,
    Dictation,
    /// Listen and repeat
    Shadowing,
}

/// One learner's working state
#[derive(Debug)]
pub struct StudySession {
    segments: SegmentStore,
    source_text: Option<String>,
    vocabulary: Vocabulary,
    notes: NoteLog,
    /// 0-based position of the selected segment
    current: usize,
    practice_mode: PracticeMode,
    playback_rate: f64,
    highlight_enabled: bool,
}

impl StudySession {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            segments: SegmentStore::new(),
            source_text: None,
            vocabulary: Vocabulary::new(),
            notes: NoteLog::new(),
            current: 0,
            practice_mode: PracticeMode::default(),
            playback_rate: clamp_playback_rate(settings.study.playback_rate),
            highlight_enabled: true,
        }
    }

    // =========================================================================
    // Loading and Editing
    // =========================================================================

    /// Replaces the transcript with a freshly ingested upload.
    ///
    /// Untimed formats keep their extracted text for editing; SRT clears it.
    /// On failure the session is left untouched. Returns the segment count.
    pub fn load(
        &mut self,
        bytes: &[u8],
        format: SourceFormat,
        settings: &EngineSettings,
    ) -> CoreResult<usize> {
        let segmenter = Segmenter::from_settings(&settings.segmenter)?;
        let extraction = AdapterRegistry::default().extract(format, bytes)?;
        let source_text = extraction.source_text().map(str::to_string);
        let segments = extraction.into_store(&segmenter)?;

        info!(%format, segments = segments.len(), "Session transcript loaded");
        self.replace(segments, source_text);
        Ok(self.segments.len())
    }

    /// Re-segments edited source text and makes it the new transcript.
    pub fn resave_edited_text(
        &mut self,
        text: &str,
        settings: &SegmenterSettings,
    ) -> CoreResult<usize> {
        let segments = Segmenter::from_settings(settings)?.segment(text)?;
        info!(segments = segments.len(), "Edited transcript saved");
        self.replace(segments, Some(text.to_string()));
        Ok(self.segments.len())
    }

    /// Loads [`SAMPLE_LESSON`] as editable plain text.
    pub fn load_sample(&mut self, settings: &SegmenterSettings) -> CoreResult<usize> {
        self.resave_edited_text(SAMPLE_LESSON, settings)
    }

    fn replace(&mut self, segments: SegmentStore, source_text: Option<String>) {
        self.segments = segments;
        self.source_text = source_text;
        self.current = 0;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn segments(&self) -> &SegmentStore {
        &self.segments
    }

    pub fn source_text(&self) -> Option<&str> {
        self.source_text.as_deref()
    }

    /// Source text shortened for display
    pub fn source_preview(&self, max_chars: usize) -> Option<String> {
        self.source_text.as_deref().map(|text| preview(text, max_chars))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vocabulary_mut(&mut self) -> &mut Vocabulary {
        &mut self.vocabulary
    }

    pub fn notes(&self) -> &NoteLog {
        &self.notes
    }

    /// Saves a study note stamped with the local time; blank notes are dropped.
    pub fn add_note(&mut self, content: &str) -> Option<&StudyNote> {
        self.notes.add(content)
    }

    pub fn practice_mode(&self) -> PracticeMode {
        self.practice_mode
    }

    pub fn set_practice_mode(&mut self, mode: PracticeMode) {
        self.practice_mode = mode;
    }

    pub fn highlight_enabled(&self) -> bool {
        self.highlight_enabled
    }

    pub fn set_highlight_enabled(&mut self, enabled: bool) {
        self.highlight_enabled = enabled;
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    /// Sets the playback rate, clamped to 0.5-2.0. Returns the applied rate.
    pub fn set_playback_rate(&mut self, rate: f64) -> f64 {
        self.playback_rate = clamp_playback_rate(rate);
        self.playback_rate
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// The selected segment, if the transcript is not empty
    pub fn current(&self) -> Option<&Segment> {
        self.segments.get(self.current + 1)
    }

    /// Selects a segment by 1-based index, clamped to the transcript.
    ///
    /// Returns the index actually selected (0 when the transcript is empty).
    pub fn select_segment(&mut self, index: SegmentIndex) -> SegmentIndex {
        if self.segments.is_empty() {
            self.current = 0;
            return 0;
        }
        let index = index.clamp(1, self.segments.len());
        self.current = index - 1;
        index
    }

    /// Selects the first segment of a 1-based page.
    pub fn jump_to_page(&mut self, page: usize, page_size: usize) -> SegmentIndex {
        let start = Pagination::new(page_size).page_start(page);
        self.select_segment(start + 1)
    }

    pub fn progress(&self) -> StudyProgress {
        StudyProgress::compute(self.current, self.segments.len())
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Display text for one segment: cloze first (in cloze mode), then
    /// vocabulary highlighting.
    pub fn render_segment<R: Rng + ?Sized>(
        &self,
        index: SegmentIndex,
        settings: &EngineSettings,
        rng: &mut R,
    ) -> Option<String> {
        let segment = self.segments.get(index)?;

        let mut display = match self.practice_mode {
            PracticeMode::Cloze => render_cloze(segment, &settings.cloze, rng),
            _ => segment.text().to_string(),
        };

        if self.highlight_enabled && !self.vocabulary.is_empty() {
            display = highlight_vocabulary(
                &display,
                self.vocabulary.entries(),
                &settings.highlight.marker,
            );
        }

        Some(display)
    }

    pub fn stats(&self) -> TranscriptStats {
        TranscriptStats::compute(&self.segments, self.vocabulary.len())
    }

    pub fn word_frequencies(&self, top_n: usize) -> Vec<WordFrequency> {
        word_frequencies(&self.segments, top_n)
    }

    pub fn export_srt(&self) -> String {
        export_srt(&self.segments)
    }
}

impl Default for StudySession {
    fn default() -> Self {
        Self::new(&EngineSettings::default())
    }
}
