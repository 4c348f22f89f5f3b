//! Engine Settings
//!
//! Tunables for ingestion and the practice views, persisted as JSON with:
//! - Atomic file writes (temp file + rename)
//! - Defaults for every missing field
//! - Normalization instead of rejection for out-of-range values
//!
//! Storage location: {config_dir}/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::{CoreResult, TimeSec, DEFAULT_DURATION_PER_LINE, DEFAULT_SEGMENT_GAP};

/// Settings schema version for migration support
pub const SETTINGS_VERSION: u32 = 1;

/// Settings file name
pub const SETTINGS_FILE: &str = "settings.json";

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngineSettings {
    /// Schema version for migrations
    #[serde(default = "default_version")]
    pub version: u32,

    /// Synthetic timing for untimed text
    #[serde(default)]
    pub segmenter: SegmenterSettings,

    /// Fill-in-the-blank exercise
    #[serde(default)]
    pub cloze: ClozeSettings,

    /// Vocabulary emphasis
    #[serde(default)]
    pub highlight: HighlightSettings,

    /// Word-frequency report
    #[serde(default)]
    pub frequency: FrequencySettings,

    /// Study view
    #[serde(default)]
    pub study: StudySettings,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            segmenter: SegmenterSettings::default(),
            cloze: ClozeSettings::default(),
            highlight: HighlightSettings::default(),
            frequency: FrequencySettings::default(),
            study: StudySettings::default(),
        }
    }
}

impl EngineSettings {
    /// Normalizes and clamps settings so persisted state is always valid.
    ///
    /// Bad values are corrected instead of rejected so a hand-edited config
    /// never blocks ingestion.
    pub fn normalize(&mut self) {
        self.version = SETTINGS_VERSION;

        self.segmenter.duration_per_line = clamp_f64(
            self.segmenter.duration_per_line,
            0.1,
            3600.0,
            DEFAULT_DURATION_PER_LINE,
        );
        self.segmenter.gap_seconds =
            clamp_f64(self.segmenter.gap_seconds, 0.0, 3600.0, DEFAULT_SEGMENT_GAP);

        self.cloze.mask_probability =
            clamp_f64(self.cloze.mask_probability, 0.0, 1.0, default_mask_probability());
        self.cloze.max_mask_length = self.cloze.max_mask_length.clamp(1, 64);
        if self.cloze.mask_char.is_whitespace() || self.cloze.mask_char.is_control() {
            self.cloze.mask_char = default_mask_char();
        }

        if self.highlight.marker.trim().is_empty() {
            self.highlight.marker = default_marker();
        }

        self.frequency.top_n = self.frequency.top_n.clamp(1, 1000);

        self.study.page_size = self.study.page_size.clamp(1, 500);
        self.study.preview_chars = self.study.preview_chars.clamp(1, 1_000_000);
        self.study.playback_rate = clamp_playback_rate(self.study.playback_rate);
    }
}

/// Clamps a value into `[min, max]`, replacing NaN/infinity with `fallback`.
fn clamp_f64(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(min, max)
}

/// Slowest playback rate offered to the learner
pub const MIN_PLAYBACK_RATE: f64 = 0.5;

/// Fastest playback rate offered to the learner
pub const MAX_PLAYBACK_RATE: f64 = 2.0;

/// Clamps a playback rate into the supported range (NaN becomes 1.0).
pub fn clamp_playback_rate(rate: f64) -> f64 {
    clamp_f64(rate, MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE, 1.0)
}

// =============================================================================
// Sections
// =============================================================================

/// Synthetic timing assigned by the segmenter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmenterSettings {
    /// Seconds each surviving line lasts
    #[serde(default = "default_duration_per_line")]
    pub duration_per_line: TimeSec,
    /// Seconds of silence between consecutive lines
    #[serde(default = "default_gap_seconds")]
    pub gap_seconds: TimeSec,
}

fn default_duration_per_line() -> TimeSec {
    DEFAULT_DURATION_PER_LINE
}

fn default_gap_seconds() -> TimeSec {
    DEFAULT_SEGMENT_GAP
}

impl Default for SegmenterSettings {
    fn default() -> Self {
        Self {
            duration_per_line: default_duration_per_line(),
            gap_seconds: default_gap_seconds(),
        }
    }
}

/// Cloze masking parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClozeSettings {
    /// Chance that an eligible word is masked
    #[serde(default = "default_mask_probability")]
    pub mask_probability: f64,
    /// Segments with this many words or fewer are never masked
    #[serde(default = "default_min_words_per_segment")]
    pub min_words_per_segment: usize,
    /// Words with this many characters or fewer are never masked
    #[serde(default = "default_min_masked_word_length")]
    pub min_masked_word_length: usize,
    /// Upper bound on the mask width
    #[serde(default = "default_max_mask_length")]
    pub max_mask_length: usize,
    #[serde(default = "default_mask_char")]
    pub mask_char: char,
}

fn default_mask_probability() -> f64 {
    0.3
}

fn default_min_words_per_segment() -> usize {
    3
}

fn default_min_masked_word_length() -> usize {
    3
}

fn default_max_mask_length() -> usize {
    8
}

fn default_mask_char() -> char {
    '_'
}

impl Default for ClozeSettings {
    fn default() -> Self {
        Self {
            mask_probability: default_mask_probability(),
            min_words_per_segment: default_min_words_per_segment(),
            min_masked_word_length: default_min_masked_word_length(),
            max_mask_length: default_max_mask_length(),
            mask_char: default_mask_char(),
        }
    }
}

/// Vocabulary emphasis markers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSettings {
    /// Inserted on both sides of a highlighted word
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_marker() -> String {
    "**".to_string()
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            marker: default_marker(),
        }
    }
}

/// Word-frequency report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrequencySettings {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    20
}

impl Default for FrequencySettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

/// Study view defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudySettings {
    /// Segments per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Characters of source text shown in the preview
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
    /// Initial playback rate (0.5-2.0)
    #[serde(default = "default_playback_rate")]
    pub playback_rate: f64,
}

fn default_page_size() -> usize {
    20
}

fn default_preview_chars() -> usize {
    2000
}

fn default_playback_rate() -> f64 {
    1.0
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            preview_chars: default_preview_chars(),
            playback_rate: default_playback_rate(),
        }
    }
}

// =============================================================================
// Settings Manager
// =============================================================================

/// Settings manager for loading, saving, and resetting settings
pub struct SettingsManager {
    settings_path: PathBuf,
}

impl SettingsManager {
    /// Create a new settings manager storing `settings.json` in `config_dir`
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            settings_path: config_dir.join(SETTINGS_FILE),
        }
    }

    /// Create a settings manager for an explicit file path
    pub fn with_path(settings_path: PathBuf) -> Self {
        Self { settings_path }
    }

    /// Get the settings file path
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, returning defaults if the file is missing or unreadable
    pub fn load(&self) -> EngineSettings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings, using defaults: {}", e);
                EngineSettings::default()
            }
        }
    }

    fn try_load(&self) -> CoreResult<EngineSettings> {
        if !self.settings_path.exists() {
            info!("Settings file not found, using defaults");
            return Ok(EngineSettings::default());
        }

        let content = fs::read_to_string(&self.settings_path)?;
        let mut settings = serde_json::from_str::<EngineSettings>(&content)?;

        if settings.version < SETTINGS_VERSION {
            info!(
                "Migrating settings from version {} to {}",
                settings.version, SETTINGS_VERSION
            );
        }

        settings.normalize();
        Ok(settings)
    }

    /// Save settings to disk using atomic write (temp file + rename)
    ///
    /// Returns the normalized settings that were written.
    pub fn save(&self, settings: &EngineSettings) -> CoreResult<EngineSettings> {
        let mut normalized = settings.clone();
        normalized.normalize();

        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&normalized)?;

        let temp_path = self.settings_path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        if cfg!(windows) && self.settings_path.exists() {
            // rename does not overwrite on Windows
            fs::remove_file(&self.settings_path)?;
        }
        fs::rename(&temp_path, &self.settings_path)?;

        info!("Settings saved to {:?}", self.settings_path);
        Ok(normalized)
    }

    /// Reset settings to defaults and delete the settings file
    pub fn reset(&self) -> CoreResult<EngineSettings> {
        if self.settings_path.exists() {
            fs::remove_file(&self.settings_path)?;
            info!("Settings file deleted");
        }
        Ok(EngineSettings::default())
    }
}
