//! Study Notes
//!
//! Free-form notes the learner writes while studying. Each note is stamped
//! with the local time it was saved; the history view shows the latest
//! [`RECENT_NOTES_LIMIT`] notes, newest first.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Number of notes shown in the history view
pub const RECENT_NOTES_LIMIT: usize = 10;

/// Timestamp format shown next to each note
pub const NOTE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A saved note
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyNote {
    /// Save time formatted with [`NOTE_TIME_FORMAT`]
    pub time: String,
    pub content: String,
}

/// Notes in the order they were saved
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteLog {
    notes: Vec<StudyNote>,
}

impl NoteLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves `content` stamped with the current local time.
    pub fn add(&mut self, content: &str) -> Option<&StudyNote> {
        self.add_at(content, Local::now())
    }

    /// Saves `content` stamped with `at`. Blank notes are not saved.
    pub fn add_at<Tz>(&mut self, content: &str, at: DateTime<Tz>) -> Option<&StudyNote>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if content.trim().is_empty() {
            return None;
        }
        self.notes.push(StudyNote {
            time: at.format(NOTE_TIME_FORMAT).to_string(),
            content: content.to_string(),
        });
        self.notes.last()
    }

    /// The latest [`RECENT_NOTES_LIMIT`] notes, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &StudyNote> {
        self.notes.iter().rev().take(RECENT_NOTES_LIMIT)
    }

    /// Every note, oldest first
    pub fn all(&self) -> &[StudyNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
