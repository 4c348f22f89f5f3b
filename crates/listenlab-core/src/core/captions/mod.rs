//! Caption System Module
//!
//! Provides the timed-transcript core of ListenLab:
//! - Segment data models (TimedCue, Segment, SegmentStore)
//! - SRT timestamp codec
//! - SRT parsing and export
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Caption System                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  models.rs     - Data structures (TimedCue, Segment, Store)     │
//! │  timestamp.rs  - HH:MM:SS,mmm <-> seconds                       │
//! │  formats.rs    - Best-effort SRT parsing and export             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use crate::core::captions::{export_srt, parse_srt, SegmentStore, TimedCue};
//!
//! let store = SegmentStore::from_cues(vec![
//!     TimedCue::new(0.0, 2.5, "Hello World"),
//!     TimedCue::new(3.0, 5.5, "Welcome to ListenLab"),
//! ])?;
//!
//! let srt = export_srt(&store);
//! let cues = parse_srt(&srt);
//! ```

mod formats;
mod models;
mod timestamp;

// Re-export models
pub use models::{Segment, SegmentStore, TimedCue};

// Re-export codec and format functions
pub use formats::{export_srt, parse_srt};
pub use timestamp::{format_timestamp, parse_timestamp, truncate_to_millis, try_format_timestamp};
