//! ListenLab Core Library
//!
//! Transcript engine for a listening-practice app. Uploads in any supported
//! format (SRT, DOCX, PDF, plain text) become a [`SegmentStore`]; the practice
//! views, statistics and the SRT exporter all read from that store.
//!
//! The engine is synchronous and keeps no state between calls. A host that
//! needs per-learner state owns a [`StudySession`].
//!
//! ```rust,ignore
//! use listenlab_lib::{ingest, EngineSettings, SourceFormat};
//!
//! let settings = EngineSettings::default();
//! let store = ingest(&bytes, SourceFormat::Srt, &settings.segmenter)?;
//! let srt = listenlab_lib::export_srt(&store);
//! ```

pub mod core;

pub use crate::core::captions::{export_srt, parse_srt, Segment, SegmentStore, TimedCue};
pub use crate::core::ingest::{
    ingest, ingest_docx, ingest_pdf, ingest_plain_text, ingest_srt, SourceFormat,
};
pub use crate::core::notes::{NoteLog, StudyNote};
pub use crate::core::session::{PracticeMode, StudySession, SAMPLE_LESSON};
pub use crate::core::settings::{EngineSettings, SettingsManager};
pub use crate::core::vocabulary::Vocabulary;
pub use crate::core::{CoreError, CoreResult};
