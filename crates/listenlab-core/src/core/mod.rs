//! ListenLab Core Engine
//!
//! Transcript ingestion and derived practice views.
//! Turns caption files and documents into one timed segment store and
//! renders cloze, highlight, frequency and dictation views from it.

pub mod captions;
pub mod ingest;
pub mod notes;
pub mod practice;
pub mod session;
pub mod settings;
pub mod vocabulary;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;
