//! Practice Views Module
//!
//! Display-ready views derived from a [`SegmentStore`](crate::core::captions::SegmentStore).
//! Every function is pure apart from the caller-supplied random source, so
//! the same store can feed several views at once.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Practice Views                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  cloze.rs      - Random word masking for fill-in-the-blank      │
//! │  highlight.rs  - Vocabulary emphasis markers                    │
//! │  frequency.rs  - Top-N word counts                              │
//! │  dictation.rs  - Target selection and exact-match grading       │
//! │  stats.rs      - Totals, paging, progress and labels            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let masked = render_cloze(&segment, &settings.cloze, &mut rng);
//! let shown = highlight_vocabulary(&masked, vocabulary.entries(), "**");
//! ```

mod cloze;
mod dictation;
mod frequency;
mod highlight;
mod stats;

pub use cloze::render_cloze;
pub use dictation::{check_dictation, pick_dictation_target, DictationOutcome};
pub use frequency::{is_alphabetic_word, word_frequencies, WordFrequency};
pub use highlight::highlight_vocabulary;
pub use stats::{format_clock, preview, Pagination, StudyProgress, TranscriptStats};
