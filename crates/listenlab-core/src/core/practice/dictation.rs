//! Dictation Drill
//!
//! Picks a sentence for the learner to transcribe and grades the answer.
//! Grading is all-or-nothing: no partial credit, no diff.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::core::captions::{Segment, SegmentStore};

/// Returns true if the trimmed submission equals the target, ignoring case.
///
/// Only the submission is trimmed.
pub fn check_dictation(target: &str, submission: &str) -> bool {
    submission.trim().to_lowercase() == target.to_lowercase()
}

/// Picks a uniformly random segment, or `None` for an empty store.
pub fn pick_dictation_target<'a, R: Rng + ?Sized>(
    store: &'a SegmentStore,
    rng: &mut R,
) -> Option<&'a Segment> {
    store.as_slice().choose(rng)
}

/// Graded dictation attempt
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictationOutcome {
    pub target: String,
    pub submission: String,
    pub is_exact_match: bool,
}

impl DictationOutcome {
    pub fn grade(target: &str, submission: &str) -> Self {
        Self {
            target: target.to_string(),
            submission: submission.to_string(),
            is_exact_match: check_dictation(target, submission),
        }
    }
}
