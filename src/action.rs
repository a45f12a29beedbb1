//! Classifier actions and corrected results
//!
//! An `Action` is one time window of upstream classifier output; the
//! corrector turns each into an `ActionResult` carrying a concrete step.

use serde::{Deserialize, Serialize};

use crate::recipe::{ProcessId, Step};

/// One classifier hypothesis for a time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub process_id: ProcessId,
    /// Classifier confidence in [0, 1].
    pub probability: f64,
    /// Numeric class label assigned by the classifier.
    pub label: i64,
}

/// One time window of classifier output. `start < end` is expected;
/// windows arrive ordered and contiguous from the upstream system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub start: u64,
    pub end: u64,
    /// Unordered candidate hypotheses for this window.
    pub candidates: Vec<Candidate>,
}

impl Action {
    /// The most probable candidate, ties going to the earlier list
    /// position. Ranks a copy, so the caller's candidate order is
    /// never observably mutated.
    pub fn most_probable(&self) -> Option<&Candidate> {
        let mut ranked: Vec<&Candidate> = self.candidates.iter().collect();
        ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        ranked.first().copied()
    }
}

/// One output interval, always carrying a concrete step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub start: u64,
    pub end: u64,
    pub step: Step,
}

/// Intermediate interval used during correction, before gap filling has
/// resolved every window.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingResult {
    pub start: u64,
    pub end: u64,
    pub step: Option<Step>,
}
