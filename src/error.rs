//! Error types with fix suggestions

use thiserror::Error;

use crate::recipe::{GroupId, ProcessId};

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MiseError {
    // ─────────────────────────────────────────────────────────────
    // Id boundary errors (MISE-001 to MISE-002)
    // ─────────────────────────────────────────────────────────────
    #[error("MISE-001: '{id}' does not match the PROCESS[...] id pattern")]
    InvalidProcessId { id: String },

    #[error("MISE-002: '{id}' does not match the GROUP[...] id pattern")]
    InvalidGroupId { id: String },

    // ─────────────────────────────────────────────────────────────
    // Graph validation errors (MISE-010 to MISE-013)
    // ─────────────────────────────────────────────────────────────
    #[error("MISE-010: Duplicate required group {group_id}")]
    DuplicateRequiredGroup { group_id: GroupId },

    #[error("MISE-011: Duplicate required processId {process_id}")]
    DuplicateRequiredProcessId { process_id: ProcessId },

    #[error("MISE-012: ProcessId not found {process_id}")]
    ProcessIdNotFound { process_id: ProcessId },

    #[error("MISE-013: Loop detected {process_id}")]
    LoopDetected { process_id: ProcessId },

    // ─────────────────────────────────────────────────────────────
    // Correction precondition errors (MISE-020 to MISE-023)
    // ─────────────────────────────────────────────────────────────
    #[error("MISE-020: No actions to correct")]
    EmptyActions,

    #[error("MISE-021: No steps to correct against")]
    EmptySteps,

    #[error("MISE-022: The first action must resolve to a step")]
    FirstStepRequired,

    #[error("MISE-023: A prior result went missing during traversal")]
    MissingPriorResult,
}

impl FixSuggestion for MiseError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            MiseError::InvalidProcessId { .. } => {
                Some("Use the PROCESS[name] form, e.g. PROCESS[dice-onion]")
            }
            MiseError::InvalidGroupId { .. } => {
                Some("Use the GROUP[name] form, e.g. GROUP[sauce]")
            }
            MiseError::DuplicateRequiredGroup { .. } => {
                Some("List each requirement group at most once per step")
            }
            MiseError::DuplicateRequiredProcessId { .. } => {
                Some("List each required process at most once per step")
            }
            MiseError::ProcessIdNotFound { .. } => {
                Some("Add the missing step, or fix the id - the match must share a requirement group")
            }
            MiseError::LoopDetected { .. } => {
                Some("Break the cycle - a step cannot transitively require itself")
            }
            MiseError::EmptyActions => Some("Provide at least one classifier window"),
            MiseError::EmptySteps => Some("Provide a recipe with at least one step"),
            MiseError::FirstStepRequired => {
                Some("The first window is seeded with the first step; check the call order")
            }
            MiseError::MissingPriorResult => {
                Some("Report this - correction state should never lose a prior result")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_error_code_and_id() {
        let err = MiseError::ProcessIdNotFound {
            process_id: ProcessId::new("PROCESS[simmer]").unwrap(),
        };
        assert_eq!(err.to_string(), "MISE-012: ProcessId not found PROCESS[simmer]");
    }

    #[test]
    fn every_variant_has_a_fix_suggestion() {
        let errors = [
            MiseError::InvalidProcessId { id: "x".into() },
            MiseError::InvalidGroupId { id: "x".into() },
            MiseError::EmptyActions,
            MiseError::EmptySteps,
            MiseError::FirstStepRequired,
            MiseError::MissingPriorResult,
        ];
        for err in errors {
            assert!(err.fix_suggestion().is_some(), "no suggestion for {err}");
        }
    }
}
