//! Recipe data model
//!
//! Typed ids, steps and the step-equality rule the merge pass relies on.
//! Recipes are parsed and schema-validated upstream; this module only
//! enforces what the wire schema cannot carry across languages, the
//! bracketed id patterns.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::MiseError;

/// Pattern for process ids, e.g. `PROCESS[dice-onion]`
static PROCESS_ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^PROCESS\[.+\]$").unwrap());

/// Pattern for requirement group ids, e.g. `GROUP[sauce]`
static GROUP_ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^GROUP\[.+\]$").unwrap());

/// Opaque id of a step's underlying cooking process.
///
/// Unique within a recipe's step list only by position: the same process
/// may legitimately recur as a later step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProcessId(String);

impl ProcessId {
    pub fn new(id: impl Into<String>) -> Result<Self, MiseError> {
        let id = id.into();
        if PROCESS_ID_PATTERN.is_match(&id) {
            Ok(Self(id))
        } else {
            Err(MiseError::InvalidProcessId { id })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProcessId {
    type Error = MiseError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<ProcessId> for String {
    fn from(id: ProcessId) -> Self {
        id.0
    }
}

impl FromStr for ProcessId {
    type Err = MiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque id of a requirement group, the scope that selects which
/// prior-step dependency edges apply to a given step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Result<Self, MiseError> {
        let id = id.into();
        if GROUP_ID_PATTERN.is_match(&id) {
            Ok(Self(id))
        } else {
            Err(MiseError::InvalidGroupId { id })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GroupId {
    type Error = MiseError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<GroupId> for String {
    fn from(id: GroupId) -> Self {
        id.0
    }
}

impl FromStr for GroupId {
    type Err = MiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Time of day a step is expected to happen at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// One recipe step. `Recipe.steps` order is the intended execution order
/// and the backbone the corrector aligns classifier output against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub process_id: ProcessId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<StepTime>,
    /// Process ids that must precede this step.
    #[serde(default)]
    pub required: Vec<ProcessId>,
    /// Groups scoping which prior steps' dependency edges apply.
    #[serde(default)]
    pub required_groups: Vec<GroupId>,
}

impl Step {
    /// Merge equality: same process, title and time, with `required` and
    /// `required_groups` compared as sets (mutual containment, independent
    /// of ordering). Absent time is equal only to absent time.
    pub fn same_step(&self, other: &Step) -> bool {
        self.process_id == other.process_id
            && self.title == other.title
            && self.time == other.time
            && is_subset(&self.required, &other.required)
            && is_subset(&other.required, &self.required)
            && is_subset(&self.required_groups, &other.required_groups)
            && is_subset(&other.required_groups, &self.required_groups)
    }
}

fn is_subset<T: PartialEq>(of: &[T], within: &[T]) -> bool {
    of.iter().all(|value| within.contains(value))
}

/// A parsed recipe. Immutable once constructed; both the graph validator
/// and the corrector only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
}
