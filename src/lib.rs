//! mise - recipe step timeline correction
//!
//! Turns noisy, time-windowed step-classification output into a clean,
//! monotone sequence of recipe steps consistent with a known recipe's
//! step order and dependency graph.
//!
//! Two entry points:
//! - [`validate_recipe_graph`] checks a recipe's step `required` relation
//!   (acyclic, no duplicate groups, fully resolvable) before correction.
//! - [`collect_actions`] aligns classifier windows to the step order,
//!   fills unresolved windows and merges adjacent equal steps.
//!
//! Both are pure functions over immutable inputs: no I/O, no shared
//! state, safe to call concurrently on shared data. Parsing recipes and
//! classifier output is the caller's job; the types here carry serde
//! derives so they plug into whatever format the caller uses.

pub mod action;
pub mod correction;
pub mod error;
pub mod graph;
pub mod recipe;

pub use action::{Action, ActionResult, Candidate};
pub use correction::{collect_actions, DEFAULT_ALTERNATIVE_THRESHOLD};
pub use error::{FixSuggestion, MiseError};
pub use graph::validate_recipe_graph;
pub use recipe::{GroupId, Ingredient, ProcessId, Recipe, Step, StepTime};
