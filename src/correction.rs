//! Action correction
//!
//! Aligns a time-ordered sequence of noisy classifier windows to the
//! recipe's step order in three passes: a per-window correction decision
//! driven by a monotone cursor over the steps, gap filling for windows
//! the decision left unresolved, and a merge of adjacent windows that
//! resolved to the same step.

use tracing::{debug, instrument, trace};

use crate::action::{Action, ActionResult, PendingResult};
use crate::error::MiseError;
use crate::recipe::Step;

/// Minimum probability for a non-top candidate to still count as
/// evidence for the current or next step.
pub const DEFAULT_ALTERNATIVE_THRESHOLD: f64 = 0.2;

/// Outcome of one per-window correction decision: the resolved step, if
/// any, and how far the cursor advances.
struct Decision {
    step: Option<Step>,
    advance: usize,
}

/// Align classifier windows to the recipe's step order.
///
/// The first window is unconditionally seeded with the first step, no
/// classifier evidence consulted. Every later window either agrees with
/// the cursor, advances it, or is left unresolved for gap filling. The
/// cursor never moves backwards, so the output step indices are weakly
/// increasing. Returns the gap-filled, merged timeline, or the first
/// error; there is no partial output.
#[instrument(skip_all, fields(actions = actions.len(), steps = steps.len()))]
pub fn collect_actions(actions: &[Action], steps: &[Step]) -> Result<Vec<ActionResult>, MiseError> {
    let first_action = actions.first().ok_or(MiseError::EmptyActions)?;
    let first_step = steps.first().ok_or(MiseError::EmptySteps)?;

    let mut pending = Vec::with_capacity(actions.len());
    pending.push(PendingResult {
        start: first_action.start,
        end: first_action.end,
        step: Some(first_step.clone()),
    });

    let mut current_step_index = 0;
    // Windows left unresolved since the last resolved one. Carried as a
    // counter so the decision never rescans output history.
    let mut unresolved_run = 0;

    for action in &actions[1..] {
        let current_step = steps.get(current_step_index).ok_or(MiseError::EmptySteps)?;
        let future_steps = &steps[current_step_index + 1..];

        let decision = correct_current_step(
            action,
            current_step,
            future_steps,
            unresolved_run,
            DEFAULT_ALTERNATIVE_THRESHOLD,
        );

        match &decision.step {
            Some(step) => {
                debug!(
                    start = action.start,
                    step = %step.process_id,
                    advance = decision.advance,
                    "window resolved"
                );
                unresolved_run = 0;
            }
            None => {
                debug!(start = action.start, "window left unresolved");
                unresolved_run += 1;
            }
        }

        pending.push(PendingResult {
            start: action.start,
            end: action.end,
            step: decision.step,
        });
        current_step_index += decision.advance;
    }

    let filled = fill_undefined(&pending, steps)?;
    Ok(merge_continuous_steps(filled))
}

/// Decide which step one window represents.
///
/// Rules apply in order, first match wins. `unresolved_run` is the
/// number of immediately preceding windows still unresolved; each of
/// them may have hidden one skipped step, so the decision is allowed to
/// catch up that far beyond the next step.
fn correct_current_step(
    action: &Action,
    current_step: &Step,
    future_steps: &[Step],
    unresolved_run: usize,
    threshold: f64,
) -> Decision {
    let next_step = future_steps.first();
    let Some(most_probable) = action.most_probable() else {
        return Decision { step: None, advance: 0 };
    };

    // Classifier already agrees with the cursor.
    if most_probable.process_id == current_step.process_id {
        return Decision { step: Some(current_step.clone()), advance: 0 };
    }

    // Classifier shows the next step's signal.
    if let Some(next) = next_step {
        if most_probable.process_id == next.process_id {
            return Decision { step: Some(next.clone()), advance: 1 };
        }
    }

    // Catch up across the backlog of unresolved windows.
    for i in 0..unresolved_run {
        let Some(step) = future_steps.get(i + 1) else {
            continue;
        };
        if most_probable.process_id == step.process_id {
            return Decision { step: Some(step.clone()), advance: i + 1 };
        }
    }

    // A weaker candidate can still confirm the current or next step.
    for candidate in &action.candidates {
        if candidate.probability < threshold {
            continue;
        }
        trace!(
            candidate = %candidate.process_id,
            probability = candidate.probability,
            "checking alternative candidate"
        );
        if candidate.process_id == current_step.process_id {
            return Decision { step: Some(current_step.clone()), advance: 0 };
        }
        if let Some(next) = next_step {
            if candidate.process_id == next.process_id {
                return Decision { step: Some(next.clone()), advance: 1 };
            }
        }
    }

    Decision { step: None, advance: 0 }
}

/// Fill every unresolved slot.
///
/// An unresolved slot takes the step that was skipped between the last
/// resolved step and the next resolved one found later in the sequence.
/// Each fill advances the "previous" step, so consecutive unresolved
/// slots recover consecutive skipped steps. When no step was skipped,
/// the slot repeats the previous resolved step, keeping its own time
/// bounds.
fn fill_undefined(pending: &[PendingResult], steps: &[Step]) -> Result<Vec<ActionResult>, MiseError> {
    let first = pending.first().ok_or(MiseError::EmptyActions)?;
    let first_step = first.step.clone().ok_or(MiseError::FirstStepRequired)?;

    let mut filled = Vec::with_capacity(pending.len());
    filled.push(ActionResult { start: first.start, end: first.end, step: first_step });

    for (i, current) in pending.iter().enumerate().skip(1) {
        if let Some(step) = &current.step {
            filled.push(ActionResult { start: current.start, end: current.end, step: step.clone() });
            continue;
        }

        let prev = filled.last().ok_or(MiseError::MissingPriorResult)?;
        let step = match missing_step(prev, &pending[i + 1..], steps) {
            Some(step) => {
                debug!(start = current.start, step = %step.process_id, "filled skipped step");
                step
            }
            None => prev.step.clone(),
        };
        filled.push(ActionResult { start: current.start, end: current.end, step });
    }

    Ok(filled)
}

/// The single step skipped between the previous resolved step and the
/// next resolved step found later in the sequence, if any.
///
/// Recipe indices are located by first matching process id, so a
/// recurring process resolves to its first position.
fn missing_step(prev: &ActionResult, after: &[PendingResult], steps: &[Step]) -> Option<Step> {
    let prev_index = steps.iter().position(|s| s.process_id == prev.step.process_id)?;
    let next_index = match after.iter().find_map(|a| a.step.as_ref()) {
        Some(next) => steps
            .iter()
            .position(|s| s.process_id == next.process_id)
            .unwrap_or(steps.len()),
        None => steps.len(),
    };

    steps.get(prev_index + 1..next_index)?.first().cloned()
}

/// Merge adjacent intervals that resolved to the same step, extending
/// the earlier interval's end. Idempotent.
fn merge_continuous_steps(results: Vec<ActionResult>) -> Vec<ActionResult> {
    let mut merged: Vec<ActionResult> = Vec::with_capacity(results.len());
    for current in results {
        match merged.last_mut() {
            Some(prev) if prev.step.same_step(&current.step) => prev.end = current.end,
            _ => merged.push(current),
        }
    }
    merged
}
