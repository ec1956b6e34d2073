//! Bottom-up recompute pass
//!
//! Refreshes every derived field of a scope document from its leaves:
//! action percents from steps, part percents from actions, tracked
//! prerequisite statuses from their checklists. The pass is idempotent -
//! running it twice on an unchanged document changes nothing - and it is
//! the only code that writes derived fields.

use tmods_model::{Action, Part, Percent, Prerequisite, Scope, Snapshot};

use crate::calc::{mean_completion, status_label, step_completion};

/// Refresh an action's derived percent from its steps
pub fn recompute_action(action: &mut Action) {
    action.percent_complete = step_completion(&action.steps);
}

/// Refresh a part's derived percent, recomputing its actions first
pub fn recompute_part(part: &mut Part) {
    for action in &mut part.actions {
        recompute_action(action);
    }
    part.percent_complete = mean_completion(part.actions.iter().map(|a| a.percent_complete));
}

/// Refresh every derived field of a scope document, bottom-up.
///
/// Must run between any leaf mutation and the store write: a persisted
/// leaf change without its recomputed ancestors leaves the store and the
/// next full-snapshot render disagreeing about percentages.
pub fn recompute_scope(scope: &mut Scope) {
    for part in &mut scope.parts {
        recompute_part(part);
    }
    if let Some(prereqs) = scope.prereqs_mut() {
        for prereq in [&mut prereqs.materials, &mut prereqs.general] {
            if let Prerequisite::Tracked { status, steps, .. } = prereq {
                *status = status_label(step_completion(steps));
            }
        }
    }
}

/// A scope's aggregate completion: mean of its parts' percents, 0 if none.
/// Reads the persisted derived fields; call [`recompute_scope`] first if
/// the document was just mutated.
#[must_use]
pub fn scope_completion(scope: &Scope) -> Percent {
    mean_completion(scope.parts.iter().map(|p| p.percent_complete))
}

/// Project-level completion: mean of all scopes' aggregates.
/// The synthetic summary view is not a scope and never appears in the
/// snapshot, so no filtering is needed here.
#[must_use]
pub fn project_completion(snapshot: &Snapshot) -> Percent {
    mean_completion(snapshot.values().map(scope_completion))
}
