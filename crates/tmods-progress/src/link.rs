//! Cross-scope linker
//!
//! Every standard scope's page shows a third, externally-derived
//! prerequisite: the state of the lead-abatement parts linked to it.
//! That rollup is computed here from the full snapshot on every read and
//! is never persisted - persisting it would let it go stale whenever the
//! lead-abatement scope is edited.
//!
//! Unlike the normal mean-of-percents rollup, this one counts steps
//! across all linked parts. The link represents a shared pool of concrete
//! remaining work items; a mean of part percentages would overweight
//! small parts relative to large ones.

use serde::Serialize;
use tmods_model::{Percent, ScopeId, Snapshot, Status, LEAD_ABATEMENT};

use crate::calc::{ratio_percent, status_label};

/// Cross-scope linking failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The lead-abatement scope cannot roll up into itself
    #[error("cannot compute a lead-abatement rollup for the lead-abatement scope")]
    SelfTarget,
}

/// The lead-abatement-derived prerequisite of one target scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkedRollup {
    /// Step-weighted completion over all linked parts
    pub percent: Percent,
    /// How many lead-abatement parts link to the target
    pub linked_count: usize,
}

impl LinkedRollup {
    /// Badge for this rollup. A target with no linked parts is rendered
    /// "N/A (no items linked)", which is distinct from a real 0%.
    #[must_use]
    pub fn label(&self) -> LinkLabel {
        if self.linked_count == 0 {
            LinkLabel::NotApplicable
        } else {
            LinkLabel::Status(status_label(self.percent))
        }
    }
}

/// Display label for a linked rollup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkLabel {
    /// No lead-abatement parts link to this scope
    NotApplicable,
    /// Regular status badge over the step-weighted percent
    Status(Status),
}

impl std::fmt::Display for LinkLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkLabel::NotApplicable => f.write_str("N/A (no items linked)"),
            LinkLabel::Status(status) => status.fmt(f),
        }
    }
}

/// Compute the lead-abatement rollup for `target`.
///
/// Filters the lead-abatement scope's parts to those linked to `target`,
/// then counts steps across every action of every linked part. Actions
/// with no steps contribute 0/0 - excluded, not counted as zeros - so
/// degenerate actions cannot deflate the aggregate.
///
/// A missing lead-abatement scope behaves like one with no parts.
///
/// # Errors
/// [`LinkError::SelfTarget`] when `target` is the lead-abatement scope.
pub fn linked_rollup(snapshot: &Snapshot, target: &ScopeId) -> Result<LinkedRollup, LinkError> {
    if target.as_str() == LEAD_ABATEMENT {
        return Err(LinkError::SelfTarget);
    }

    let mut linked_count = 0usize;
    let mut total_steps = 0usize;
    let mut completed_steps = 0usize;

    if let Some(lead) = snapshot.get(&ScopeId::new(LEAD_ABATEMENT)) {
        for part in &lead.parts {
            if part.related_scope.scope_id() != Some(target) {
                continue;
            }
            linked_count += 1;
            for action in &part.actions {
                total_steps += action.steps.len();
                completed_steps += action.steps.iter().filter(|s| s.completed).count();
            }
        }
    }

    let percent = if total_steps == 0 {
        Percent::ZERO
    } else {
        ratio_percent(completed_steps, total_steps)
    };

    Ok(LinkedRollup {
        percent,
        linked_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmods_model::{default_snapshot, Action, Part, Scope, Step};

    fn abatement_part(target: &str, flags: &[bool]) -> Part {
        Part::new("abatement item")
            .linked_to(ScopeId::new(target))
            .with_actions(vec![Action::new("Abate and clear").with_steps(
                flags
                    .iter()
                    .map(|&done| Step::with_completed("Complete", done))
                    .collect(),
            )])
    }

    fn snapshot_with_lead_parts(parts: Vec<Part>) -> Snapshot {
        let mut snapshot = default_snapshot();
        let lead =
            Scope::lead_abatement(ScopeId::new(LEAD_ABATEMENT), "Lead Abatement").with_parts(parts);
        snapshot.insert(lead.id.clone(), lead);
        snapshot
    }

    #[test]
    fn no_linked_parts_is_distinguished_na() {
        let snapshot = snapshot_with_lead_parts(vec![]);
        let rollup = linked_rollup(&snapshot, &ScopeId::new("hvac_ducting")).unwrap();
        assert_eq!(rollup.linked_count, 0);
        assert_eq!(rollup.percent, Percent::ZERO);
        assert_eq!(rollup.label(), LinkLabel::NotApplicable);
        assert_eq!(rollup.label().to_string(), "N/A (no items linked)");
    }

    #[test]
    fn step_weighted_rollup_across_parts() {
        // Scenario C: two linked parts, steps [true] and [false] -> 50%
        let snapshot = snapshot_with_lead_parts(vec![
            abatement_part("cable_tray", &[true]),
            abatement_part("cable_tray", &[false]),
        ]);
        let rollup = linked_rollup(&snapshot, &ScopeId::new("cable_tray")).unwrap();
        assert_eq!(rollup.linked_count, 2);
        assert_eq!(rollup.percent.value(), 50);
        assert_eq!(rollup.label(), LinkLabel::Status(Status::InProgress));
    }

    #[test]
    fn all_steps_complete_is_one_hundred() {
        let snapshot = snapshot_with_lead_parts(vec![
            abatement_part("fire_barriers", &[true]),
            abatement_part("fire_barriers", &[true, true]),
        ]);
        let rollup = linked_rollup(&snapshot, &ScopeId::new("fire_barriers")).unwrap();
        assert_eq!(rollup.percent, Percent::COMPLETE);
        assert_eq!(rollup.label(), LinkLabel::Status(Status::Complete));
    }

    #[test]
    fn stepless_actions_are_excluded_not_zeroed() {
        let mut part = abatement_part("console_refit", &[true]);
        part.actions.push(Action::new("paperwork")); // no steps
        let snapshot = snapshot_with_lead_parts(vec![part]);

        let rollup = linked_rollup(&snapshot, &ScopeId::new("console_refit")).unwrap();
        // 1/1 steps complete; the stepless action must not drag this below 100
        assert_eq!(rollup.percent, Percent::COMPLETE);
    }

    #[test]
    fn parts_linked_elsewhere_are_ignored() {
        let snapshot = snapshot_with_lead_parts(vec![
            abatement_part("cable_tray", &[false]),
            abatement_part("hvac_ducting", &[true]),
        ]);
        let rollup = linked_rollup(&snapshot, &ScopeId::new("hvac_ducting")).unwrap();
        assert_eq!(rollup.linked_count, 1);
        assert_eq!(rollup.percent, Percent::COMPLETE);
    }

    #[test]
    fn self_target_is_rejected() {
        let snapshot = default_snapshot();
        assert_eq!(
            linked_rollup(&snapshot, &ScopeId::new(LEAD_ABATEMENT)),
            Err(LinkError::SelfTarget)
        );
    }

    #[test]
    fn missing_lead_scope_behaves_as_empty() {
        let snapshot = Snapshot::new();
        let rollup = linked_rollup(&snapshot, &ScopeId::new("hvac_ducting")).unwrap();
        assert_eq!(rollup.linked_count, 0);
        assert_eq!(rollup.label(), LinkLabel::NotApplicable);
    }
}
