//! Dashboard summaries
//!
//! Read-side aggregation for the overview page: overall project
//! completion plus a per-scope breakdown, each standard scope carrying
//! its lead-abatement-derived prerequisite rollup. Everything here is
//! recomputed from the snapshot on each call; nothing is persisted.

use serde::Serialize;
use tmods_model::{Percent, ScopeId, Snapshot, Status};
use tmods_progress::{linked_rollup, project_completion, scope_completion, status_label, LinkedRollup};

/// One scope's row on the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct ScopeSummary {
    pub id: ScopeId,
    pub title: String,
    /// Mean of the scope's part percents
    pub percent: Percent,
    /// Badge for `percent`
    pub status: Status,
    pub part_count: usize,
    /// Lead-abatement rollup; `None` for the lead-abatement scope itself
    pub linked_prereq: Option<LinkedRollup>,
}

/// The overview page data
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    /// Mean of all scopes' aggregate completion
    pub overall: Percent,
    /// Per-scope rows, in catalog order
    pub scopes: Vec<ScopeSummary>,
}

/// Build the dashboard from the current snapshot
#[must_use]
pub fn project_summary(snapshot: &Snapshot) -> ProjectSummary {
    let scopes = snapshot
        .values()
        .map(|scope| {
            let percent = scope_completion(scope);
            let linked_prereq = if scope.is_lead_abatement() {
                None
            } else {
                // Err is impossible here: the target is not lead abatement.
                linked_rollup(snapshot, &scope.id).ok()
            };
            ScopeSummary {
                id: scope.id.clone(),
                title: scope.title.clone(),
                percent,
                status: status_label(percent),
                part_count: scope.parts.len(),
                linked_prereq,
            }
        })
        .collect();

    ProjectSummary {
        overall: project_completion(snapshot),
        scopes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmods_model::{default_snapshot, LEAD_ABATEMENT};

    #[test]
    fn summary_covers_every_scope_in_order() {
        let snapshot = default_snapshot();
        let summary = project_summary(&snapshot);

        let ids: Vec<_> = summary.scopes.iter().map(|s| s.id.as_str()).collect();
        let expected: Vec<_> = snapshot.keys().map(ScopeId::as_str).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn only_the_lead_abatement_row_lacks_a_linked_rollup() {
        let summary = project_summary(&default_snapshot());
        for row in &summary.scopes {
            if row.id.as_str() == LEAD_ABATEMENT {
                assert!(row.linked_prereq.is_none());
            } else {
                assert!(row.linked_prereq.is_some(), "{}", row.id);
            }
        }
    }

    #[test]
    fn fresh_project_is_not_started() {
        let summary = project_summary(&default_snapshot());
        assert_eq!(summary.overall, Percent::ZERO);
        for row in summary
            .scopes
            .iter()
            .filter(|r| r.id.as_str() != LEAD_ABATEMENT)
        {
            assert_eq!(row.status, Status::NotStarted);
        }
    }
}
