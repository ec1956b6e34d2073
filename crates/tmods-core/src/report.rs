//! Printable report data
//!
//! The export boundary consumes this structure and renders it; numbers
//! are copied from the document's derived fields, never recomputed, so
//! the report always matches what the dashboard currently shows.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tmods_model::{Percent, Prerequisite, Scope, ScopeId, Snapshot, Status};
use tmods_progress::{linked_rollup, scope_completion, status_label, LinkLabel};

/// One action row of the report
#[derive(Debug, Clone, Serialize)]
pub struct ActionLine {
    pub title: String,
    pub percent: Percent,
    pub steps_done: usize,
    pub steps_total: usize,
    pub notes: String,
}

/// One part section of the report
#[derive(Debug, Clone, Serialize)]
pub struct PartSection {
    pub title: String,
    pub percent: Percent,
    pub actions: Vec<ActionLine>,
}

/// One prerequisite row of the report
#[derive(Debug, Clone, Serialize)]
pub struct PrereqLine {
    pub name: &'static str,
    pub status: String,
    pub notes: String,
}

/// Printable snapshot of one scope
#[derive(Debug, Clone, Serialize)]
pub struct ScopeReport {
    pub scope_id: ScopeId,
    pub title: String,
    pub percent: Percent,
    pub status: Status,
    pub prereqs: Vec<PrereqLine>,
    pub parts: Vec<PartSection>,
    pub generated_at: DateTime<Utc>,
}

impl ScopeReport {
    /// Copy a scope's derived state into report form. The snapshot is
    /// needed only for the lead-abatement prerequisite row of standard
    /// scopes.
    #[must_use]
    pub fn from_scope(scope: &Scope, snapshot: &Snapshot) -> Self {
        let percent = scope_completion(scope);

        let mut prereqs = Vec::new();
        if let Some(section) = scope.prereqs() {
            prereqs.push(prereq_line("Materials", &section.materials));
            prereqs.push(prereq_line("General Prerequisites", &section.general));
            if let Ok(rollup) = linked_rollup(snapshot, &scope.id) {
                let status = match rollup.label() {
                    LinkLabel::NotApplicable => rollup.label().to_string(),
                    LinkLabel::Status(status) => format!("{status} ({})", rollup.percent),
                };
                prereqs.push(PrereqLine {
                    name: "Lead Abatement",
                    status,
                    notes: String::new(),
                });
            }
        }

        let parts = scope
            .parts
            .iter()
            .map(|part| PartSection {
                title: part.title.clone(),
                percent: part.percent_complete,
                actions: part
                    .actions
                    .iter()
                    .map(|action| ActionLine {
                        title: action.title.clone(),
                        percent: action.percent_complete,
                        steps_done: action.steps.iter().filter(|s| s.completed).count(),
                        steps_total: action.steps.len(),
                        notes: action.notes.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            scope_id: scope.id.clone(),
            title: scope.title.clone(),
            percent,
            status: status_label(percent),
            prereqs,
            parts,
            generated_at: Utc::now(),
        }
    }
}

fn prereq_line(name: &'static str, prereq: &Prerequisite) -> PrereqLine {
    let (status, notes) = match prereq {
        Prerequisite::Simple { status, notes }
        | Prerequisite::Tracked { status, notes, .. } => (status.to_string(), notes.clone()),
    };
    PrereqLine {
        name,
        status,
        notes,
    }
}
