//! The fixed scope catalog
//!
//! The project tracks a fixed set of scopes defined at initialization.
//! Seeding builds each scope's default document: standard scopes get the
//! two step-tracked prerequisites with their fixed default checklists,
//! the lead-abatement scope gets abatement-flavored default parts whose
//! actions carry exactly one step (the simplified toggle relies on this).

use crate::ids::ScopeId;
use crate::scope::{Action, Part, PrereqSection, Prerequisite, Scope, Step};
use crate::Snapshot;

/// Id of the distinguished lead-abatement scope
pub const LEAD_ABATEMENT: &str = "lead_abatement";

/// One entry of the fixed catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Scope id
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
}

/// The fixed, ordered set of project scopes. Order here is display order.
#[must_use]
pub fn scope_catalog() -> &'static [CatalogEntry] {
    const CATALOG: &[CatalogEntry] = &[
        CatalogEntry {
            id: "hvac_ducting",
            title: "HVAC Ducting Reroute",
        },
        CatalogEntry {
            id: "cable_tray",
            title: "Cable Tray Installation",
        },
        CatalogEntry {
            id: "console_refit",
            title: "Console Refit",
        },
        CatalogEntry {
            id: "fire_barriers",
            title: "Fire Barrier Penetrations",
        },
        CatalogEntry {
            id: LEAD_ABATEMENT,
            title: "Lead Abatement",
        },
    ];
    CATALOG
}

fn default_materials_checklist() -> Vec<Step> {
    [
        "Materials identified",
        "Materials ordered",
        "Materials received",
        "Materials staged",
    ]
    .into_iter()
    .map(Step::new)
    .collect()
}

fn default_general_checklist() -> Vec<Step> {
    [
        "Work order approved",
        "Pre-job brief held",
        "Work area walkdown complete",
    ]
    .into_iter()
    .map(Step::new)
    .collect()
}

fn default_abatement_parts() -> Vec<Part> {
    // Each default abatement action has exactly one step so the simplified
    // single-toggle view and the full step editor stay in agreement.
    ["Survey and containment", "Abatement and wipe-down"]
        .into_iter()
        .map(|title| {
            Part::new(title).with_actions(vec![
                Action::new("Abate and clear").with_steps(vec![Step::new("Complete")]),
            ])
        })
        .collect()
}

/// Build the default document for a catalog scope id.
/// Returns `None` for ids outside the catalog.
#[must_use]
pub fn default_scope(id: &ScopeId) -> Option<Scope> {
    let entry = scope_catalog().iter().find(|e| e.id == id.as_str())?;
    let scope = if entry.id == LEAD_ABATEMENT {
        Scope::lead_abatement(ScopeId::new(entry.id), entry.title)
            .with_parts(default_abatement_parts())
    } else {
        Scope::standard(
            ScopeId::new(entry.id),
            entry.title,
            PrereqSection {
                materials: Prerequisite::tracked(default_materials_checklist()),
                general: Prerequisite::tracked(default_general_checklist()),
            },
        )
    };
    Some(scope)
}

/// The full seeded mapping, in catalog order
#[must_use]
pub fn default_snapshot() -> Snapshot {
    scope_catalog()
        .iter()
        .map(|entry| {
            let id = ScopeId::new(entry.id);
            let scope = default_scope(&id).expect("catalog entry always has a default");
            (id, scope)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ScopeKind;

    #[test]
    fn catalog_contains_exactly_one_lead_abatement_scope() {
        let count = scope_catalog()
            .iter()
            .filter(|e| e.id == LEAD_ABATEMENT)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn default_standard_scope_has_tracked_prereqs() {
        let scope = default_scope(&ScopeId::new("hvac_ducting")).unwrap();
        let prereqs = scope.prereqs().expect("standard scope has prereqs");
        assert!(matches!(prereqs.materials, Prerequisite::Tracked { .. }));
        assert!(matches!(prereqs.general, Prerequisite::Tracked { .. }));
        assert!(scope.parts.is_empty());
    }

    #[test]
    fn default_lead_abatement_scope_has_no_prereqs() {
        let scope = default_scope(&ScopeId::new(LEAD_ABATEMENT)).unwrap();
        assert!(matches!(scope.kind, ScopeKind::LeadAbatement));
        assert!(scope.prereqs().is_none());
        assert!(!scope.parts.is_empty());
    }

    #[test]
    fn default_abatement_actions_have_exactly_one_step() {
        let scope = default_scope(&ScopeId::new(LEAD_ABATEMENT)).unwrap();
        for part in &scope.parts {
            for action in &part.actions {
                assert_eq!(action.steps.len(), 1, "part {}", part.title);
            }
        }
    }

    #[test]
    fn unknown_id_has_no_default() {
        assert!(default_scope(&ScopeId::new("summary")).is_none());
    }

    #[test]
    fn default_snapshot_preserves_catalog_order() {
        let snapshot = default_snapshot();
        let ids: Vec<_> = snapshot.keys().map(ScopeId::as_str).collect();
        let expected: Vec<_> = scope_catalog().iter().map(|e| e.id).collect();
        assert_eq!(ids, expected);
    }
}
