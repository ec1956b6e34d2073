//! Scope document validation
//!
//! Documents arriving from the shared store are not trusted: a stale or
//! hand-edited document can carry duplicate ids, blank titles, or a
//! dangling related-scope link. Validation rejects these before they reach
//! the derivation functions (which assume well-formed input).

use std::collections::HashSet;

use crate::catalog::LEAD_ABATEMENT;
use crate::error::ModelError;
use crate::ids::ScopeId;
use crate::scope::{RelatedScope, Scope};

/// Validate one scope document against the set of known scope ids.
///
/// Checks, in order:
/// - non-empty scope/part/action titles
/// - sibling id uniqueness at every level
/// - related-scope links: only on lead-abatement parts, must name an
///   existing scope other than the lead-abatement scope itself
///
/// # Errors
/// The first violation found, as a [`ModelError`].
pub fn validate_scope(scope: &Scope, known_scopes: &HashSet<ScopeId>) -> Result<(), ModelError> {
    if scope.title.trim().is_empty() {
        return Err(ModelError::EmptyTitle {
            kind: "scope",
            scope: scope.id.clone(),
        });
    }

    let mut part_ids = HashSet::new();
    for part in &scope.parts {
        if part.title.trim().is_empty() {
            return Err(ModelError::EmptyTitle {
                kind: "part",
                scope: scope.id.clone(),
            });
        }
        if !part_ids.insert(part.id) {
            return Err(ModelError::DuplicateId {
                kind: "part",
                id: part.id.to_string(),
                scope: scope.id.clone(),
            });
        }

        validate_link(scope, &part.related_scope, known_scopes)?;

        let mut action_ids = HashSet::new();
        for action in &part.actions {
            if action.title.trim().is_empty() {
                return Err(ModelError::EmptyTitle {
                    kind: "action",
                    scope: scope.id.clone(),
                });
            }
            if !action_ids.insert(action.id) {
                return Err(ModelError::DuplicateId {
                    kind: "action",
                    id: action.id.to_string(),
                    scope: scope.id.clone(),
                });
            }

            let mut step_ids = HashSet::new();
            for step in &action.steps {
                if !step_ids.insert(step.id) {
                    return Err(ModelError::DuplicateId {
                        kind: "step",
                        id: step.id.to_string(),
                        scope: scope.id.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

fn validate_link(
    scope: &Scope,
    link: &RelatedScope,
    known_scopes: &HashSet<ScopeId>,
) -> Result<(), ModelError> {
    let Some(target) = link.scope_id() else {
        return Ok(());
    };

    if !scope.is_lead_abatement() {
        return Err(ModelError::LinkOutsideLeadAbatement {
            scope: scope.id.clone(),
        });
    }
    if target.as_str() == LEAD_ABATEMENT {
        return Err(ModelError::LeadAbatementLink {
            scope: scope.id.clone(),
        });
    }
    if !known_scopes.contains(target) {
        return Err(ModelError::UnknownRelatedScope {
            target: target.clone(),
            scope: scope.id.clone(),
        });
    }
    Ok(())
}
