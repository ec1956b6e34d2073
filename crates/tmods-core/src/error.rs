//! Facade errors
//!
//! A rejected mutation is not sticky: the caller sees the error, the
//! session continues. Store failures pass through unchanged (and those
//! are sticky at the store layer).

use tmods_model::{ActionId, ModelError, PartId, PrereqKey, ScopeId, StepId};
use tmods_store::StoreError;

/// Why a mutation was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    /// The addressed scope is not in the mirror
    #[error("unknown scope {0}")]
    UnknownScope(ScopeId),

    /// The addressed part does not exist in the scope
    #[error("unknown part {0}")]
    UnknownPart(PartId),

    /// The addressed action does not exist in the part
    #[error("unknown action {0}")]
    UnknownAction(ActionId),

    /// The addressed step does not exist in the action
    #[error("unknown step {0}")]
    UnknownStep(StepId),

    /// Dropdown status change on a step-tracked prerequisite
    #[error("prerequisite {key:?} is step-tracked; its status is derived from the checklist")]
    StatusIsDerived { key: PrereqKey },

    /// Checklist operation on a simple prerequisite
    #[error("prerequisite {key:?} has no checklist")]
    NoChecklist { key: PrereqKey },

    /// Prerequisite mutation on the lead-abatement scope
    #[error("scope {0} has no prerequisite section")]
    NoPrereqSection(ScopeId),

    /// Simplified toggle outside the lead-abatement scope
    #[error("the simplified toggle applies only to the lead-abatement scope, not {0}")]
    NotLeadAbatement(ScopeId),

    /// Simplified toggle on an action with an empty checklist
    #[error("action {0} has no steps to toggle")]
    EmptyToggle(ActionId),

    /// The mutated document failed structural validation
    #[error(transparent)]
    Invalid(#[from] ModelError),

    /// The store rejected the write (sticky at the store layer)
    #[error(transparent)]
    Store(#[from] StoreError),
}
