//! Model-level errors
//!
//! These cover structural problems in a scope document: ids, titles, and
//! related-scope links. Percent clamping is handled at deserialization and
//! never errors.

use crate::ids::ScopeId;

/// Structural validation failure in a scope document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Two sibling parts/actions/steps share an id
    #[error("duplicate {kind} id {id} in scope {scope}")]
    DuplicateId {
        /// "part", "action", or "step"
        kind: &'static str,
        id: String,
        scope: ScopeId,
    },

    /// A title is empty or whitespace-only
    #[error("empty {kind} title in scope {scope}")]
    EmptyTitle { kind: &'static str, scope: ScopeId },

    /// `related_scope` names an id outside the catalog
    #[error("related scope {target} does not exist (in scope {scope})")]
    UnknownRelatedScope { target: ScopeId, scope: ScopeId },

    /// `related_scope` names the lead-abatement scope itself
    #[error("part in {scope} links to the lead-abatement scope")]
    LeadAbatementLink { scope: ScopeId },

    /// Only lead-abatement parts may carry a related-scope link
    #[error("part in standard scope {scope} carries a related-scope link")]
    LinkOutsideLeadAbatement { scope: ScopeId },
}
