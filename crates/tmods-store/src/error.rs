//! Store-boundary errors
//!
//! Two classes: configuration errors are fatal at startup (the store
//! never initializes), synchronization errors are sticky for the session
//! (every later operation replays the original failure until the process
//! restarts). Errors are `Clone` so the sticky state can replay them.

use tmods_model::ScopeId;

/// Invalid startup configuration. Fatal; surfaced once, no retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No application id was supplied
    #[error("application id is required")]
    MissingAppId,

    /// Application id contains characters outside `[a-z0-9-]`
    #[error("application id {0:?} is malformed (expected lowercase alphanumerics and dashes)")]
    MalformedAppId(String),

    /// No project namespace could be derived
    #[error("project namespace is required")]
    MissingNamespace,
}

/// Synchronization failure at the persistent-store boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Startup configuration was rejected
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading the full collection failed
    #[error("fetch failed: {reason}")]
    FetchFailed { reason: String },

    /// A scope document write was rejected
    #[error("write failed for scope {scope}: {reason}")]
    WriteFailed { scope: ScopeId, reason: String },

    /// The initialization batch write failed
    #[error("catalog seeding failed: {reason}")]
    SeedFailed { reason: String },

    /// The snapshot subscription ended
    #[error("subscription lost: {reason}")]
    SubscriptionLost { reason: String },
}

impl StoreError {
    /// Whether this error poisons the session (everything except a
    /// configuration error, which prevents the session from starting
    /// at all).
    #[inline]
    #[must_use]
    pub fn is_sticky(&self) -> bool {
        !matches!(self, StoreError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_not_sticky() {
        assert!(!StoreError::Config(ConfigError::MissingAppId).is_sticky());
        assert!(StoreError::FetchFailed {
            reason: "permission denied".into()
        }
        .is_sticky());
    }

    #[test]
    fn error_messages_name_the_scope() {
        let err = StoreError::WriteFailed {
            scope: ScopeId::new("cable_tray"),
            reason: "permission denied".into(),
        };
        assert!(err.to_string().contains("cable_tray"));
    }
}
