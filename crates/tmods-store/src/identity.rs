//! Identity boundary
//!
//! The core only needs a stable per-session user id. Authentication must
//! finish before the store subscription starts; a failed handshake falls
//! back to an anonymous identity rather than blocking the session.

use async_trait::async_trait;
use tmods_model::UserId;

/// Authentication handshake failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("authentication failed: {reason}")]
pub struct IdentityError {
    pub reason: String,
}

/// Supplies the per-session user identifier
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Perform the authentication handshake
    async fn authenticate(&self) -> Result<UserId, IdentityError>;
}

/// Identity provider that always yields a fresh anonymous id
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousIdentity;

#[async_trait]
impl IdentityProvider for AnonymousIdentity {
    async fn authenticate(&self) -> Result<UserId, IdentityError> {
        Ok(UserId::anonymous())
    }
}

/// Resolve the session identity, falling back to anonymous on failure
pub async fn resolve_identity(provider: &dyn IdentityProvider) -> UserId {
    match provider.authenticate().await {
        Ok(user) => user,
        Err(err) => {
            tracing::warn!(%err, "authentication failed, continuing anonymously");
            UserId::anonymous()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    #[async_trait]
    impl IdentityProvider for FailingProvider {
        async fn authenticate(&self) -> Result<UserId, IdentityError> {
            Err(IdentityError {
                reason: "token expired".into(),
            })
        }
    }

    #[tokio::test]
    async fn anonymous_identity_authenticates() {
        let user = resolve_identity(&AnonymousIdentity).await;
        assert!(user.as_str().starts_with("anon-"));
    }

    #[tokio::test]
    async fn failed_handshake_falls_back_to_anonymous() {
        let user = resolve_identity(&FailingProvider).await;
        assert!(user.as_str().starts_with("anon-"));
    }
}
