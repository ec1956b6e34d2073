//! The scope store
//!
//! Owns the in-memory mirror of all scope documents and the session
//! error state. Writes are whole-document replace; a write or
//! subscription failure poisons the session, and every later operation
//! replays the original error until the process restarts. There is no
//! retry or backoff layer here.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tmods_model::{default_snapshot, Scope, ScopeId, Snapshot, UserId};

use crate::config::StoreConfig;
use crate::document::DocumentStore;
use crate::error::StoreError;
use crate::identity::{resolve_identity, IdentityProvider};

struct Inner {
    backend: Arc<dyn DocumentStore>,
    mirror: RwLock<Snapshot>,
    sticky: Mutex<Option<StoreError>>,
    user: UserId,
    config: StoreConfig,
}

/// Synchronized mirror of the scope collection. Cheap to clone; clones
/// share the mirror and the session error state.
#[derive(Clone)]
pub struct ScopeStore {
    inner: Arc<Inner>,
}

impl ScopeStore {
    /// Validate the configuration, complete the identity handshake, and
    /// connect to the backend. The handshake (or its anonymous fallback)
    /// always finishes before any subscription starts.
    ///
    /// # Errors
    /// `StoreError::Config` when the configuration is rejected; fatal.
    pub async fn connect(
        config: StoreConfig,
        backend: Arc<dyn DocumentStore>,
        identity: &dyn IdentityProvider,
    ) -> Result<Self, StoreError> {
        config.validate()?;
        let user = resolve_identity(identity).await;
        tracing::info!(app_id = %config.app_id, %user, "scope store connected");

        Ok(Self {
            inner: Arc::new(Inner {
                backend,
                mirror: RwLock::new(Snapshot::new()),
                sticky: Mutex::new(None),
                user,
                config,
            }),
        })
    }

    /// Load the collection, seeding the fixed catalog if the store is
    /// empty. Idempotent: a non-empty store is loaded as-is.
    ///
    /// # Errors
    /// Any backend failure; the session is poisoned.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.check()?;

        let existing = match self.inner.backend.get_all().await {
            Ok(snapshot) => snapshot,
            Err(err) => return Err(self.poison(err)),
        };

        if existing.is_empty() {
            tracing::info!(
                namespace = %self.inner.config.project_namespace,
                "store empty, seeding scope catalog"
            );
            let seeded = default_snapshot();
            let batch: Vec<(ScopeId, Scope)> = seeded
                .iter()
                .map(|(id, doc)| (id.clone(), doc.clone()))
                .collect();
            if let Err(err) = self.inner.backend.put_all(batch).await {
                return Err(self.poison(err));
            }
            *self.inner.mirror.write() = seeded;
        } else {
            *self.inner.mirror.write() = existing;
        }
        Ok(())
    }

    /// Start the snapshot subscription. Every external change - including
    /// this client's own just-completed writes - replaces the mirror and
    /// invokes `on_change` with the full mapping. A broken subscription
    /// poisons the session and ends the task.
    pub fn subscribe<F>(&self, on_change: F) -> tokio::task::JoinHandle<()>
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let store = self.clone();
        let mut rx = self.inner.backend.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.changed().await {
                    Ok(()) => {
                        let snapshot = rx.borrow_and_update().clone();
                        *store.inner.mirror.write() = snapshot.clone();
                        on_change(&snapshot);
                    }
                    Err(_) => {
                        let err = StoreError::SubscriptionLost {
                            reason: "snapshot channel closed".into(),
                        };
                        tracing::error!(%err, "subscription ended");
                        store.poison(err);
                        break;
                    }
                }
            }
        })
    }

    /// Replace one scope document in the store and the mirror.
    ///
    /// The caller submits the complete document; there is no
    /// partial-field update. Derived fields must already be recomputed -
    /// the mutation facade guarantees that ordering.
    ///
    /// # Errors
    /// A sticky session error, or the backend write failure (which then
    /// becomes the sticky error).
    pub async fn write(&self, id: &ScopeId, doc: Scope) -> Result<(), StoreError> {
        self.check()?;
        tracing::info!(scope = %id, user = %self.inner.user, "writing scope document");

        match self.inner.backend.put(id, &doc).await {
            Ok(()) => {
                self.inner.mirror.write().insert(id.clone(), doc);
                Ok(())
            }
            Err(err) => {
                tracing::error!(scope = %id, %err, "scope write failed");
                Err(self.poison(err))
            }
        }
    }

    /// Clone of the current mirror
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.inner.mirror.read().clone()
    }

    /// Clone of one scope document from the mirror
    #[must_use]
    pub fn scope(&self, id: &ScopeId) -> Option<Scope> {
        self.inner.mirror.read().get(id).cloned()
    }

    /// The session user
    #[must_use]
    pub fn current_user(&self) -> UserId {
        self.inner.user.clone()
    }

    /// The sticky session error, if the session has failed
    #[must_use]
    pub fn session_error(&self) -> Option<StoreError> {
        self.inner.sticky.lock().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        match &*self.inner.sticky.lock() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn poison(&self, err: StoreError) -> StoreError {
        let mut sticky = self.inner.sticky.lock();
        // First failure wins; later failures replay it.
        sticky.get_or_insert_with(|| err.clone());
        sticky.clone().unwrap_or(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::AnonymousIdentity;
    use crate::memory::MemoryStore;
    use tmods_model::scope_catalog;

    async fn connected(backend: Arc<MemoryStore>) -> ScopeStore {
        ScopeStore::connect(StoreConfig::new("mcr4-tmods"), backend, &AnonymousIdentity)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn initialize_seeds_empty_store() {
        let backend = Arc::new(MemoryStore::new());
        let store = connected(backend.clone()).await;

        store.initialize().await.unwrap();
        assert_eq!(store.snapshot().len(), scope_catalog().len());
        assert_eq!(backend.get_all().await.unwrap().len(), scope_catalog().len());
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let backend = Arc::new(MemoryStore::new());
        let store = connected(backend.clone()).await;

        store.initialize().await.unwrap();
        let id = ScopeId::new("hvac_ducting");
        let mut doc = store.scope(&id).unwrap();
        doc.title = "edited".into();
        store.write(&id, doc).await.unwrap();

        // A second initialize must load, not re-seed.
        store.initialize().await.unwrap();
        assert_eq!(store.scope(&id).unwrap().title, "edited");
    }

    #[tokio::test]
    async fn initialize_loads_a_populated_store_without_reseeding() {
        let mut existing = tmods_model::default_snapshot();
        let id = ScopeId::new("fire_barriers");
        existing.get_mut(&id).unwrap().title = "already edited".into();

        let backend = Arc::new(MemoryStore::with_documents(existing));
        let store = connected(backend).await;
        store.initialize().await.unwrap();

        assert_eq!(store.scope(&id).unwrap().title, "already edited");
    }

    #[tokio::test]
    async fn invalid_config_never_connects() {
        let backend: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let result =
            ScopeStore::connect(StoreConfig::new(""), backend, &AnonymousIdentity).await;
        assert!(matches!(result, Err(StoreError::Config(_))));
    }

    #[tokio::test]
    async fn write_failure_poisons_the_session() {
        let backend = Arc::new(MemoryStore::new());
        let store = connected(backend.clone()).await;
        store.initialize().await.unwrap();

        backend.fail_writes(true);
        let id = ScopeId::new("cable_tray");
        let doc = store.scope(&id).unwrap();
        let first = store.write(&id, doc.clone()).await.unwrap_err();
        assert!(matches!(first, StoreError::WriteFailed { .. }));

        // Backend recovers, but the session stays failed.
        backend.fail_writes(false);
        let replay = store.write(&id, doc).await.unwrap_err();
        assert_eq!(replay, first);
        assert_eq!(store.session_error(), Some(first));
    }
}
