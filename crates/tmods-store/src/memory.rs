//! In-process reference backend
//!
//! Behaves like the real document store at the contract level: whole
//! document replace on write, and a full-snapshot notification on every
//! change, including the writer's own. Tests use `fail_writes` to induce
//! the permission-failure path.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tmods_model::{Scope, ScopeId, Snapshot};
use tokio::sync::watch;

use crate::document::DocumentStore;
use crate::error::StoreError;

/// In-memory document store
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<Snapshot>,
    notify: watch::Sender<Snapshot>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        let (notify, _) = watch::channel(Snapshot::new());
        Self {
            state: Mutex::new(Snapshot::new()),
            notify,
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Create a store pre-populated with documents
    #[must_use]
    pub fn with_documents(snapshot: Snapshot) -> Self {
        let store = Self::new();
        *store.state.lock() = snapshot;
        store
    }

    /// Make every subsequent write fail, simulating a permission failure
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn publish(&self, snapshot: Snapshot) {
        // Receivers may all be gone; that is not an error for the store.
        let _ = self.notify.send(snapshot);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_all(&self) -> Result<Snapshot, StoreError> {
        Ok(self.state.lock().clone())
    }

    async fn put(&self, id: &ScopeId, doc: &Scope) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteFailed {
                scope: id.clone(),
                reason: "permission denied".into(),
            });
        }
        let snapshot = {
            let mut state = self.state.lock();
            state.insert(id.clone(), doc.clone());
            state.clone()
        };
        self.publish(snapshot);
        Ok(())
    }

    async fn put_all(&self, batch: Vec<(ScopeId, Scope)>) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::SeedFailed {
                reason: "permission denied".into(),
            });
        }
        let snapshot = {
            let mut state = self.state.lock();
            for (id, doc) in batch {
                state.insert(id, doc);
            }
            state.clone()
        };
        self.publish(snapshot);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.notify.subscribe()
    }
}
