//! Persistent-store boundary
//!
//! A document collection keyed by scope id. The core requires nothing
//! beyond full-collection reads, whole-document writes, and a snapshot
//! subscription; no query or filter capability is assumed.

use async_trait::async_trait;
use tmods_model::{Scope, ScopeId, Snapshot};
use tokio::sync::watch;

use crate::error::StoreError;

/// External document collection keyed by scope id.
///
/// `subscribe` delivers the entire current mapping on every change - a
/// full replace, not an incremental patch - including changes triggered
/// by this client's own writes. Implementations must publish self-writes
/// too; consumers are required to tolerate the echo.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the entire collection
    async fn get_all(&self) -> Result<Snapshot, StoreError>;

    /// Replace one scope document
    async fn put(&self, id: &ScopeId, doc: &Scope) -> Result<(), StoreError>;

    /// Replace a batch of documents in one operation. Used only at
    /// initialization to seed the catalog.
    async fn put_all(&self, batch: Vec<(ScopeId, Scope)>) -> Result<(), StoreError>;

    /// Subscribe to full-snapshot change notifications
    fn subscribe(&self) -> watch::Receiver<Snapshot>;
}
