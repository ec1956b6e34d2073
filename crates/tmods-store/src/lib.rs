//! TMOD Tracker scope store
//!
//! The authoritative in-memory mirror of all scope documents, kept in
//! sync with an external persistent store:
//! - `DocumentStore` - the persistent-store boundary (get/put/subscribe)
//! - `MemoryStore` - reference in-process backend, also used in tests
//! - `IdentityProvider` - identity boundary with anonymous fallback
//! - `StoreConfig` - explicit validated startup configuration
//! - `ScopeStore` - seeding, snapshot subscription, whole-document writes,
//!   and the sticky session error state
//!
//! Write policy is whole-document replace: callers merge locally and
//! submit the complete scope document every time. Concurrent writes to
//! the same scope race at document granularity; last write wins.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod document;
pub mod error;
pub mod identity;
pub mod memory;
pub mod scope_store;

pub use config::StoreConfig;
pub use document::DocumentStore;
pub use error::{ConfigError, StoreError};
pub use identity::{resolve_identity, AnonymousIdentity, IdentityError, IdentityProvider};
pub use memory::MemoryStore;
pub use scope_store::ScopeStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
