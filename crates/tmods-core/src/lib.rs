//! TMOD Tracker core
//!
//! The single write path for every user-visible mutation, plus the
//! read-side views built over the derivation crate:
//! - `ProjectTracker` - the mutation facade; applies a leaf change,
//!   recomputes derived fields bottom-up, and writes the whole scope
//!   document in one operation
//! - `dashboard` - project/scope completion summaries
//! - `report` - printable report data copied from derived fields
//! - `images` - the session-local image byte cache
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tmods_core::{Mutation, ProjectTracker};
//! use tmods_store::{AnonymousIdentity, MemoryStore, ScopeStore, StoreConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(MemoryStore::new());
//! let store = ScopeStore::connect(
//!     StoreConfig::new("mcr4-tmods"),
//!     backend,
//!     &AnonymousIdentity,
//! ).await?;
//! store.initialize().await?;
//!
//! let tracker = ProjectTracker::new(store);
//! let summary = tracker.summary();
//! println!("project {} complete", summary.overall);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod dashboard;
pub mod error;
pub mod facade;
pub mod images;
pub mod mutation;
pub mod report;

pub use dashboard::{project_summary, ProjectSummary, ScopeSummary};
pub use error::MutationError;
pub use facade::ProjectTracker;
pub use images::{CachedImage, SessionImageCache};
pub use mutation::Mutation;
pub use report::{ActionLine, PartSection, PrereqLine, ScopeReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
