//! TMOD Tracker data model
//!
//! Typed scope documents for the MCR4 TMOD progress tracker:
//! - Id newtypes for scopes, parts, actions, and steps
//! - The containment hierarchy (`Scope` > `Part` > `Action` > `Step`)
//! - Prerequisite sections (simple dropdown vs. step-tracked)
//! - The fixed scope catalog and seeded default documents
//! - Document validation (duplicate ids, dangling related-scope links)
//!
//! Derived fields (`percent_complete`, tracked-prerequisite `status`) live
//! on these types but are computed elsewhere; this crate only stores them.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod ids;
pub mod percent;
pub mod scope;
pub mod validate;

pub use catalog::{default_scope, default_snapshot, scope_catalog, CatalogEntry, LEAD_ABATEMENT};
pub use error::ModelError;
pub use ids::{ActionId, PartId, ScopeId, StepId, UserId};
pub use percent::{Percent, Status};
pub use scope::{
    Action, ImageMeta, Part, PrereqKey, PrereqSection, Prerequisite, RelatedScope, Scope,
    ScopeKind, Step,
};
pub use validate::validate_scope;

use indexmap::IndexMap;

/// The full scope mapping as delivered by the store: scope id to document,
/// in catalog order. Every snapshot is a full replace of this mapping.
pub type Snapshot = IndexMap<ScopeId, Scope>;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
