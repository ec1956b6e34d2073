//! TMOD Tracker derivation core
//!
//! The one piece of this system with mathematical contracts:
//! - `calc` - pure completion arithmetic (step percentages, means, labels)
//! - `rollup` - the bottom-up recompute pass over a scope document
//! - `link` - the cross-scope rollup from lead-abatement parts into the
//!   prerequisite view of the scopes they gate
//!
//! Everything here is pure: no I/O, no shared state, empty collections
//! degrade to 0%. The only fallible operation is `linked_rollup`, which
//! rejects the lead-abatement scope as its own target.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod calc;
pub mod link;
pub mod rollup;

pub use calc::{mean_completion, status_label, step_completion};
pub use link::{linked_rollup, LinkError, LinkLabel, LinkedRollup};
pub use rollup::{
    project_completion, recompute_action, recompute_part, recompute_scope, scope_completion,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
