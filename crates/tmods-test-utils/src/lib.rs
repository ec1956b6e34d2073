//! Testing utilities for the TMOD Tracker workspace
//!
//! Shared fixtures: checklists, parts with known percentages, and a
//! fully seeded store over the in-memory backend.

#![allow(missing_docs)]

use std::sync::Arc;

use tmods_model::{Action, Part, Scope, ScopeId, Step};
use tmods_progress::recompute_scope;
use tmods_store::{AnonymousIdentity, MemoryStore, ScopeStore, StoreConfig};

/// Checklist with the given completion flags
pub fn steps(flags: &[bool]) -> Vec<Step> {
    flags
        .iter()
        .map(|&done| Step::with_completed("step", done))
        .collect()
}

/// Action with a checklist of the given flags
pub fn action_with_steps(title: &str, flags: &[bool]) -> Action {
    Action::new(title).with_steps(steps(flags))
}

/// Part with one action per checklist
pub fn part_with_checklists(title: &str, checklists: &[&[bool]]) -> Part {
    Part::new(title).with_actions(
        checklists
            .iter()
            .enumerate()
            .map(|(i, flags)| action_with_steps(&format!("action {i}"), flags))
            .collect(),
    )
}

/// Lead-abatement part linked to `target`, with one single-checklist action
pub fn abatement_part(title: &str, target: &str, flags: &[bool]) -> Part {
    Part::new(title)
        .linked_to(ScopeId::new(target))
        .with_actions(vec![action_with_steps("Abate and clear", flags)])
}

/// Recompute and return, for building expected documents inline
pub fn derived(mut scope: Scope) -> Scope {
    recompute_scope(&mut scope);
    scope
}

/// A connected, catalog-seeded store over a fresh in-memory backend
pub async fn seeded_store() -> (ScopeStore, Arc<MemoryStore>) {
    let backend = Arc::new(MemoryStore::new());
    let store = ScopeStore::connect(
        StoreConfig::new("mcr4-tmods-test"),
        backend.clone(),
        &AnonymousIdentity,
    )
    .await
    .expect("test config is valid");
    store.initialize().await.expect("seeding cannot fail in memory");
    (store, backend)
}
