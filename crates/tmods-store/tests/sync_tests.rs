//! Scope store synchronization behavior
//!
//! Exercises the full snapshot loop: seed, subscribe, write, and observe
//! the store's own write come back as a full-replace snapshot.

use std::sync::{Arc, Mutex};

use tmods_model::{scope_catalog, ScopeId, Snapshot};
use tmods_store::{AnonymousIdentity, DocumentStore, MemoryStore, ScopeStore, StoreConfig, StoreError};
use tokio::sync::mpsc;

async fn seeded() -> (ScopeStore, Arc<MemoryStore>) {
    let backend = Arc::new(MemoryStore::new());
    let store = ScopeStore::connect(
        StoreConfig::new("mcr4-tmods-test"),
        backend.clone(),
        &AnonymousIdentity,
    )
    .await
    .unwrap();
    store.initialize().await.unwrap();
    (store, backend)
}

#[tokio::test]
async fn own_write_comes_back_as_a_full_snapshot() {
    let (store, _backend) = seeded().await;

    let (tx, mut rx) = mpsc::unbounded_channel::<Snapshot>();
    let handle = store.subscribe(move |snapshot| {
        let _ = tx.send(snapshot.clone());
    });

    let id = ScopeId::new("hvac_ducting");
    let mut doc = store.scope(&id).unwrap();
    doc.title = "HVAC Ducting (revised)".into();
    store.write(&id, doc).await.unwrap();

    let snapshot = rx.recv().await.expect("snapshot delivered");
    // Full replace: every catalog scope is present, not just the edit.
    assert_eq!(snapshot.len(), scope_catalog().len());
    assert_eq!(snapshot[&id].title, "HVAC Ducting (revised)");

    handle.abort();
}

#[tokio::test]
async fn repeated_snapshots_converge_on_the_same_mirror() {
    let (store, backend) = seeded().await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let handle = store.subscribe(move |snapshot| {
        sink.lock().unwrap().push(snapshot.len());
    });

    let id = ScopeId::new("cable_tray");
    for title in ["first edit", "second edit", "third edit"] {
        let mut doc = store.scope(&id).unwrap();
        doc.title = title.into();
        store.write(&id, doc).await.unwrap();
    }

    // Give the subscription task a chance to drain.
    tokio::task::yield_now().await;

    assert_eq!(store.scope(&id).unwrap().title, "third edit");
    assert_eq!(
        backend.get_all().await.unwrap()[&id].title,
        "third edit"
    );

    handle.abort();
    // The watch channel may coalesce bursts; whatever arrived was always
    // the full mapping.
    for len in seen.lock().unwrap().iter() {
        assert_eq!(*len, scope_catalog().len());
    }
}

#[tokio::test]
async fn two_clients_share_one_backend_last_write_wins() {
    let backend = Arc::new(MemoryStore::new());
    let config = StoreConfig::new("mcr4-tmods-test");

    let alice = ScopeStore::connect(config.clone(), backend.clone(), &AnonymousIdentity)
        .await
        .unwrap();
    alice.initialize().await.unwrap();
    let bob = ScopeStore::connect(config, backend.clone(), &AnonymousIdentity)
        .await
        .unwrap();
    bob.initialize().await.unwrap();

    let id = ScopeId::new("console_refit");
    let mut from_alice = alice.scope(&id).unwrap();
    from_alice.title = "Alice's title".into();
    let mut from_bob = bob.scope(&id).unwrap();
    from_bob.title = "Bob's title".into();

    alice.write(&id, from_alice).await.unwrap();
    bob.write(&id, from_bob).await.unwrap();

    // Whole-document granularity, no merge: the later write wins.
    assert_eq!(backend.get_all().await.unwrap()[&id].title, "Bob's title");
}

#[tokio::test]
async fn session_error_hides_nothing_but_blocks_everything() {
    let (store, backend) = seeded().await;

    backend.fail_writes(true);
    let id = ScopeId::new("fire_barriers");
    let doc = store.scope(&id).unwrap();
    let original = store.write(&id, doc.clone()).await.unwrap_err();

    // Recovery at the backend does not clear the session.
    backend.fail_writes(false);
    assert_eq!(store.write(&id, doc).await.unwrap_err(), original);
    assert_eq!(store.initialize().await.unwrap_err(), original);
    assert_eq!(store.session_error(), Some(original));
}

#[tokio::test]
async fn failed_seeding_poisons_the_session() {
    let backend = Arc::new(MemoryStore::new());
    backend.fail_writes(true);

    let store = ScopeStore::connect(
        StoreConfig::new("mcr4-tmods-test"),
        backend.clone(),
        &AnonymousIdentity,
    )
    .await
    .unwrap();

    let err = store.initialize().await.unwrap_err();
    assert!(matches!(err, StoreError::SeedFailed { .. }));
    assert_eq!(store.session_error(), Some(err));
}
