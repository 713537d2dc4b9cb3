//! Tests for key-value storage used by controllers

use gof::context::Context;
use gof::controller::{ActionTable, Controller};
use gof::dispatcher::dispatch_action;
use gof::storage::{MemoryStorage, Storage, StorageError, StorageExt};
use http::Request;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Session {
    user: String,
    visits: u32,
}

#[test]
fn test_typed_round_trip_and_delete() {
    let store = MemoryStorage::new();
    let session = Session {
        user: "ann".to_string(),
        visits: 3,
    };
    store.set("session:ann", &session).unwrap();
    assert_eq!(store.get::<Session>("session:ann").unwrap(), session);

    store.del("session:ann");
    assert!(matches!(
        store.get::<Session>("session:ann"),
        Err(StorageError::NotFound { .. })
    ));
    // Deleting twice is fine.
    store.del("session:ann");
}

#[test]
fn test_decode_failure_is_codec_error() {
    let store = MemoryStorage::new();
    store.set("count", &42u32).unwrap();
    let err = store.get::<Session>("count").unwrap_err();
    assert!(matches!(err, StorageError::Codec { ref key, .. } if key == "count"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_expiry_hides_and_purges() {
    let store = MemoryStorage::new();
    store.set_expire("short", &"soon gone", 0).unwrap();
    store.set_expire("long", &"still here", 3600).unwrap();
    store.set("forever", &1).unwrap();

    thread::sleep(Duration::from_millis(5));
    assert!(store.get_raw("short").unwrap().is_none());
    assert_eq!(store.get::<String>("long").unwrap(), "still here");
    assert_eq!(store.len(), 2);

    store.set_expire("gone", &true, 0).unwrap();
    thread::sleep(Duration::from_millis(5));
    assert_eq!(store.purge_expired(), 1);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_set_replaces_expiry() {
    let store = MemoryStorage::new();
    store.set_expire("k", &1, 0).unwrap();
    store.set("k", &2).unwrap();
    thread::sleep(Duration::from_millis(5));
    assert_eq!(store.get::<i32>("k").unwrap(), 2);
}

#[test]
fn test_clones_share_entries_across_threads() {
    let store = MemoryStorage::new();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    store.set(&format!("k{t}-{i}"), &i).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.len(), 100);
}

/// Controller holding a storage handle behind the object-safe trait.
struct Visits {
    store: Arc<dyn Storage>,
}

impl Visits {
    fn index(&self, ctx: &mut Context, user: String) {
        let key = format!("visits:{user}");
        let count = self.store.get::<u32>(&key).unwrap_or(0) + 1;
        if self.store.set(&key, &count).is_ok() {
            ctx.response_mut().write_str(&count.to_string());
        }
    }
}

impl Controller for Visits {
    fn actions(table: &mut ActionTable<Self>) {
        table.action("Index", Visits::index);
    }
}

#[test]
fn test_controller_uses_dyn_storage() {
    let controller = Visits {
        store: Arc::new(MemoryStorage::new()),
    };
    for expected in ["1", "2", "3"] {
        let mut ctx = Context::new(Request::get("/").body(Vec::new()).unwrap());
        dispatch_action(&controller, &mut ctx, "Index", &gof::args!["ann"]).unwrap();
        assert_eq!(ctx.response().body_text(), expected);
    }
}
