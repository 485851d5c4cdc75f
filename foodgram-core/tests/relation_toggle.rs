//! Behaviour of the shared favorite / shopping cart / subscription procedure,
//! run against an in-memory store.

use foodgram_core::toggle::{
    activate, deactivate, Insertion, RelationKind, RelationStore, ToggleError,
};
use std::collections::HashSet;
use std::convert::Infallible;

/// Store backed by a set, with a unique constraint on (kind, actor, target).
#[derive(Default)]
struct MemoryStore {
    rows: HashSet<(RelationKind, i32, i32)>,
}

impl RelationStore for MemoryStore {
    type Error = Infallible;

    fn exists(&mut self, kind: RelationKind, actor: i32, target: i32) -> Result<bool, Infallible> {
        Ok(self.rows.contains(&(kind, actor, target)))
    }

    fn insert(
        &mut self,
        kind: RelationKind,
        actor: i32,
        target: i32,
    ) -> Result<Insertion, Infallible> {
        if self.rows.insert((kind, actor, target)) {
            Ok(Insertion::Created)
        } else {
            Ok(Insertion::AlreadyExists)
        }
    }

    fn remove(&mut self, kind: RelationKind, actor: i32, target: i32) -> Result<usize, Infallible> {
        Ok(usize::from(self.rows.remove(&(kind, actor, target))))
    }
}

/// Simulates another request winning the race between the existence check
/// and the write: `exists` reports a stale answer.
struct RacingStore {
    inner: MemoryStore,
    stale_exists: bool,
}

impl RelationStore for RacingStore {
    type Error = Infallible;

    fn exists(&mut self, _: RelationKind, _: i32, _: i32) -> Result<bool, Infallible> {
        Ok(self.stale_exists)
    }

    fn insert(
        &mut self,
        kind: RelationKind,
        actor: i32,
        target: i32,
    ) -> Result<Insertion, Infallible> {
        self.inner.insert(kind, actor, target)
    }

    fn remove(&mut self, kind: RelationKind, actor: i32, target: i32) -> Result<usize, Infallible> {
        self.inner.remove(kind, actor, target)
    }
}

#[derive(Debug, PartialEq)]
struct StoreDown;

impl std::fmt::Display for StoreDown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("store down")
    }
}

impl std::error::Error for StoreDown {}

struct FailingStore;

impl RelationStore for FailingStore {
    type Error = StoreDown;

    fn exists(&mut self, _: RelationKind, _: i32, _: i32) -> Result<bool, StoreDown> {
        Err(StoreDown)
    }

    fn insert(&mut self, _: RelationKind, _: i32, _: i32) -> Result<Insertion, StoreDown> {
        Err(StoreDown)
    }

    fn remove(&mut self, _: RelationKind, _: i32, _: i32) -> Result<usize, StoreDown> {
        Err(StoreDown)
    }
}

#[test]
fn activate_then_deactivate() {
    for kind in RelationKind::ALL {
        let mut store = MemoryStore::default();
        assert!(activate(&mut store, kind, 1, 2).is_ok());
        assert!(store.rows.contains(&(kind, 1, 2)));
        assert!(deactivate(&mut store, kind, 1, 2).is_ok());
        assert!(store.rows.is_empty());
    }
}

#[test]
fn activating_twice_is_a_duplicate() {
    for kind in RelationKind::ALL {
        let mut store = MemoryStore::default();
        activate(&mut store, kind, 1, 2).unwrap();

        let err = activate(&mut store, kind, 1, 2).unwrap_err();
        assert!(matches!(err, ToggleError::AlreadyActive(k) if k == kind));
        assert_eq!(store.rows.len(), 1);
    }
}

#[test]
fn deactivating_inactive_is_not_found() {
    for kind in RelationKind::ALL {
        let mut store = MemoryStore::default();
        let err = deactivate(&mut store, kind, 1, 2).unwrap_err();
        assert!(matches!(err, ToggleError::NotActive(k) if k == kind));

        activate(&mut store, kind, 1, 2).unwrap();
        deactivate(&mut store, kind, 1, 2).unwrap();
        let err = deactivate(&mut store, kind, 1, 2).unwrap_err();
        assert!(matches!(err, ToggleError::NotActive(_)));
    }
}

#[test]
fn relations_are_independent() {
    let mut store = MemoryStore::default();
    activate(&mut store, RelationKind::Favorite, 1, 7).unwrap();

    // Same pair, different relation
    activate(&mut store, RelationKind::ShoppingCart, 1, 7).unwrap();
    // Same relation, different actor
    activate(&mut store, RelationKind::Favorite, 2, 7).unwrap();

    assert_eq!(store.rows.len(), 3);
}

#[test]
fn self_subscription_rejected_in_any_state() {
    let mut store = MemoryStore::default();
    let err = activate(&mut store, RelationKind::Subscription, 5, 5).unwrap_err();
    assert!(matches!(err, ToggleError::SelfSubscription));
    assert!(store.rows.is_empty());

    // Even if a self row somehow exists, the answer is still self-subscription
    store.rows.insert((RelationKind::Subscription, 5, 5));
    let err = activate(&mut store, RelationKind::Subscription, 5, 5).unwrap_err();
    assert!(matches!(err, ToggleError::SelfSubscription));
}

#[test]
fn self_relation_allowed_for_recipes() {
    // Recipe ids and user ids are different spaces; user 3 may favorite recipe 3
    let mut store = MemoryStore::default();
    assert!(activate(&mut store, RelationKind::Favorite, 3, 3).is_ok());
    assert!(activate(&mut store, RelationKind::ShoppingCart, 3, 3).is_ok());
}

#[test]
fn unique_constraint_catches_racing_activation() {
    let mut inner = MemoryStore::default();
    inner.rows.insert((RelationKind::Favorite, 1, 2));
    let mut store = RacingStore {
        inner,
        stale_exists: false,
    };

    let err = activate(&mut store, RelationKind::Favorite, 1, 2).unwrap_err();
    assert!(matches!(err, ToggleError::AlreadyActive(RelationKind::Favorite)));
}

#[test]
fn racing_deactivation_reports_not_active() {
    let mut store = RacingStore {
        inner: MemoryStore::default(),
        stale_exists: true,
    };

    let err = deactivate(&mut store, RelationKind::ShoppingCart, 1, 2).unwrap_err();
    assert!(matches!(err, ToggleError::NotActive(RelationKind::ShoppingCart)));
}

#[test]
fn store_errors_propagate() {
    let err = activate(&mut FailingStore, RelationKind::Favorite, 1, 2).unwrap_err();
    assert!(matches!(err, ToggleError::Store(StoreDown)));

    let err = deactivate(&mut FailingStore, RelationKind::Subscription, 1, 2).unwrap_err();
    assert!(matches!(err, ToggleError::Store(StoreDown)));
}

#[test]
fn messages_are_human_readable() {
    let err: ToggleError<Infallible> = ToggleError::AlreadyActive(RelationKind::Subscription);
    assert_eq!(err.to_string(), "Already subscribed to this author");

    let err: ToggleError<Infallible> = ToggleError::NotActive(RelationKind::ShoppingCart);
    assert_eq!(err.to_string(), "Recipe is not in the shopping cart");
}
