//! Add/remove procedure shared by favorites, the shopping cart and subscriptions.
//!
//! Each relation is a membership fact between an actor (the requesting user)
//! and a target (a recipe, or another user for subscriptions). It can only be
//! activated once and only deactivated while active.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Favorite,
    ShoppingCart,
    Subscription,
}

impl RelationKind {
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Favorite,
        RelationKind::ShoppingCart,
        RelationKind::Subscription,
    ];

    pub fn already_active_message(self) -> &'static str {
        match self {
            RelationKind::Favorite => "Recipe is already in favorites",
            RelationKind::ShoppingCart => "Recipe is already in the shopping cart",
            RelationKind::Subscription => "Already subscribed to this author",
        }
    }

    pub fn not_active_message(self) -> &'static str {
        match self {
            RelationKind::Favorite => "Recipe is not in favorites",
            RelationKind::ShoppingCart => "Recipe is not in the shopping cart",
            RelationKind::Subscription => "Not subscribed to this author",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationKind::Favorite => "favorite",
            RelationKind::ShoppingCart => "shopping_cart",
            RelationKind::Subscription => "subscription",
        };
        f.write_str(name)
    }
}

/// Outcome of inserting a relation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Created,
    /// The store's uniqueness constraint rejected the row.
    AlreadyExists,
}

/// Persistence for relation rows.
///
/// `insert` must report a uniqueness violation as [`Insertion::AlreadyExists`]
/// rather than an error: it is the guard against two concurrent activations
/// that both passed the existence check.
pub trait RelationStore {
    type Error;

    fn exists(&mut self, kind: RelationKind, actor: i32, target: i32)
        -> Result<bool, Self::Error>;

    fn insert(
        &mut self,
        kind: RelationKind,
        actor: i32,
        target: i32,
    ) -> Result<Insertion, Self::Error>;

    /// Delete the row, returning how many rows were removed.
    fn remove(&mut self, kind: RelationKind, actor: i32, target: i32)
        -> Result<usize, Self::Error>;
}

#[derive(Debug, Error)]
pub enum ToggleError<E> {
    #[error("{}", .0.already_active_message())]
    AlreadyActive(RelationKind),

    #[error("{}", .0.not_active_message())]
    NotActive(RelationKind),

    #[error("You cannot subscribe to yourself")]
    SelfSubscription,

    #[error("relation store failed")]
    Store(#[source] E),
}

/// Activate the relation between `actor` and `target`.
pub fn activate<S: RelationStore>(
    store: &mut S,
    kind: RelationKind,
    actor: i32,
    target: i32,
) -> Result<(), ToggleError<S::Error>> {
    if kind == RelationKind::Subscription && actor == target {
        return Err(ToggleError::SelfSubscription);
    }

    if store
        .exists(kind, actor, target)
        .map_err(ToggleError::Store)?
    {
        return Err(ToggleError::AlreadyActive(kind));
    }

    match store
        .insert(kind, actor, target)
        .map_err(ToggleError::Store)?
    {
        Insertion::Created => Ok(()),
        Insertion::AlreadyExists => Err(ToggleError::AlreadyActive(kind)),
    }
}

/// Deactivate the relation between `actor` and `target`.
pub fn deactivate<S: RelationStore>(
    store: &mut S,
    kind: RelationKind,
    actor: i32,
    target: i32,
) -> Result<(), ToggleError<S::Error>> {
    if !store
        .exists(kind, actor, target)
        .map_err(ToggleError::Store)?
    {
        return Err(ToggleError::NotActive(kind));
    }

    // A concurrent request may have removed the row after the check
    match store
        .remove(kind, actor, target)
        .map_err(ToggleError::Store)?
    {
        0 => Err(ToggleError::NotActive(kind)),
        _ => Ok(()),
    }
}
