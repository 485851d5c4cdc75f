//! Diesel-backed store for favorites, shopping cart entries and subscriptions.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use foodgram_core::{Insertion, RelationKind, RelationStore};

/// Runs `$body` with `$table`, `$actor` and `$target` bound to the table and
/// columns backing `$kind`.
macro_rules! with_relation_table {
    ($kind:expr, $table:ident, $actor:ident, $target:ident => $body:expr) => {
        match $kind {
            RelationKind::Favorite => {
                use crate::schema::favorites::dsl::{
                    favorites as $table, recipe_id as $target, user_id as $actor,
                };
                $body
            }
            RelationKind::ShoppingCart => {
                use crate::schema::shopping_lists::dsl::{
                    recipe_id as $target, shopping_lists as $table, user_id as $actor,
                };
                $body
            }
            RelationKind::Subscription => {
                use crate::schema::subscriptions::dsl::{
                    author_id as $target, subscriptions as $table, user_id as $actor,
                };
                $body
            }
        }
    };
}

pub struct DbRelations<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> DbRelations<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        DbRelations { conn }
    }
}

impl RelationStore for DbRelations<'_> {
    type Error = DieselError;

    fn exists(&mut self, kind: RelationKind, actor: i32, target: i32) -> Result<bool, DieselError> {
        with_relation_table!(kind, table, actor_col, target_col => {
            diesel::select(diesel::dsl::exists(
                table
                    .filter(actor_col.eq(actor))
                    .filter(target_col.eq(target)),
            ))
            .get_result(&mut *self.conn)
        })
    }

    fn insert(
        &mut self,
        kind: RelationKind,
        actor: i32,
        target: i32,
    ) -> Result<Insertion, DieselError> {
        let result = with_relation_table!(kind, table, actor_col, target_col => {
            diesel::insert_into(table)
                .values((actor_col.eq(actor), target_col.eq(target)))
                .execute(&mut *self.conn)
        });

        match result {
            Ok(_) => Ok(Insertion::Created),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                tracing::debug!(%kind, actor, target, "relation inserted concurrently");
                Ok(Insertion::AlreadyExists)
            }
            Err(e) => Err(e),
        }
    }

    fn remove(&mut self, kind: RelationKind, actor: i32, target: i32) -> Result<usize, DieselError> {
        with_relation_table!(kind, table, actor_col, target_col => {
            diesel::delete(
                table
                    .filter(actor_col.eq(actor))
                    .filter(target_col.eq(target)),
            )
            .execute(&mut *self.conn)
        })
    }
}
