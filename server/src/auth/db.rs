use crate::db::DbPool;
use crate::models::User;
use crate::schema::{sessions, users};
use chrono::Utc;
use diesel::prelude::*;

use super::crypto::hash_token;

/// Look up the active, unblocked user owning `token`.
///
/// `Ok(None)` means the token is unknown or expired; `Err` is a pool or
/// query failure.
pub fn get_user_from_token(pool: &DbPool, token: &str) -> anyhow::Result<Option<User>> {
    let mut conn = pool.get()?;
    let token_hash = hash_token(token);

    let user = sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .filter(users::is_blocked.eq(false))
        .select(User::as_select())
        .first(&mut conn)
        .optional()?;

    Ok(user)
}
