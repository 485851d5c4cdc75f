use super::representation::UserResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::users::representation::followed_authors;
use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::config::Settings;
use crate::db::DbPool;
use crate::models::User;
use crate::schema::users;
use axum::{
    extract::{Path, State},
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;

/// Load a user or fail with 404.
pub(crate) fn find_user(conn: &mut PgConnection, id: i32) -> ApiResult<User> {
    users::table
        .find(id)
        .select(User::as_select())
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("User"))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn get_user(
    viewer: MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<UserResponse>> {
    let mut conn = pool.get()?;
    let user = find_user(&mut conn, id)?;
    let followed = followed_authors(&mut conn, viewer.id(), &[user.id])?;

    Ok(Json(UserResponse::new(
        &user,
        followed.contains(&user.id),
        &settings,
    )))
}
