use super::get::find_user;
use crate::api::error::{ApiError, ApiResult};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::schema::users;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use diesel::prelude::*;
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not allowed to delete this user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_user(
    AuthUser(editor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let mut conn = pool.get()?;
    let target = find_user(&mut conn, id)?;
    if !editor.can_modify(target.id) {
        return Err(ApiError::Forbidden("You can only delete your own account"));
    }

    // Recipes, photos, relations and sessions cascade
    diesel::delete(users::table.find(target.id)).execute(&mut conn)?;

    tracing::info!(user_id = target.id, editor_id = editor.id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
