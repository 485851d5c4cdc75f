use super::get::find_user;
use super::representation::UserResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::users::representation::followed_authors;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::config::Settings;
use crate::db::DbPool;
use crate::models::{User, UserChanges};
use crate::schema::users;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use diesel::prelude::*;
use foodgram_core::validation::{
    require_text, validate_email, validate_username, USERNAME_MAX_LENGTH,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Profile fields; omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid request or email/username taken", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not allowed to edit this user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_user(
    AuthUser(editor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let email = req.email.as_deref().map(str::trim);
    if let Some(email) = email {
        validate_email(email)?;
    }
    let username = req.username.as_deref().map(str::trim);
    if let Some(username) = username {
        validate_username(username)?;
    }
    let first_name = req
        .first_name
        .as_deref()
        .map(|v| require_text("first_name", v, USERNAME_MAX_LENGTH))
        .transpose()?;
    let last_name = req
        .last_name
        .as_deref()
        .map(|v| require_text("last_name", v, USERNAME_MAX_LENGTH))
        .transpose()?;

    let mut conn = pool.get()?;
    let target = find_user(&mut conn, id)?;
    if !editor.can_modify(target.id) {
        return Err(ApiError::Forbidden("You can only edit your own profile"));
    }

    let user: User = diesel::update(users::table.find(target.id))
        .set(UserChanges {
            email,
            username,
            first_name,
            last_name,
            updated_at: Some(Utc::now()),
            ..Default::default()
        })
        .returning(User::as_returning())
        .get_result(&mut conn)?;

    tracing::info!(user_id = user.id, editor_id = editor.id, "user updated");

    let followed = followed_authors(&mut conn, Some(editor.id), &[user.id])?;
    Ok(Json(UserResponse::new(
        &user,
        followed.contains(&user.id),
        &settings,
    )))
}
