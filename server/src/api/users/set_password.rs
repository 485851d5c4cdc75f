use super::create::check_password;
use crate::api::error::{ApiError, ApiResult};
use crate::api::ErrorResponse;
use crate::auth::{hash_password, verify_password, AuthUser};
use crate::db::DbPool;
use crate::models::UserChanges;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[utoipa::path(
    post,
    path = "/api/users/set_password",
    tag = "users",
    request_body = SetPasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Wrong current password or invalid new password", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_password(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<SetPasswordRequest>,
) -> ApiResult<StatusCode> {
    if !verify_password(&req.current_password, &user.password_hash) {
        return Err(ApiError::BadRequest(
            "Current password is incorrect".to_string(),
        ));
    }
    check_password(&req.new_password)?;

    let password_hash = hash_password(&req.new_password).map_err(ApiError::internal)?;

    let mut conn = pool.get()?;
    diesel::update(users::table.find(user.id))
        .set(UserChanges {
            password_hash: Some(&password_hash),
            updated_at: Some(Utc::now()),
            ..Default::default()
        })
        .execute(&mut conn)?;

    tracing::info!(user_id = user.id, "password changed");
    Ok(StatusCode::NO_CONTENT)
}
