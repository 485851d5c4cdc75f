use crate::api::error::{ApiError, ApiResult};
use crate::api::ErrorResponse;
use crate::auth::hash_password;
use crate::db::DbPool;
use crate::models::{NewUser, User};
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use foodgram_core::validation::{
    require_text, validate_email, validate_username, USERNAME_MAX_LENGTH,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

pub const PASSWORD_MAX_LENGTH: usize = 128;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateUserResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Passwords are checked for presence and length but never trimmed.
pub(super) fn check_password(password: &str) -> ApiResult<()> {
    require_text("password", password, PASSWORD_MAX_LENGTH)?;
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body(content = CreateUserRequest, example = json!({
        "email": "cook@example.com",
        "username": "cook",
        "first_name": "Ivan",
        "last_name": "Petrov",
        "password": "password"
    })),
    responses(
        (status = 201, description = "User registered", body = CreateUserResponse),
        (status = 400, description = "Invalid request or email/username taken", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = req.email.trim();
    validate_email(email)?;
    let username = req.username.trim();
    validate_username(username)?;
    let first_name = require_text("first_name", &req.first_name, USERNAME_MAX_LENGTH)?;
    let last_name = require_text("last_name", &req.last_name, USERNAME_MAX_LENGTH)?;
    check_password(&req.password)?;

    let password_hash = hash_password(&req.password).map_err(ApiError::internal)?;

    let mut conn = pool.get()?;

    // Email and username uniqueness surface as 400 through the unique constraints
    let user: User = diesel::insert_into(users::table)
        .values(NewUser {
            email,
            username,
            first_name,
            last_name,
            password_hash: &password_hash,
        })
        .returning(User::as_returning())
        .get_result(&mut conn)?;

    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_rejected() {
        let err = check_password("").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_password_not_trimmed() {
        assert!(check_password("  spaced out  ").is_ok());
    }

    #[test]
    fn test_overlong_password_rejected() {
        let long = "x".repeat(PASSWORD_MAX_LENGTH + 1);
        assert!(check_password(&long).is_err());
    }
}
