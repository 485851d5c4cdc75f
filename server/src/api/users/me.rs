use super::representation::UserResponse;
use crate::api::error::ApiResult;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::config::Settings;
use axum::{extract::State, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    AuthUser(user): AuthUser,
    State(settings): State<Arc<Settings>>,
) -> ApiResult<Json<UserResponse>> {
    // Users cannot follow themselves
    Ok(Json(UserResponse::new(&user, false, &settings)))
}
