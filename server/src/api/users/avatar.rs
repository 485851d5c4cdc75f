use crate::api::error::{ApiError, ApiResult};
use crate::api::photos::store::{delete_photo, store_photo};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::config::Settings;
use crate::db::DbPool;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use diesel::prelude::*;
use foodgram_core::decode_data_uri;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetAvatarRequest {
    /// Base64 `data:` URI of the image
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvatarResponse {
    /// Absolute URL of the avatar, or null when none is set
    pub avatar: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/users/me/avatar",
    tag = "users",
    responses(
        (status = 200, description = "Current avatar", body = AvatarResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_avatar(
    AuthUser(user): AuthUser,
    State(settings): State<Arc<Settings>>,
) -> ApiResult<Json<AvatarResponse>> {
    Ok(Json(AvatarResponse {
        avatar: user.avatar_id.map(|id| settings.photo_url(id)),
    }))
}

#[utoipa::path(
    put,
    path = "/api/users/me/avatar",
    tag = "users",
    request_body = SetAvatarRequest,
    responses(
        (status = 200, description = "Avatar replaced", body = AvatarResponse),
        (status = 400, description = "Missing or invalid image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_avatar(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    Json(req): Json<SetAvatarRequest>,
) -> ApiResult<Json<AvatarResponse>> {
    let image = decode_data_uri(&req.avatar)?;

    let mut conn = pool.get()?;
    let photo_id = conn.transaction::<_, ApiError, _>(|conn| {
        let photo_id = store_photo(conn, user.id, &image)?;
        diesel::update(users::table.find(user.id))
            .set((
                users::avatar_id.eq(Some(photo_id)),
                users::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        if let Some(old) = user.avatar_id {
            delete_photo(conn, old)?;
        }
        Ok(photo_id)
    })?;

    tracing::info!(user_id = user.id, photo_id = %photo_id, "avatar set");
    Ok(Json(AvatarResponse {
        avatar: Some(settings.photo_url(photo_id)),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/users/me/avatar",
    tag = "users",
    responses(
        (status = 204, description = "Avatar removed"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_avatar(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> ApiResult<StatusCode> {
    let Some(old) = user.avatar_id else {
        return Ok(StatusCode::NO_CONTENT);
    };

    let mut conn = pool.get()?;
    conn.transaction::<_, ApiError, _>(|conn| {
        diesel::update(users::table.find(user.id))
            .set((
                users::avatar_id.eq(None::<uuid::Uuid>),
                users::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        delete_photo(conn, old)
    })?;

    tracing::info!(user_id = user.id, "avatar removed");
    Ok(StatusCode::NO_CONTENT)
}
