use super::require_admin;
use crate::api::error::ApiResult;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::models::{NewTag, Tag};
use crate::schema::tags;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use foodgram_core::validation::{require_text, validate_slug, TAG_NAME_MAX_LENGTH};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTagRequest {
    pub name: String,
    /// Letters, digits, hyphens and underscores
    pub slug: String,
}

#[utoipa::path(
    post,
    path = "/api/tags",
    tag = "tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created successfully", body = Tag),
        (status = 400, description = "Invalid request or duplicate tag", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_tag(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateTagRequest>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&user)?;

    let name = require_text("name", &request.name, TAG_NAME_MAX_LENGTH)?;
    let slug = request.slug.trim();
    validate_slug(slug)?;

    let mut conn = pool.get()?;

    // Name and slug uniqueness are enforced by the database
    let tag: Tag = diesel::insert_into(tags::table)
        .values(NewTag { name, slug })
        .returning(Tag::as_returning())
        .get_result(&mut conn)?;

    tracing::info!(tag_id = tag.id, slug = %tag.slug, "tag created");
    Ok((StatusCode::CREATED, Json(tag)))
}
