use super::require_admin;
use crate::api::error::{ApiError, ApiResult};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::models::{Tag, TagChanges};
use crate::schema::tags;
use axum::{
    extract::{Path, State},
    Json,
};
use diesel::prelude::*;
use foodgram_core::validation::{require_text, validate_slug, TAG_NAME_MAX_LENGTH};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/api/tags/{id}",
    tag = "tags",
    params(
        ("id" = i32, Path, description = "Tag ID")
    ),
    request_body = UpdateTagRequest,
    responses(
        (status = 200, description = "Tag updated", body = Tag),
        (status = 400, description = "Invalid request or duplicate tag", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_tag(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateTagRequest>,
) -> ApiResult<Json<Tag>> {
    require_admin(&user)?;

    let name = request
        .name
        .as_deref()
        .map(|n| require_text("name", n, TAG_NAME_MAX_LENGTH))
        .transpose()?;
    let slug = request.slug.as_deref().map(str::trim);
    if let Some(slug) = slug {
        validate_slug(slug)?;
    }

    let mut conn = pool.get()?;

    let query = tags::table.find(id);
    let tag: Option<Tag> = if name.is_none() && slug.is_none() {
        query.select(Tag::as_select()).first(&mut conn).optional()?
    } else {
        diesel::update(query)
            .set(&TagChanges { name, slug })
            .returning(Tag::as_returning())
            .get_result(&mut conn)
            .optional()?
    };

    let tag = tag.ok_or(ApiError::NotFound("Tag"))?;
    tracing::info!(tag_id = tag.id, "tag updated");
    Ok(Json(tag))
}
