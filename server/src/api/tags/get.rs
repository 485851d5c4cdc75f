use crate::api::error::{ApiError, ApiResult};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::models::Tag;
use crate::schema::tags;
use axum::{
    extract::{Path, State},
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/tags/{id}",
    tag = "tags",
    params(
        ("id" = i32, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag details", body = Tag),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    )
)]
pub async fn get_tag(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Tag>> {
    let mut conn = pool.get()?;

    let tag = tags::table
        .find(id)
        .select(Tag::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::NotFound("Tag"))?;

    Ok(Json(tag))
}
