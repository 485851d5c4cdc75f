use crate::api::error::{ApiError, ApiResult};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::schema::photos;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

/// Photos are immutable once stored, so clients may cache them indefinitely.
const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

#[utoipa::path(
    get,
    path = "/api/photos/{id}",
    tag = "photos",
    params(
        ("id" = Uuid, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Image bytes with their stored content type"),
        (status = 404, description = "Photo not found", body = ErrorResponse)
    )
)]
pub async fn get_photo(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = pool.get()?;

    let (content_type, data): (String, Vec<u8>) = photos::table
        .find(id)
        .select((photos::content_type, photos::data))
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::NotFound("Photo"))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        data,
    ))
}
