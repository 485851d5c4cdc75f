use super::get::find_recipe;
use crate::api::error::{ApiError, ApiResult};
use crate::api::ErrorResponse;
use crate::config::Settings;
use crate::db::DbPool;
use axum::{
    extract::{Path, State},
    Json,
};
use foodgram_core::short_link;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShortLinkResponse {
    /// Absolute URL that redirects to the recipe page
    #[serde(rename = "short-link")]
    pub short_link: String,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/get-link",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Short link for the recipe", body = ShortLinkResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_link(
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ShortLinkResponse>> {
    let mut conn = pool.get()?;
    let recipe = find_recipe(&mut conn, id)?;

    let raw_id = u64::try_from(recipe.id).map_err(|_| ApiError::NotFound("Recipe"))?;
    let code = short_link::encode(raw_id);

    Ok(Json(ShortLinkResponse {
        short_link: settings.short_link_url(&code),
    }))
}
