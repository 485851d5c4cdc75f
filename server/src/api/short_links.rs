//! `/r/{code}/` redirects produced by `GET /api/recipes/{id}/get-link`.

use crate::api::error::{ApiError, ApiResult};
use crate::api::recipes::get::find_recipe;
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use foodgram_core::short_link;
use std::sync::Arc;
use utoipa::OpenApi;

/// Returns the router for short links (mounted at /r)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{code}", get(resolve_short_link))
        .route("/{code}/", get(resolve_short_link))
}

/// Decode a short code to a recipe id; codes beyond the id range name no recipe.
fn recipe_id_from_code(code: &str) -> ApiResult<i32> {
    let raw = short_link::decode(code)?;
    i32::try_from(raw).map_err(|_| ApiError::NotFound("Recipe"))
}

pub fn recipe_page(id: i32) -> String {
    format!("/recipes/{id}/")
}

#[utoipa::path(
    get,
    path = "/r/{code}/",
    tag = "recipes",
    params(
        ("code" = String, Path, description = "Base-62 short code")
    ),
    responses(
        (status = 302, description = "Redirect to the recipe page"),
        (status = 400, description = "Malformed code", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn resolve_short_link(
    State(pool): State<Arc<DbPool>>,
    Path(code): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = recipe_id_from_code(&code)?;

    let mut conn = pool.get()?;
    find_recipe(&mut conn, id)?;

    tracing::debug!(code = %code, recipe_id = id, "short link resolved");
    Ok((StatusCode::FOUND, [(header::LOCATION, recipe_page(id))]))
}

#[derive(OpenApi)]
#[openapi(paths(resolve_short_link))]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_to_id() {
        assert_eq!(recipe_id_from_code("1").unwrap(), 1);
        assert_eq!(recipe_id_from_code(&short_link::encode(12345)).unwrap(), 12345);
    }

    #[test]
    fn test_malformed_code() {
        let err = recipe_id_from_code("ab-c").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_code_beyond_id_range() {
        let err = recipe_id_from_code(&short_link::encode(u64::from(u32::MAX))).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_recipe_page() {
        assert_eq!(recipe_page(42), "/recipes/42/");
    }
}
