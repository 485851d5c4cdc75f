pub mod get;
pub mod store;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/photos endpoints (mounted at /api/photos)
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(get::get_photo))
}

#[derive(OpenApi)]
#[openapi(paths(get::get_photo))]
pub struct ApiDoc;
