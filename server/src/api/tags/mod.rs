pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::api::error::{ApiError, ApiResult};
use crate::models::{Tag, User};
use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/tags endpoints (mounted at /api/tags)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_tags).post(create::create_tag))
        .route(
            "/{id}",
            get(get::get_tag)
                .patch(update::update_tag)
                .delete(delete::delete_tag),
        )
}

/// Tags are managed by staff only.
fn require_admin(user: &User) -> ApiResult<()> {
    if user.is_admin {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Only administrators can manage tags"))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_tags,
        get::get_tag,
        create::create_tag,
        update::update_tag,
        delete::delete_tag,
    ),
    components(schemas(Tag, create::CreateTagRequest, update::UpdateTagRequest))
)]
pub struct ApiDoc;
