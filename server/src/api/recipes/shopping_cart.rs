use super::membership;
use super::representation::ShortRecipeResponse;
use crate::api::error::ApiResult;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::config::Settings;
use crate::db::DbPool;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use foodgram_core::RelationKind;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/shopping_cart",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 201, description = "Recipe added to the shopping cart", body = ShortRecipeResponse),
        (status = 400, description = "Already in the shopping cart", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_to_cart(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = pool.get()?;
    let recipe = membership::add(
        &mut conn,
        RelationKind::ShoppingCart,
        user.id,
        id,
        &settings,
    )?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/shopping_cart",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe removed from the shopping cart"),
        (status = 400, description = "Not in the shopping cart", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_from_cart(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let mut conn = pool.get()?;
    membership::remove(&mut conn, RelationKind::ShoppingCart, user.id, id)?;
    Ok(StatusCode::NO_CONTENT)
}
