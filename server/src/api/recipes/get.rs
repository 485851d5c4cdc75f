use super::representation::{recipe_response, RecipeResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::config::Settings;
use crate::db::DbPool;
use crate::models::Recipe;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;

/// Load a recipe or fail with 404.
pub(crate) fn find_recipe(conn: &mut PgConnection, id: i32) -> ApiResult<Recipe> {
    recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Recipe"))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn get_recipe(
    viewer: MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<RecipeResponse>> {
    let mut conn = pool.get()?;
    let recipe = find_recipe(&mut conn, id)?;
    Ok(Json(recipe_response(
        &mut conn,
        &recipe,
        viewer.id(),
        &settings,
    )?))
}
