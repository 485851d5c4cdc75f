use super::get::find_recipe;
use crate::api::error::{ApiError, ApiResult};
use crate::api::photos::store::delete_photo;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use diesel::prelude::*;
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let mut conn = pool.get()?;
    let recipe = find_recipe(&mut conn, id)?;

    if !user.can_modify(recipe.author_id) {
        return Err(ApiError::Forbidden(
            "You do not have permission to delete this recipe",
        ));
    }

    // Join rows, favorites and cart entries cascade with the recipe
    conn.transaction::<_, ApiError, _>(|conn| {
        diesel::delete(recipes::table.find(id)).execute(conn)?;
        delete_photo(conn, recipe.image_id)?;
        Ok(())
    })?;

    tracing::info!(recipe_id = id, deleted_by = user.id, "recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}
