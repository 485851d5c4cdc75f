use super::create::{
    check_ingredients_exist, check_tags_exist, replace_ingredients, replace_tags,
    IngredientAmountRequest,
};
use super::get::find_recipe;
use super::representation::{recipe_response, RecipeResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::photos::store::{delete_photo, store_photo};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::config::Settings;
use crate::db::DbPool;
use crate::models::{Recipe, RecipeChanges};
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    Json,
};
use diesel::prelude::*;
use foodgram_core::validation::{
    require_text, validate_cooking_time, validate_ingredients, validate_tag_ids,
    RECIPE_NAME_MAX_LENGTH,
};
use foodgram_core::{decode_data_uri, IngredientAmount};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Every field is optional; ingredients and tags are replaced only when present.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    pub tags: Option<Vec<i32>>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRecipeRequest>,
) -> ApiResult<Json<RecipeResponse>> {
    let name = request
        .name
        .as_deref()
        .map(|n| require_text("name", n, RECIPE_NAME_MAX_LENGTH))
        .transpose()?;
    let text = request
        .text
        .as_deref()
        .map(|t| require_text("text", t, usize::MAX))
        .transpose()?;
    if let Some(minutes) = request.cooking_time {
        validate_cooking_time(minutes)?;
    }
    let items: Option<Vec<IngredientAmount>> = request
        .ingredients
        .as_ref()
        .map(|list| list.iter().map(|&i| i.into()).collect());
    if let Some(ref items) = items {
        validate_ingredients(items)?;
    }
    if let Some(ref tag_ids) = request.tags {
        validate_tag_ids(tag_ids)?;
    }
    let image = request.image.as_deref().map(decode_data_uri).transpose()?;

    let mut conn = pool.get()?;

    let existing = find_recipe(&mut conn, id)?;

    if !user.can_modify(existing.author_id) {
        return Err(ApiError::Forbidden(
            "You do not have permission to edit this recipe",
        ));
    }

    let recipe: Recipe = conn.transaction::<_, ApiError, _>(|conn| {
        let image_id = image
            .as_ref()
            .map(|img| store_photo(conn, existing.author_id, img))
            .transpose()?;

        let changes = RecipeChanges {
            name,
            image_id,
            text,
            cooking_time: request.cooking_time,
        };

        let recipe = if changes.is_empty() {
            existing.clone()
        } else {
            diesel::update(recipes::table.find(id))
                .set(&changes)
                .returning(Recipe::as_returning())
                .get_result(conn)?
        };

        if let Some(ref items) = items {
            check_ingredients_exist(conn, items)?;
            replace_ingredients(conn, id, items)?;
        }
        if let Some(ref tag_ids) = request.tags {
            check_tags_exist(conn, tag_ids)?;
            replace_tags(conn, id, tag_ids)?;
        }

        if image_id.is_some() {
            delete_photo(conn, existing.image_id)?;
        }

        Ok(recipe)
    })?;

    tracing::info!(recipe_id = recipe.id, editor_id = user.id, "recipe updated");

    Ok(Json(recipe_response(
        &mut conn,
        &recipe,
        Some(user.id),
        &settings,
    )?))
}
