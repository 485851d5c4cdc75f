use super::representation::{recipe_response, RecipeResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::photos::store::store_photo;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::config::Settings;
use crate::db::DbPool;
use crate::models::{NewRecipe, NewRecipeIngredient, NewRecipeTag, Recipe};
use crate::schema::{ingredients, recipe_ingredients, recipe_tags, recipes, tags};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use foodgram_core::validation::{
    require_text, validate_cooking_time, validate_ingredients, validate_tag_ids,
    RECIPE_NAME_MAX_LENGTH,
};
use foodgram_core::{decode_data_uri, IngredientAmount, ValidationError};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct IngredientAmountRequest {
    /// Ingredient ID
    pub id: i32,
    pub amount: i32,
}

impl From<IngredientAmountRequest> for IngredientAmount {
    fn from(item: IngredientAmountRequest) -> Self {
        IngredientAmount {
            id: item.id,
            amount: item.amount,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub ingredients: Vec<IngredientAmountRequest>,
    /// Tag IDs
    pub tags: Vec<i32>,
    /// `data:image/<format>;base64,<payload>`
    pub image: String,
    pub name: String,
    pub text: String,
    /// Minutes, at least 1
    pub cooking_time: i32,
}

/// Every listed ingredient must exist.
pub(super) fn check_ingredients_exist(
    conn: &mut PgConnection,
    items: &[IngredientAmount],
) -> ApiResult<()> {
    let ids: Vec<i32> = items.iter().map(|i| i.id).collect();
    let found: HashSet<i32> = ingredients::table
        .filter(ingredients::id.eq_any(&ids))
        .select(ingredients::id)
        .load::<i32>(conn)?
        .into_iter()
        .collect();

    match ids.into_iter().find(|id| !found.contains(id)) {
        Some(missing) => Err(ValidationError::UnknownIngredient(missing).into()),
        None => Ok(()),
    }
}

/// Every listed tag must exist.
pub(super) fn check_tags_exist(conn: &mut PgConnection, ids: &[i32]) -> ApiResult<()> {
    let found: HashSet<i32> = tags::table
        .filter(tags::id.eq_any(ids))
        .select(tags::id)
        .load::<i32>(conn)?
        .into_iter()
        .collect();

    match ids.iter().find(|id| !found.contains(*id)) {
        Some(&missing) => Err(ValidationError::UnknownTag(missing).into()),
        None => Ok(()),
    }
}

/// Replace the recipe's ingredient rows wholesale.
pub(super) fn replace_ingredients(
    conn: &mut PgConnection,
    recipe_id: i32,
    items: &[IngredientAmount],
) -> QueryResult<()> {
    diesel::delete(recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)))
        .execute(conn)?;

    let rows: Vec<NewRecipeIngredient> = items
        .iter()
        .map(|item| NewRecipeIngredient {
            recipe_id,
            ingredient_id: item.id,
            amount: item.amount,
        })
        .collect();

    diesel::insert_into(recipe_ingredients::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

/// Replace the recipe's tag rows wholesale.
pub(super) fn replace_tags(conn: &mut PgConnection, recipe_id: i32, ids: &[i32]) -> QueryResult<()> {
    diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id))).execute(conn)?;

    let rows: Vec<NewRecipeTag> = ids
        .iter()
        .map(|&tag_id| NewRecipeTag { recipe_id, tag_id })
        .collect();

    diesel::insert_into(recipe_tags::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    Json(request): Json<CreateRecipeRequest>,
) -> ApiResult<impl IntoResponse> {
    // Everything that can be checked without the database is checked first
    let name = require_text("name", &request.name, RECIPE_NAME_MAX_LENGTH)?;
    let text = require_text("text", &request.text, usize::MAX)?;
    validate_cooking_time(request.cooking_time)?;
    let items: Vec<IngredientAmount> = request.ingredients.iter().map(|&i| i.into()).collect();
    validate_ingredients(&items)?;
    validate_tag_ids(&request.tags)?;
    let image = decode_data_uri(&request.image)?;

    let mut conn = pool.get()?;

    let recipe: Recipe = conn.transaction::<_, ApiError, _>(|conn| {
        check_ingredients_exist(conn, &items)?;
        check_tags_exist(conn, &request.tags)?;

        let image_id = store_photo(conn, user.id, &image)?;

        let recipe: Recipe = diesel::insert_into(recipes::table)
            .values(NewRecipe {
                author_id: user.id,
                name,
                image_id,
                text,
                cooking_time: request.cooking_time,
            })
            .returning(Recipe::as_returning())
            .get_result(conn)?;

        replace_ingredients(conn, recipe.id, &items)?;
        replace_tags(conn, recipe.id, &request.tags)?;

        Ok(recipe)
    })?;

    tracing::info!(recipe_id = recipe.id, author_id = user.id, "recipe created");

    let response = recipe_response(&mut conn, &recipe, Some(user.id), &settings)?;
    Ok((StatusCode::CREATED, Json(response)))
}
