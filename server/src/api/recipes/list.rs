use super::representation::{recipe_responses, RecipeResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::pagination::{PageParams, PaginationMetadata};
use crate::api::query::ApiQuery;
use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::config::Settings;
use crate::db::DbPool;
use crate::models::Recipe;
use crate::raw_sql::count_over;
use crate::schema::{favorites, recipe_tags, recipes, shopping_lists, tags};
use axum::{
    extract::State,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

/// Query parameters of the recipe listing.
///
/// Parsed from raw pairs rather than through serde because `tags` repeats.
#[derive(Debug, Default, PartialEq, IntoParams)]
pub struct ListRecipesParams {
    /// Tag slug; repeat to match recipes having any of the tags
    pub tags: Option<Vec<String>>,
    /// Author user ID
    pub author: Option<i32>,
    /// `1`/`true` to only list the caller's favorites
    pub is_favorited: Option<bool>,
    /// `1`/`true` to only list recipes in the caller's shopping cart
    pub is_in_shopping_cart: Option<bool>,
    /// 1-based page number (default: 1)
    pub page: Option<i64>,
    /// Items per page (default: 6, max: 100)
    pub limit: Option<i64>,
}

fn parse_flag(name: &str, value: &str) -> ApiResult<bool> {
    match value {
        "1" | "true" => Ok(true),
        "" | "0" | "false" => Ok(false),
        _ => Err(ApiError::BadRequest(format!(
            "{name} must be one of 0, 1, true, false"
        ))),
    }
}

fn parse_integer<T: std::str::FromStr>(name: &str, value: &str) -> ApiResult<T> {
    value
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("{name} must be an integer")))
}

fn parse_params(pairs: Vec<(String, String)>) -> ApiResult<ListRecipesParams> {
    let mut params = ListRecipesParams::default();

    for (key, value) in pairs {
        match key.as_str() {
            "tags" => {
                if !value.is_empty() {
                    params.tags.get_or_insert_with(Vec::new).push(value);
                }
            }
            "author" => params.author = Some(parse_integer("author", &value)?),
            "is_favorited" => params.is_favorited = Some(parse_flag("is_favorited", &value)?),
            "is_in_shopping_cart" => {
                params.is_in_shopping_cart = Some(parse_flag("is_in_shopping_cart", &value)?)
            }
            "page" => params.page = Some(parse_integer("page", &value)?),
            "limit" => params.limit = Some(parse_integer("limit", &value)?),
            // Unknown parameters are ignored
            _ => {}
        }
    }

    Ok(params)
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub results: Vec<RecipeResponse>,
    pub pagination: PaginationMetadata,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Recipes, newest first", body = ListRecipesResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse)
    ),
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    viewer: MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    ApiQuery(pairs): ApiQuery<Vec<(String, String)>>,
) -> ApiResult<Json<ListRecipesResponse>> {
    let params = parse_params(pairs)?;
    let page = PageParams {
        page: params.page,
        limit: params.limit,
    }
    .resolve()?;
    let is_favorited = params.is_favorited.unwrap_or(false);
    let is_in_shopping_cart = params.is_in_shopping_cart.unwrap_or(false);
    let viewer_id = viewer.id();

    // Anonymous callers have no favorites or cart
    if viewer_id.is_none() && (is_favorited || is_in_shopping_cart) {
        return Ok(Json(ListRecipesResponse {
            results: Vec::new(),
            pagination: PaginationMetadata::new(page, 0),
        }));
    }

    let mut conn = pool.get()?;

    let mut query = recipes::table.into_boxed();

    if let Some(slugs) = params.tags {
        query = query.filter(
            recipes::id.eq_any(
                recipe_tags::table
                    .inner_join(tags::table)
                    .filter(tags::slug.eq_any(slugs))
                    .select(recipe_tags::recipe_id),
            ),
        );
    }

    if let Some(author) = params.author {
        query = query.filter(recipes::author_id.eq(author));
    }

    if let Some(viewer_id) = viewer_id {
        if is_favorited {
            query = query.filter(
                recipes::id.eq_any(
                    favorites::table
                        .filter(favorites::user_id.eq(viewer_id))
                        .select(favorites::recipe_id),
                ),
            );
        }
        if is_in_shopping_cart {
            query = query.filter(
                recipes::id.eq_any(
                    shopping_lists::table
                        .filter(shopping_lists::user_id.eq(viewer_id))
                        .select(shopping_lists::recipe_id),
                ),
            );
        }
    }

    // COUNT(*) OVER() carries the total across all matching rows
    let rows: Vec<(Recipe, i64)> = query
        .order((recipes::pub_date.desc(), recipes::id.desc()))
        .select((Recipe::as_select(), count_over()))
        .limit(page.limit)
        .offset(page.offset)
        .load(&mut conn)?;

    let total = rows.first().map(|(_, total)| *total).unwrap_or(0);
    let recipes: Vec<Recipe> = rows.into_iter().map(|(recipe, _)| recipe).collect();
    let results = recipe_responses(&mut conn, &recipes, viewer_id, &settings)?;

    Ok(Json(ListRecipesResponse {
        results,
        pagination: PaginationMetadata::new(page, total),
    }))
}
