use crate::api::error::ApiResult;
use crate::api::query::ApiQuery;
use crate::db::DbPool;
use crate::models::Ingredient;
use crate::schema::ingredients;
use axum::{
    extract::State,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListIngredientsParams {
    /// Case-insensitive name prefix
    pub name: Option<String>,
}

/// ILIKE pattern matching names that start with `prefix`.
fn prefix_pattern(prefix: &str) -> String {
    let escaped = prefix
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("{escaped}%")
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    params(ListIngredientsParams),
    responses(
        (status = 200, description = "Ingredients ordered by name", body = Vec<Ingredient>)
    )
)]
pub async fn list_ingredients(
    State(pool): State<Arc<DbPool>>,
    ApiQuery(params): ApiQuery<ListIngredientsParams>,
) -> ApiResult<Json<Vec<Ingredient>>> {
    let mut conn = pool.get()?;

    let mut query = ingredients::table.into_boxed();
    if let Some(prefix) = params.name.as_deref().filter(|p| !p.is_empty()) {
        query = query.filter(ingredients::name.ilike(prefix_pattern(prefix)));
    }

    let found: Vec<Ingredient> = query
        .order((ingredients::name.asc(), ingredients::id.asc()))
        .select(Ingredient::as_select())
        .load(&mut conn)?;

    Ok(Json(found))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_pattern() {
        assert_eq!(prefix_pattern("сах"), "сах%");
        assert_eq!(prefix_pattern("100%"), "100\\%%");
        assert_eq!(prefix_pattern("a_b"), "a\\_b%");
        assert_eq!(prefix_pattern("back\\slash"), "back\\\\slash%");
    }
}
