use crate::api::users::representation::{followed_authors, UserResponse};
use crate::config::Settings;
use crate::models::{Ingredient, Recipe, Tag, User};
use crate::schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, shopping_lists, tags, users,
};
use diesel::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<Tag>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    /// Absolute image URL
    pub image: String,
    pub text: String,
    /// Minutes
    pub cooking_time: i32,
}

/// Compact form used by favorites, the cart and subscription listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShortRecipeResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl ShortRecipeResponse {
    pub fn new(recipe: &Recipe, settings: &Settings) -> Self {
        ShortRecipeResponse {
            id: recipe.id,
            name: recipe.name.clone(),
            image: settings.photo_url(recipe.image_id),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Which of `recipe_ids` the viewer has favorited.
fn favorited_recipes(
    conn: &mut PgConnection,
    viewer: Option<i32>,
    recipe_ids: &[i32],
) -> QueryResult<HashSet<i32>> {
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };

    let ids: Vec<i32> = favorites::table
        .filter(favorites::user_id.eq(viewer))
        .filter(favorites::recipe_id.eq_any(recipe_ids))
        .select(favorites::recipe_id)
        .load(conn)?;

    Ok(ids.into_iter().collect())
}

/// Which of `recipe_ids` are in the viewer's shopping cart.
fn carted_recipes(
    conn: &mut PgConnection,
    viewer: Option<i32>,
    recipe_ids: &[i32],
) -> QueryResult<HashSet<i32>> {
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };

    let ids: Vec<i32> = shopping_lists::table
        .filter(shopping_lists::user_id.eq(viewer))
        .filter(shopping_lists::recipe_id.eq_any(recipe_ids))
        .select(shopping_lists::recipe_id)
        .load(conn)?;

    Ok(ids.into_iter().collect())
}

/// Build full representations for `recipes`, preserving their order.
///
/// Tags, ingredients, authors and the viewer's flags are each fetched in one
/// query for the whole batch.
pub fn recipe_responses(
    conn: &mut PgConnection,
    recipes: &[Recipe],
    viewer: Option<i32>,
    settings: &Settings,
) -> QueryResult<Vec<RecipeResponse>> {
    if recipes.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();

    let tag_rows: Vec<(i32, Tag)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(&ids))
        .order(tags::name.asc())
        .select((recipe_tags::recipe_id, Tag::as_select()))
        .load(conn)?;

    let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
    for (recipe_id, tag) in tag_rows {
        tags_by_recipe.entry(recipe_id).or_default().push(tag);
    }

    let ingredient_rows: Vec<(i32, Ingredient, i32)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&ids))
        .order(recipe_ingredients::id.asc())
        .select((
            recipe_ingredients::recipe_id,
            Ingredient::as_select(),
            recipe_ingredients::amount,
        ))
        .load(conn)?;

    let mut ingredients_by_recipe: HashMap<i32, Vec<RecipeIngredientResponse>> = HashMap::new();
    for (recipe_id, ingredient, amount) in ingredient_rows {
        ingredients_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(RecipeIngredientResponse {
                id: ingredient.id,
                name: ingredient.name,
                measurement_unit: ingredient.measurement_unit,
                amount,
            });
    }

    let mut author_ids: Vec<i32> = recipes.iter().map(|r| r.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<i32, User> = users::table
        .filter(users::id.eq_any(&author_ids))
        .select(User::as_select())
        .load(conn)?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let followed = followed_authors(conn, viewer, &author_ids)?;
    let favorited = favorited_recipes(conn, viewer, &ids)?;
    let in_cart = carted_recipes(conn, viewer, &ids)?;

    recipes
        .iter()
        .map(|recipe| {
            // Author rows cascade with their recipes, so a miss is a broken invariant
            let author = authors
                .get(&recipe.author_id)
                .ok_or(diesel::result::Error::NotFound)?;

            Ok(RecipeResponse {
                id: recipe.id,
                tags: tags_by_recipe.remove(&recipe.id).unwrap_or_default(),
                author: UserResponse::new(author, followed.contains(&author.id), settings),
                ingredients: ingredients_by_recipe.remove(&recipe.id).unwrap_or_default(),
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                name: recipe.name.clone(),
                image: settings.photo_url(recipe.image_id),
                text: recipe.text.clone(),
                cooking_time: recipe.cooking_time,
            })
        })
        .collect()
}

/// Representation of a single recipe.
pub fn recipe_response(
    conn: &mut PgConnection,
    recipe: &Recipe,
    viewer: Option<i32>,
    settings: &Settings,
) -> QueryResult<RecipeResponse> {
    recipe_responses(conn, std::slice::from_ref(recipe), viewer, settings)?
        .pop()
        .ok_or(diesel::result::Error::NotFound)
}
