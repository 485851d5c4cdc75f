use crate::api::recipes::representation::ShortRecipeResponse;
use crate::config::Settings;
use crate::models::{Recipe, User};
use crate::schema::{recipes, subscriptions};
use diesel::dsl::count_star;
use diesel::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the requesting user follows this user (false for anonymous callers)
    pub is_subscribed: bool,
    /// Absolute avatar URL, if one is set
    pub avatar: Option<String>,
}

impl UserResponse {
    pub fn new(user: &User, is_subscribed: bool, settings: &Settings) -> Self {
        UserResponse {
            email: user.email.clone(),
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_subscribed,
            avatar: user.avatar_id.map(|id| settings.photo_url(id)),
        }
    }
}

/// Which of `author_ids` the viewer follows.
pub fn followed_authors(
    conn: &mut PgConnection,
    viewer: Option<i32>,
    author_ids: &[i32],
) -> QueryResult<HashSet<i32>> {
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };
    if author_ids.is_empty() {
        return Ok(HashSet::new());
    }

    let ids: Vec<i32> = subscriptions::table
        .filter(subscriptions::user_id.eq(viewer))
        .filter(subscriptions::author_id.eq_any(author_ids))
        .select(subscriptions::author_id)
        .load(conn)?;

    Ok(ids.into_iter().collect())
}

/// Build representations for `users` as seen by `viewer`.
pub fn user_responses(
    conn: &mut PgConnection,
    users: &[User],
    viewer: Option<i32>,
    settings: &Settings,
) -> QueryResult<Vec<UserResponse>> {
    let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
    let followed = followed_authors(conn, viewer, &ids)?;

    Ok(users
        .iter()
        .map(|u| UserResponse::new(u, followed.contains(&u.id), settings))
        .collect())
}

/// A followed author with a preview of their recipes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<ShortRecipeResponse>,
    /// Total number of recipes by this author
    pub recipes_count: i64,
}

/// Build subscription representations for `authors`, showing at most
/// `recipes_limit` of each author's newest recipes.
pub fn subscription_responses(
    conn: &mut PgConnection,
    authors: &[User],
    viewer: Option<i32>,
    recipes_limit: Option<usize>,
    settings: &Settings,
) -> QueryResult<Vec<SubscriptionResponse>> {
    if authors.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = authors.iter().map(|u| u.id).collect();
    let followed = followed_authors(conn, viewer, &ids)?;

    let counts: HashMap<i32, i64> = recipes::table
        .filter(recipes::author_id.eq_any(&ids))
        .group_by(recipes::author_id)
        .select((recipes::author_id, count_star()))
        .load::<(i32, i64)>(conn)?
        .into_iter()
        .collect();

    let mut by_author: HashMap<i32, Vec<ShortRecipeResponse>> = HashMap::new();
    if recipes_limit != Some(0) {
        let all: Vec<Recipe> = recipes::table
            .filter(recipes::author_id.eq_any(&ids))
            .order((recipes::pub_date.desc(), recipes::id.desc()))
            .select(Recipe::as_select())
            .load(conn)?;

        for recipe in &all {
            let list = by_author.entry(recipe.author_id).or_default();
            if recipes_limit.map_or(true, |limit| list.len() < limit) {
                list.push(ShortRecipeResponse::new(recipe, settings));
            }
        }
    }

    Ok(authors
        .iter()
        .map(|author| SubscriptionResponse {
            user: UserResponse::new(author, followed.contains(&author.id), settings),
            recipes: by_author.remove(&author.id).unwrap_or_default(),
            recipes_count: counts.get(&author.id).copied().unwrap_or(0),
        })
        .collect())
}
