//! Shared body of the favorite and shopping cart endpoints.

use super::get::find_recipe;
use super::representation::ShortRecipeResponse;
use crate::api::error::ApiResult;
use crate::api::relations::DbRelations;
use crate::config::Settings;
use diesel::PgConnection;
use foodgram_core::{activate, deactivate, RelationKind};

/// Mark the recipe for `user_id`, returning its short representation.
pub(super) fn add(
    conn: &mut PgConnection,
    kind: RelationKind,
    user_id: i32,
    recipe_id: i32,
    settings: &Settings,
) -> ApiResult<ShortRecipeResponse> {
    let recipe = find_recipe(conn, recipe_id)?;
    activate(&mut DbRelations::new(conn), kind, user_id, recipe_id)?;
    tracing::info!(%kind, user_id, recipe_id, "relation added");
    Ok(ShortRecipeResponse::new(&recipe, settings))
}

pub(super) fn remove(
    conn: &mut PgConnection,
    kind: RelationKind,
    user_id: i32,
    recipe_id: i32,
) -> ApiResult<()> {
    find_recipe(conn, recipe_id)?;
    deactivate(&mut DbRelations::new(conn), kind, user_id, recipe_id)?;
    tracing::info!(%kind, user_id, recipe_id, "relation removed");
    Ok(())
}
