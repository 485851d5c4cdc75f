use crate::api::error::ApiResult;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::schema::{ingredients, recipe_ingredients, shopping_lists};
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use diesel::prelude::*;
use foodgram_core::{aggregate, render_shopping_list, PdfFonts, ShoppingListLine};
use std::sync::Arc;

pub const FILENAME: &str = "shopping_list.pdf";

/// Aggregated ingredient totals across every recipe in the user's cart.
pub fn shopping_list_for(conn: &mut PgConnection, user_id: i32) -> QueryResult<Vec<ShoppingListLine>> {
    let rows: Vec<(String, String, i32)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(
            recipe_ingredients::recipe_id.eq_any(
                shopping_lists::table
                    .filter(shopping_lists::user_id.eq(user_id))
                    .select(shopping_lists::recipe_id),
            ),
        )
        .select((
            ingredients::name,
            ingredients::measurement_unit,
            recipe_ingredients::amount,
        ))
        .load(conn)?;

    Ok(aggregate(rows))
}

#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart",
    tag = "recipes",
    responses(
        (status = 200, description = "Shopping list as PDF", content_type = "application/pdf"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn download_shopping_cart(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(fonts): State<Arc<PdfFonts>>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = pool.get()?;
    let lines = shopping_list_for(&mut conn, user.id)?;
    let pdf = render_shopping_list(&lines, &fonts)?;

    tracing::info!(
        user_id = user.id,
        lines = lines.len(),
        bytes = pdf.len(),
        "shopping list rendered"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{FILENAME}\""),
            ),
        ],
        pdf,
    ))
}
