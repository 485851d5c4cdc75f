use super::representation::{subscription_responses, SubscriptionResponse};
use crate::api::error::ApiResult;
use crate::api::pagination::{PageParams, PaginationMetadata};
use crate::api::ErrorResponse;
use crate::api::query::ApiQuery;
use crate::auth::AuthUser;
use crate::config::Settings;
use crate::db::DbPool;
use crate::models::User;
use crate::raw_sql::count_over;
use crate::schema::{subscriptions, users};
use axum::{
    extract::State,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SubscriptionsParams {
    /// 1-based page number (default: 1)
    pub page: Option<i64>,
    /// Authors per page (default: 6, max: 100)
    pub limit: Option<i64>,
    /// Maximum number of recipes shown per author (default: all)
    pub recipes_limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListSubscriptionsResponse {
    pub results: Vec<SubscriptionResponse>,
    pub pagination: PaginationMetadata,
}

#[utoipa::path(
    get,
    path = "/api/users/subscriptions",
    tag = "users",
    params(SubscriptionsParams),
    responses(
        (status = 200, description = "Followed authors with recipe previews", body = ListSubscriptionsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_subscriptions(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    ApiQuery(params): ApiQuery<SubscriptionsParams>,
) -> ApiResult<Json<ListSubscriptionsResponse>> {
    let page = PageParams {
        page: params.page,
        limit: params.limit,
    }
    .resolve()?;
    let mut conn = pool.get()?;

    let rows: Vec<(User, i64)> = users::table
        .filter(
            users::id.eq_any(
                subscriptions::table
                    .filter(subscriptions::user_id.eq(user.id))
                    .select(subscriptions::author_id),
            ),
        )
        .order((users::username.asc(), users::id.asc()))
        .select((User::as_select(), count_over()))
        .limit(page.limit)
        .offset(page.offset)
        .load(&mut conn)?;

    let total = rows.first().map(|(_, total)| *total).unwrap_or(0);
    let authors: Vec<User> = rows.into_iter().map(|(author, _)| author).collect();
    let results = subscription_responses(
        &mut conn,
        &authors,
        Some(user.id),
        params.recipes_limit,
        &settings,
    )?;

    Ok(Json(ListSubscriptionsResponse {
        results,
        pagination: PaginationMetadata::new(page, total),
    }))
}
