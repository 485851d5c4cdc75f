use super::representation::{user_responses, UserResponse};
use crate::api::error::ApiResult;
use crate::api::pagination::{PageParams, PaginationMetadata};
use crate::api::ErrorResponse;
use crate::api::query::ApiQuery;
use crate::auth::MaybeAuthUser;
use crate::config::Settings;
use crate::db::DbPool;
use crate::models::User;
use crate::raw_sql::count_over;
use crate::schema::users;
use axum::{
    extract::State,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListUsersResponse {
    pub results: Vec<UserResponse>,
    pub pagination: PaginationMetadata,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(PageParams),
    responses(
        (status = 200, description = "Users, newest first", body = ListUsersResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse)
    ),
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    viewer: MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<ListUsersResponse>> {
    let page = params.resolve()?;
    let mut conn = pool.get()?;

    let rows: Vec<(User, i64)> = users::table
        .order((users::created_at.desc(), users::id.desc()))
        .select((User::as_select(), count_over()))
        .limit(page.limit)
        .offset(page.offset)
        .load(&mut conn)?;

    let total = rows.first().map(|(_, total)| *total).unwrap_or(0);
    let found: Vec<User> = rows.into_iter().map(|(user, _)| user).collect();
    let results = user_responses(&mut conn, &found, viewer.id(), &settings)?;

    Ok(Json(ListUsersResponse {
        results,
        pagination: PaginationMetadata::new(page, total),
    }))
}
