use super::get::find_user;
use super::representation::{subscription_responses, SubscriptionResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::relations::DbRelations;
use crate::api::ErrorResponse;
use crate::api::query::ApiQuery;
use crate::auth::AuthUser;
use crate::config::Settings;
use crate::db::DbPool;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use foodgram_core::{activate, deactivate, RelationKind};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RecipesLimitParams {
    /// Maximum number of recipes shown per author (default: all)
    pub recipes_limit: Option<usize>,
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(
        ("id" = i32, Path, description = "Author ID"),
        RecipesLimitParams
    ),
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionResponse),
        (status = 400, description = "Already subscribed or subscribing to yourself", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn subscribe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(settings): State<Arc<Settings>>,
    Path(id): Path<i32>,
    ApiQuery(params): ApiQuery<RecipesLimitParams>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = pool.get()?;
    let author = find_user(&mut conn, id)?;

    activate(
        &mut DbRelations::new(&mut conn),
        RelationKind::Subscription,
        user.id,
        author.id,
    )?;
    tracing::info!(user_id = user.id, author_id = author.id, "subscribed");

    let response = subscription_responses(
        &mut conn,
        std::slice::from_ref(&author),
        Some(user.id),
        params.recipes_limit,
        &settings,
    )?
    .pop()
    .ok_or_else(|| ApiError::internal("subscription representation missing"))?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 400, description = "Not subscribed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn unsubscribe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let mut conn = pool.get()?;
    let author = find_user(&mut conn, id)?;

    deactivate(
        &mut DbRelations::new(&mut conn),
        RelationKind::Subscription,
        user.id,
        author.id,
    )?;
    tracing::info!(user_id = user.id, author_id = author.id, "unsubscribed");

    Ok(StatusCode::NO_CONTENT)
}
