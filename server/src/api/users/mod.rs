pub mod avatar;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod me;
pub mod representation;
pub mod set_password;
pub mod subscribe;
pub mod subscriptions;
pub mod update;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/users endpoints (mounted at /api/users)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_users).post(create::create_user))
        .route("/me", get(me::get_me))
        .route(
            "/me/avatar",
            get(avatar::get_avatar)
                .put(avatar::set_avatar)
                .patch(avatar::set_avatar)
                .delete(avatar::delete_avatar),
        )
        .route("/set_password", post(set_password::set_password))
        .route("/subscriptions", get(subscriptions::list_subscriptions))
        .route(
            "/{id}",
            get(get::get_user)
                .patch(update::update_user)
                .delete(delete::delete_user),
        )
        .route(
            "/{id}/subscribe",
            post(subscribe::subscribe).delete(subscribe::unsubscribe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_users,
        create::create_user,
        get::get_user,
        update::update_user,
        delete::delete_user,
        me::get_me,
        set_password::set_password,
        avatar::get_avatar,
        avatar::set_avatar,
        avatar::delete_avatar,
        subscribe::subscribe,
        subscribe::unsubscribe,
        subscriptions::list_subscriptions,
    ),
    components(schemas(
        create::CreateUserRequest,
        create::CreateUserResponse,
        update::UpdateUserRequest,
        set_password::SetPasswordRequest,
        avatar::SetAvatarRequest,
        avatar::AvatarResponse,
        list::ListUsersResponse,
        subscriptions::ListSubscriptionsResponse,
        representation::UserResponse,
        representation::SubscriptionResponse,
    ))
)]
pub struct ApiDoc;
