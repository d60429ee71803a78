//! Route definitions for the members domain API

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use super::handlers::{auth, history, plans, subscriptions, users};
use super::middleware::MembersState;

/// Auth and registration funnel routes
fn auth_routes() -> Router<MembersState> {
    Router::new()
        .route("/v1/auth/register", post(auth::register))
        .route(
            "/v1/auth/register/acknowledgment/{user_id}",
            put(auth::acknowledgment),
        )
        .route("/v1/auth/register/conduct/{user_id}", put(auth::conduct))
        .route("/v1/auth/register/subscribe/{user_id}", put(auth::subscribe))
        .route("/v1/auth/login", post(auth::login))
        .route("/v1/auth/refresh", get(auth::refresh))
        .route("/v1/auth/logout", get(auth::logout))
}

/// Account and member profile routes
fn account_routes() -> Router<MembersState> {
    Router::new()
        .route("/v1/account", get(users::get_account))
        .route("/v1/users", get(users::list_users))
        .route("/v1/users/{id}", patch(users::update_user))
}

/// Plan management routes
fn plan_routes() -> Router<MembersState> {
    Router::new()
        .route("/v1/plans", get(plans::list_plans).post(plans::create_plan))
        .route(
            "/v1/plans/{id}",
            get(plans::get_plan)
                .patch(plans::update_plan)
                .delete(plans::delete_plan),
        )
}

/// Subscription routes
fn subscription_routes() -> Router<MembersState> {
    Router::new()
        .route("/v1/subscriptions", get(subscriptions::list_subscriptions))
        .route(
            "/v1/subscriptions/stats",
            get(subscriptions::subscription_stats),
        )
        .route(
            "/v1/subscriptions/upgrade",
            post(subscriptions::upgrade_subscription),
        )
}

/// Payment history routes
fn history_routes() -> Router<MembersState> {
    Router::new()
        .route("/v1/history", get(history::list_history))
        .route("/v1/history/{user_id}", get(history::list_user_history))
}

/// Create the complete members domain router
pub fn routes(state: MembersState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(plan_routes())
        .merge(subscription_routes())
        .merge(history_routes())
        .with_state(state)
}
