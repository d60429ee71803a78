//! Route definitions for the billing domain API

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{champions, walk_ins, webhook};
use super::middleware::BillingState;

/// Payment provider webhook route
fn webhook_routes() -> Router<BillingState> {
    Router::new().route("/v1/payments/webhook", post(webhook::payment_webhook))
}

/// Walk-in day pass routes
fn walk_in_routes() -> Router<BillingState> {
    Router::new()
        .route("/v1/walk-ins/initialize", post(walk_ins::initialize_walk_in))
        .route("/v1/walk-ins", get(walk_ins::list_walk_ins))
}

/// Competition registrant routes
fn champion_routes() -> Router<BillingState> {
    Router::new()
        .route(
            "/v1/champions",
            get(champions::list_champions).post(champions::create_champion),
        )
        .route("/v1/champions/{id}", put(champions::update_champion))
        .route(
            "/v1/champions/{id}/initialize",
            post(champions::initialize_champion_payment),
        )
}

/// Create the complete billing domain router
pub fn routes(state: BillingState) -> Router {
    Router::new()
        .merge(webhook_routes())
        .merge(walk_in_routes())
        .merge(champion_routes())
        .with_state(state)
}
