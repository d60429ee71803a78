//! Route definitions for the content domain API

use axum::{routing::get, Router};

use super::handlers::{archer_ranks, contact, records, team_members};
use super::middleware::ContentState;

/// Team member routes
fn team_routes() -> Router<ContentState> {
    Router::new()
        .route(
            "/v1/teams",
            get(team_members::list_team_members).post(team_members::create_team_member),
        )
        .route(
            "/v1/teams/{id}",
            get(team_members::get_team_member)
                .patch(team_members::update_team_member)
                .delete(team_members::delete_team_member),
        )
}

/// Competition record routes
fn record_routes() -> Router<ContentState> {
    Router::new()
        .route(
            "/v1/records",
            get(records::list_records).post(records::create_record),
        )
        .route(
            "/v1/records/{id}",
            get(records::get_record)
                .patch(records::update_record)
                .delete(records::delete_record),
        )
}

/// Archer leaderboard routes
fn rank_routes() -> Router<ContentState> {
    Router::new()
        .route(
            "/v1/ranks",
            get(archer_ranks::list_archer_ranks).post(archer_ranks::create_archer_rank),
        )
        .route(
            "/v1/ranks/{id}",
            get(archer_ranks::get_archer_rank)
                .patch(archer_ranks::update_archer_rank)
                .delete(archer_ranks::delete_archer_rank),
        )
}

/// Contact form routes
fn contact_routes() -> Router<ContentState> {
    Router::new().route(
        "/v1/contact",
        get(contact::list_contact_messages).post(contact::send_contact_message),
    )
}

/// Create the complete content domain router
pub fn routes(state: ContentState) -> Router {
    Router::new()
        .merge(team_routes())
        .merge(record_routes())
        .merge(rank_routes())
        .merge(contact_routes())
        .with_state(state)
}
