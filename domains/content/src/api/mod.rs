//! API layer for the content domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::ContentState;
pub use routes::routes;
