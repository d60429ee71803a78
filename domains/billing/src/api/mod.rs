//! API layer for the billing domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::BillingState;
pub use routes::routes;
