//! Members domain: users, registration funnel, plans, subscriptions, payment history

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::state::{
    RegistrationEvent, RegistrationFunnel, SubscriptionEvent, SubscriptionStateMachine,
};
// Re-export repository types
pub use repository::{
    append_payment_history_tx, update_subscription_from_invoice_tx, MembersRepositories,
    PaymentHistoryRepository, PlanRepository, PlanUpdateOutcome, SubscriptionRepository,
    SubscriptionWithUser, UserRepository,
};

// Re-export API types
pub use api::routes;
pub use api::MembersState;
