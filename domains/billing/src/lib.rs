//! Billing domain for Longbow
//!
//! Owns the payment-provider webhook dispatcher and the two paid
//! registrations that are not memberships: walk-in day passes (capped
//! per day) and competition entries.

pub mod api;
pub mod domain;
pub mod repository;

pub use api::{routes, BillingState};
pub use domain::dispatcher::{PaymentEventDispatcher, WebhookOutcome};
pub use domain::entities::{
    competition_entry_fee, ChampionUser, PaymentStatus, WalkIn, MAX_WALK_INS_PER_DAY,
};
pub use domain::events::WebhookEnvelope;
pub use repository::{BillingRepositories, ChampionUserRepository, ChampionUserUpdate, WalkInRepository};
