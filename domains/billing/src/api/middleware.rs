//! Billing domain state and auth backend integration

use std::sync::Arc;

use axum::extract::FromRef;

use longbow_auth::AuthBackend;
use longbow_members::MembersRepositories;
use longbow_paystack::PaymentProvider;

use crate::domain::dispatcher::PaymentEventDispatcher;
use crate::repository::BillingRepositories;

/// Application state for the billing domain
#[derive(Clone)]
pub struct BillingState {
    pub members: MembersRepositories,
    pub billing: BillingRepositories,
    pub dispatcher: PaymentEventDispatcher,
    pub payments: Arc<dyn PaymentProvider>,
    pub auth: AuthBackend,
    /// Paystack secret used to verify webhook signatures.
    pub webhook_secret: String,
}

impl FromRef<BillingState> for AuthBackend {
    fn from_ref(state: &BillingState) -> Self {
        state.auth.clone()
    }
}
