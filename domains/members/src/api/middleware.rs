//! Members domain state and auth backend integration

use crate::MembersRepositories;
use axum::extract::FromRef;
use longbow_auth::AuthBackend;
use longbow_paystack::PaymentProvider;
use std::sync::Arc;

/// Application state for the members domain
#[derive(Clone)]
pub struct MembersState {
    pub repos: MembersRepositories,
    pub auth: AuthBackend,
    pub payments: Arc<dyn PaymentProvider>,
}

impl FromRef<MembersState> for AuthBackend {
    fn from_ref(state: &MembersState) -> Self {
        state.auth.clone()
    }
}
