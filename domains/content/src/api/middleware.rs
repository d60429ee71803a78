//! Content domain state and auth backend integration

use std::sync::Arc;

use axum::extract::FromRef;

use longbow_auth::AuthBackend;
use longbow_email::EmailService;

use crate::repository::ContentRepositories;

/// Application state for the content domain
#[derive(Clone)]
pub struct ContentState {
    pub repos: ContentRepositories,
    pub auth: AuthBackend,
    pub email: Arc<dyn EmailService>,
}

impl FromRef<ContentState> for AuthBackend {
    fn from_ref(state: &ContentState) -> Self {
        state.auth.clone()
    }
}
