//! Authentication configuration

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Access token lifetime in seconds (default 1 hour)
    pub access_ttl_secs: u64,
    /// Refresh token lifetime in seconds (default 30 days)
    pub refresh_ttl_secs: u64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_ttl_secs: 60 * 60,
            refresh_ttl_secs: 60 * 60 * 24 * 30,
        }
    }
}
