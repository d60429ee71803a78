//! Authentication middleware for the Longbow API
//!
//! Provides JWT issue/validation with a logout denylist, and axum extractors
//! that work with any domain state implementing `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod error;
mod extractors;
mod jwt;
mod types;

pub use backend::AuthBackend;
pub use claims::{TokenClaims, TokenType};
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{AdminUser, AnyTokenUser, AuthUser, RefreshUser};
pub use types::{AuthSession, Role, TokenPair};
