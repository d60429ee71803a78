//! Concrete authentication backend
//!
//! Wraps `PgPool` + `AuthConfig` and owns the auth-specific SQL: the
//! token denylist consulted on every authenticated request and written
//! on logout. Uses runtime `sqlx::query` consistent with the repository
//! layer.

use sqlx::PgPool;
use uuid::Uuid;

use crate::claims::TokenType;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::jwt::{issue_token, validate_token};
use crate::types::{AuthSession, Role, TokenPair};

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    pool: PgPool,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(pool: PgPool, config: AuthConfig) -> Self {
        Self { pool, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Issue an access + refresh token pair at login.
    pub fn issue_token_pair(&self, user_id: Uuid, role: Role) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: issue_token(user_id, role, TokenType::Access, &self.config)?,
            refresh_token: issue_token(user_id, role, TokenType::Refresh, &self.config)?,
        })
    }

    /// Issue a fresh access token from an already-authenticated refresh session.
    pub fn issue_access_token(&self, user_id: Uuid, role: Role) -> Result<String, AuthError> {
        issue_token(user_id, role, TokenType::Access, &self.config)
    }

    /// Validate a bearer token and reject tokens revoked via logout.
    ///
    /// `expected` restricts the accepted token type; `None` accepts both
    /// (logout works with either token).
    pub async fn authenticate(
        &self,
        token: &str,
        expected: Option<TokenType>,
    ) -> Result<AuthSession, AuthError> {
        let claims = validate_token(token, &self.config)?;

        if let Some(expected) = expected {
            if claims.token_type != expected {
                return Err(AuthError::WrongTokenType);
            }
        }

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;

        if self.is_revoked(&claims.jti).await? {
            return Err(AuthError::TokenRevoked);
        }

        Ok(AuthSession {
            user_id,
            role: claims.role,
            jti: claims.jti,
            token_type: claims.token_type,
        })
    }

    /// Check the denylist for a token ID.
    async fn is_revoked(&self, jti: &str) -> Result<bool, AuthError> {
        let found: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM token_denylist WHERE jti = $1")
                .bind(jti)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Failed to check token denylist");
                    AuthError::AuthenticationFailed
                })?;

        Ok(found.is_some())
    }

    /// Record a token ID in the denylist. Idempotent: replaying a logout
    /// for an already-revoked token succeeds.
    pub async fn revoke(&self, jti: &str) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO token_denylist (jti, created_at)
            VALUES ($1, NOW())
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(jti)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to record revoked token");
            AuthError::AuthenticationFailed
        })?;

        Ok(())
    }
}
