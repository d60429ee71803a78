//! JWT issuing, validation, and token extraction helpers

use axum::http::HeaderValue;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::claims::{TokenClaims, TokenType};
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::types::Role;

/// Issue a token of the given type for a user.
pub(crate) fn issue_token(
    user_id: Uuid,
    role: Role,
    token_type: TokenType,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = chrono::Utc::now().timestamp() as u64;
    let ttl = match token_type {
        TokenType::Access => config.access_ttl_secs,
        TokenType::Refresh => config.refresh_ttl_secs,
    };

    let claims = TokenClaims {
        sub: user_id.to_string(),
        role,
        jti: Uuid::new_v4().to_string(),
        token_type,
        iat: now,
        exp: now + ttl,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());
    encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|e| {
        tracing::error!(error = %e, "Failed to sign token");
        AuthError::AuthenticationFailed
    })
}

/// Validate a Longbow-issued token and return its claims.
pub(crate) fn validate_token(token: &str, config: &AuthConfig) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<TokenClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    if let Some(token) = header_str.strip_prefix("Bearer ") {
        Ok(token.to_string())
    } else {
        Err(AuthError::InvalidAuthorizationFormat)
    }
}
