//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::AuthBackend;
use crate::claims::TokenType;
use crate::error::AuthError;
use crate::jwt::extract_bearer_token;
use crate::types::AuthSession;

/// Authenticated user extractor (access token, any role)
#[derive(Debug)]
pub struct AuthUser(pub AuthSession);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let token = extract_bearer_token(auth_header)?;
        let session = backend.authenticate(&token, Some(TokenType::Access)).await?;

        Ok(AuthUser(session))
    }
}

/// Admin-only extractor.
///
/// Like `AuthUser` but rejects non-admin users with 403 FORBIDDEN.
/// Use this for management endpoints (plan/content mutation, admin
/// listings).
#[derive(Debug)]
pub struct AdminUser(pub AuthSession);

impl<S> FromRequestParts<S> for AdminUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let AuthUser(session) = AuthUser::from_request_parts(parts, state).await?;

        if !session.role.is_admin() {
            return Err(AuthError::AdminRequired);
        }

        Ok(AdminUser(session))
    }
}

/// Refresh-token extractor, used only by the token refresh endpoint.
///
/// Logout accepts either token type; it uses `AnyTokenUser` instead.
#[derive(Debug)]
pub struct RefreshUser(pub AuthSession);

impl<S> FromRequestParts<S> for RefreshUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let token = extract_bearer_token(auth_header)?;
        let session = backend
            .authenticate(&token, Some(TokenType::Refresh))
            .await?;

        Ok(RefreshUser(session))
    }
}

/// Extractor accepting both access and refresh tokens (logout path).
#[derive(Debug)]
pub struct AnyTokenUser(pub AuthSession);

impl<S> FromRequestParts<S> for AnyTokenUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let token = extract_bearer_token(auth_header)?;
        let session = backend.authenticate(&token, None).await?;

        Ok(AnyTokenUser(session))
    }
}
