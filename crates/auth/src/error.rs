//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing token")]
    MissingAuthorization,
    #[error("Invalid token header")]
    InvalidAuthorizationFormat,
    #[error("Invalid or expired token")]
    InvalidToken,
    /// Token's jti is in the denylist (user logged out)
    #[error("Token has been revoked")]
    TokenRevoked,
    /// Access token presented where a refresh token is required, or vice versa
    #[error("Wrong token type")]
    WrongTokenType,
    #[error("Invalid user ID in token")]
    InvalidUserId,
    /// Role "admin" required for management endpoints
    #[error("Admin access required")]
    AdminRequired,
    #[error("Authentication failed")]
    AuthenticationFailed,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingAuthorization => (StatusCode::UNAUTHORIZED, "Missing token"),
            AuthError::InvalidAuthorizationFormat => {
                (StatusCode::UNAUTHORIZED, "Invalid token header")
            }
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            AuthError::TokenRevoked => (StatusCode::UNAUTHORIZED, "Token has been revoked"),
            AuthError::WrongTokenType => (StatusCode::UNAUTHORIZED, "Wrong token type"),
            AuthError::InvalidUserId => (StatusCode::UNAUTHORIZED, "Invalid user ID in token"),
            AuthError::AdminRequired => (StatusCode::FORBIDDEN, "Admin access required"),
            AuthError::AuthenticationFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Authentication failed")
            }
        };

        let body = Json(json!({
            "error": true,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        let cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::MissingAuthorization, StatusCode::UNAUTHORIZED),
            (
                AuthError::InvalidAuthorizationFormat,
                StatusCode::UNAUTHORIZED,
            ),
            (AuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AuthError::TokenRevoked, StatusCode::UNAUTHORIZED),
            (AuthError::WrongTokenType, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidUserId, StatusCode::UNAUTHORIZED),
            (AuthError::AdminRequired, StatusCode::FORBIDDEN),
            (
                AuthError::AuthenticationFailed,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }
}
