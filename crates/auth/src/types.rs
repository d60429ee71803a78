//! Auth session types
//!
//! Lightweight identity carried by authenticated requests. Handlers needing
//! full `User` data load it from the members domain's repository.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::claims::TokenType;

/// User role for authorization decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
}

impl Role {
    /// Check if this role can perform admin actions
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Member => write!(f, "member"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Identity extracted from a validated, non-revoked token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: Uuid,
    pub role: Role,
    /// Token ID, needed by logout to revoke the presented token
    pub jti: String,
    pub token_type: TokenType,
}

/// Access + refresh token pair issued at login.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Member.is_admin());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Member.to_string(), "member");
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
