//! JWT claims types

use serde::{Deserialize, Serialize};

use crate::types::Role;

/// Discriminates access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims carried by Longbow access and refresh tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// User role for authorization decisions
    pub role: Role,
    /// Unique token ID, recorded in the denylist on logout
    pub jti: String,
    /// Access or refresh
    pub token_type: TokenType,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_roundtrip() {
        let claims = TokenClaims {
            sub: uuid::Uuid::new_v4().to_string(),
            role: Role::Admin,
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: TokenType::Access,
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        };

        let json = serde_json::to_string(&claims).unwrap();
        let parsed: TokenClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.sub, claims.sub);
        assert_eq!(parsed.role, Role::Admin);
        assert_eq!(parsed.token_type, TokenType::Access);
    }

    #[test]
    fn test_token_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TokenType::Refresh).unwrap(),
            "\"refresh\""
        );
    }
}
