//! Longbow Payment Provider
//!
//! Integration with the Paystack payment platform:
//! - REST client for customers, transactions, and subscription management
//! - Webhook signature verification and origin allowlisting
//! - Programmable mock provider for testing and development
//!
//! Amounts cross this boundary in the provider's minor unit (kobo).

pub mod client;
pub mod mock;
pub mod signature;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Payment configuration error: {0}")]
    Configuration(String),

    #[error("Payment request error: {0}")]
    Request(String),

    #[error("Payment provider rejected the request: {0}")]
    Rejected(String),
}

/// Customer record at the payment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCustomer {
    pub customer_code: String,
    pub email: String,
}

/// Hosted checkout created for a one-off or subscription charge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCheckout {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

/// Subscription record at the payment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSubscription {
    pub subscription_code: String,
    pub email_token: String,
    pub status: String,
}

/// Payment provider configuration
#[derive(Clone)]
pub struct PaystackConfig {
    pub secret_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for PaystackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaystackConfig")
            .field("secret_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PaystackConfig {
    /// Create payment config from environment variables
    pub fn from_env() -> Result<Self, PaymentError> {
        let secret_key = std::env::var("PAYSTACK_SECRET_KEY").map_err(|_| {
            PaymentError::Configuration("PAYSTACK_SECRET_KEY must be set".to_string())
        })?;
        let base_url = std::env::var("PAYSTACK_BASE_URL")
            .unwrap_or_else(|_| "https://api.paystack.co".to_string());

        Ok(Self {
            secret_key,
            base_url,
        })
    }
}

/// Payment provider trait for different implementations
#[async_trait::async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create (or fetch) a customer at the provider for the given member
    async fn create_customer(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        phone: &str,
    ) -> Result<ProviderCustomer, PaymentError>;

    /// Initialize a hosted checkout. Amount is in kobo; metadata travels
    /// through the provider and comes back on the charge webhook.
    async fn initialize_transaction(
        &self,
        email: &str,
        amount: i64,
        plan_code: Option<&str>,
        metadata: serde_json::Value,
    ) -> Result<ProviderCheckout, PaymentError>;

    /// Create a recurring subscription linking a customer to a plan
    async fn create_subscription(
        &self,
        customer_code: &str,
        plan_code: &str,
    ) -> Result<ProviderSubscription, PaymentError>;

    /// Stop a subscription from renewing
    async fn disable_subscription(&self, code: &str, token: &str) -> Result<(), PaymentError>;

    /// Re-enable a previously disabled subscription
    async fn enable_subscription(&self, code: &str, token: &str) -> Result<(), PaymentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_debug_redacts_secret() {
        let config = PaystackConfig {
            secret_key: "sk_test_abc123".to_string(),
            base_url: "https://api.paystack.co".to_string(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk_test_abc123"));
        assert!(rendered.contains("https://api.paystack.co"));
    }

    #[test]
    fn test_checkout_serialization_round_trip() {
        let checkout = ProviderCheckout {
            authorization_url: "https://checkout.paystack.com/abc".to_string(),
            access_code: "abc".to_string(),
            reference: "ref_123".to_string(),
        };

        let json = serde_json::to_string(&checkout).unwrap();
        let deserialized: ProviderCheckout = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.reference, "ref_123");
        assert_eq!(deserialized.access_code, "abc");
    }
}
