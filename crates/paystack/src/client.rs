//! Paystack REST client
//!
//! Thin wrapper over the Paystack HTTP API. Every response arrives in the
//! provider's envelope `{status, message, data}`; a `status` of false means
//! the request was rejected and `message` carries the reason.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{
    PaymentError, PaymentProvider, PaystackConfig, ProviderCheckout, ProviderCustomer,
    ProviderSubscription,
};

/// Paystack API response envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: bool,
    message: String,
    data: Option<T>,
}

#[derive(Debug, Serialize)]
struct CreateCustomerBody<'a> {
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    phone: &'a str,
}

#[derive(Debug, Serialize)]
struct InitializeTransactionBody<'a> {
    email: &'a str,
    /// Amount in kobo, serialized as a string per the API contract
    amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<&'a str>,
    metadata: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct CreateSubscriptionBody<'a> {
    customer: &'a str,
    plan: &'a str,
}

#[derive(Debug, Serialize)]
struct SubscriptionToggleBody<'a> {
    code: &'a str,
    token: &'a str,
}

/// HTTP client for the Paystack API
pub struct PaystackClient {
    client: reqwest::Client,
    config: PaystackConfig,
}

impl PaystackClient {
    pub fn new(config: PaystackConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PaymentError> {
        let url = format!("{}{}", self.config.base_url, path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .json(body)
            .send()
            .await
            .map_err(|e| PaymentError::Request(format!("POST {} failed: {}", path, e)))?;

        let status = response.status();
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| PaymentError::Request(format!("POST {} returned invalid body: {}", path, e)))?;

        if !envelope.status {
            tracing::warn!(path, %status, message = %envelope.message, "Paystack rejected request");
            return Err(PaymentError::Rejected(envelope.message));
        }

        envelope
            .data
            .ok_or_else(|| PaymentError::Request(format!("POST {} returned no data", path)))
    }

    /// POST where the success envelope carries no payload we care about
    async fn post_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<(), PaymentError> {
        let _: serde_json::Value = self.post(path, body).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl PaymentProvider for PaystackClient {
    async fn create_customer(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        phone: &str,
    ) -> Result<ProviderCustomer, PaymentError> {
        tracing::debug!(email, "Creating Paystack customer");
        self.post(
            "/customer",
            &CreateCustomerBody {
                email,
                first_name,
                last_name,
                phone,
            },
        )
        .await
    }

    async fn initialize_transaction(
        &self,
        email: &str,
        amount: i64,
        plan_code: Option<&str>,
        metadata: serde_json::Value,
    ) -> Result<ProviderCheckout, PaymentError> {
        tracing::debug!(email, amount, ?plan_code, "Initializing Paystack transaction");
        self.post(
            "/transaction/initialize",
            &InitializeTransactionBody {
                email,
                amount: amount.to_string(),
                plan: plan_code,
                metadata,
            },
        )
        .await
    }

    async fn create_subscription(
        &self,
        customer_code: &str,
        plan_code: &str,
    ) -> Result<ProviderSubscription, PaymentError> {
        tracing::debug!(customer_code, plan_code, "Creating Paystack subscription");
        self.post(
            "/subscription",
            &CreateSubscriptionBody {
                customer: customer_code,
                plan: plan_code,
            },
        )
        .await
    }

    async fn disable_subscription(&self, code: &str, token: &str) -> Result<(), PaymentError> {
        tracing::debug!(code, "Disabling Paystack subscription");
        self.post_ack("/subscription/disable", &SubscriptionToggleBody { code, token })
            .await
    }

    async fn enable_subscription(&self, code: &str, token: &str) -> Result<(), PaymentError> {
        tracing::debug!(code, "Enabling Paystack subscription");
        self.post_ack("/subscription/enable", &SubscriptionToggleBody { code, token })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_body_serializes_amount_as_string() {
        let body = InitializeTransactionBody {
            email: "archer@example.com",
            amount: 2500000.to_string(),
            plan: None,
            metadata: serde_json::json!({"custom_type": "walkin"}),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["amount"], "2500000");
        assert!(json.get("plan").is_none());
        assert_eq!(json["metadata"]["custom_type"], "walkin");
    }

    #[test]
    fn test_envelope_rejection_parsing() {
        let raw = r#"{"status":false,"message":"Invalid key","data":null}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert!(!envelope.status);
        assert_eq!(envelope.message, "Invalid key");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_subscription_data_parsing() {
        let raw = r#"{
            "status": true,
            "message": "Subscription successfully created",
            "data": {
                "subscription_code": "SUB_vsyqdmlzble3uii",
                "email_token": "d7gofp6yppn3qz7",
                "status": "active"
            }
        }"#;
        let envelope: Envelope<ProviderSubscription> = serde_json::from_str(raw).unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.subscription_code, "SUB_vsyqdmlzble3uii");
        assert_eq!(data.email_token, "d7gofp6yppn3qz7");
        assert_eq!(data.status, "active");
    }
}
