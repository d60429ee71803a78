//! Mock Payment Provider Implementation
//!
//! Records every provider call and returns deterministic data, with a
//! programmable failure switch for exercising error paths in tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::{
    PaymentError, PaymentProvider, ProviderCheckout, ProviderCustomer, ProviderSubscription,
};

/// A provider call captured by the mock
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    CreateCustomer {
        email: String,
    },
    InitializeTransaction {
        email: String,
        amount: i64,
        plan_code: Option<String>,
        metadata: serde_json::Value,
    },
    CreateSubscription {
        customer_code: String,
        plan_code: String,
    },
    DisableSubscription {
        code: String,
        token: String,
    },
    EnableSubscription {
        code: String,
        token: String,
    },
}

/// Mock payment provider for testing
#[derive(Debug, Clone)]
pub struct MockPaymentProvider {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    fail_next: Arc<AtomicBool>,
    sequence: Arc<AtomicU64>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_next: Arc::new(AtomicBool::new(false)),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Make the next provider call fail with a rejection
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// All calls recorded so far
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls recorded so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Clear the call log
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: RecordedCall) -> Result<u64, PaymentError> {
        self.calls.lock().unwrap().push(call);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(PaymentError::Rejected(
                "Mock provider rejected the request".to_string(),
            ));
        }
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for MockPaymentProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_customer(
        &self,
        email: &str,
        _first_name: &str,
        _last_name: &str,
        _phone: &str,
    ) -> Result<ProviderCustomer, PaymentError> {
        let seq = self.record(RecordedCall::CreateCustomer {
            email: email.to_string(),
        })?;
        Ok(ProviderCustomer {
            customer_code: format!("CUS_mock{}", seq),
            email: email.to_string(),
        })
    }

    async fn initialize_transaction(
        &self,
        email: &str,
        amount: i64,
        plan_code: Option<&str>,
        metadata: serde_json::Value,
    ) -> Result<ProviderCheckout, PaymentError> {
        let seq = self.record(RecordedCall::InitializeTransaction {
            email: email.to_string(),
            amount,
            plan_code: plan_code.map(str::to_string),
            metadata,
        })?;
        Ok(ProviderCheckout {
            authorization_url: format!("https://checkout.mock.test/{}", seq),
            access_code: format!("acc_mock{}", seq),
            reference: format!("ref_mock{}", seq),
        })
    }

    async fn create_subscription(
        &self,
        customer_code: &str,
        plan_code: &str,
    ) -> Result<ProviderSubscription, PaymentError> {
        let seq = self.record(RecordedCall::CreateSubscription {
            customer_code: customer_code.to_string(),
            plan_code: plan_code.to_string(),
        })?;
        Ok(ProviderSubscription {
            subscription_code: format!("SUB_mock{}", seq),
            email_token: format!("tok_mock{}", seq),
            status: "active".to_string(),
        })
    }

    async fn disable_subscription(&self, code: &str, token: &str) -> Result<(), PaymentError> {
        self.record(RecordedCall::DisableSubscription {
            code: code.to_string(),
            token: token.to_string(),
        })?;
        Ok(())
    }

    async fn enable_subscription(&self, code: &str, token: &str) -> Result<(), PaymentError> {
        self.record(RecordedCall::EnableSubscription {
            code: code.to_string(),
            token: token.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let provider = MockPaymentProvider::new();

        let checkout = provider
            .initialize_transaction(
                "archer@example.com",
                2500000,
                None,
                serde_json::json!({"custom_type": "walkin"}),
            )
            .await
            .unwrap();
        assert!(checkout.authorization_url.starts_with("https://checkout.mock.test/"));

        provider
            .disable_subscription("SUB_abc", "tok_abc")
            .await
            .unwrap();

        let calls = provider.recorded_calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(
            &calls[0],
            RecordedCall::InitializeTransaction { email, amount, .. }
                if email == "archer@example.com" && *amount == 2500000
        ));
        assert_eq!(
            calls[1],
            RecordedCall::DisableSubscription {
                code: "SUB_abc".to_string(),
                token: "tok_abc".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_fail_next_call_fails_once() {
        let provider = MockPaymentProvider::new();
        provider.fail_next_call();

        let first = provider
            .create_customer("archer@example.com", "Robin", "Hood", "123")
            .await;
        assert!(first.is_err());

        let second = provider
            .create_customer("archer@example.com", "Robin", "Hood", "123")
            .await;
        assert!(second.is_ok());
        assert_eq!(provider.call_count(), 2);
    }
}
