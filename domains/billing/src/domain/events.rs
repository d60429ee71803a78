//! Typed webhook payloads
//!
//! Mirrors the slices of Paystack's event bodies the dispatcher actually
//! reads. Unknown fields are ignored so payload additions at the provider
//! do not break parsing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Outer webhook envelope: `{event, data}`.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEnvelope {
    pub event: String,
    pub data: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventAuthorization {
    pub authorization_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventCustomer {
    pub email: String,
    pub customer_code: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl EventCustomer {
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventPlan {
    pub plan_code: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// The `metadata.custom` block attached at checkout initialization.
/// Its `type` decides which charge branch runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomMetadata {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub entry_date: Option<NaiveDate>,
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub plan_code: Option<String>,
    #[serde(default)]
    pub customer_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChargeMetadata {
    #[serde(default)]
    pub custom: Option<CustomMetadata>,
}

/// Charges initialized outside our checkout flow carry metadata as an
/// empty string instead of an object; treat anything non-object as absent.
fn lenient_metadata<'de, D>(deserializer: D) -> Result<Option<ChargeMetadata>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        Some(Value::Object(map)) => {
            serde_json::from_value(Value::Object(map)).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

/// `charge.success` payload. `amount` is in minor units.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeSuccessData {
    pub status: String,
    pub reference: String,
    pub amount: i64,
    pub paid_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient_metadata")]
    pub metadata: Option<ChargeMetadata>,
    pub authorization: EventAuthorization,
    pub customer: EventCustomer,
    #[serde(default)]
    pub plan: Option<EventPlan>,
}

impl ChargeSuccessData {
    /// The `metadata.custom` block, when present.
    pub fn custom(&self) -> Option<&CustomMetadata> {
        self.metadata.as_ref().and_then(|m| m.custom.as_ref())
    }
}

/// `subscription.create` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionCreateData {
    pub status: String,
    pub subscription_code: String,
    pub email_token: String,
    pub next_payment_date: DateTime<Utc>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub plan: EventPlan,
    pub customer: EventCustomer,
}

/// `subscription.disable` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionDisableData {
    pub status: String,
    pub subscription_code: String,
    pub email_token: String,
}

/// `subscription.not_renew` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionNotRenewData {
    pub status: String,
    pub subscription_code: String,
    pub email_token: String,
    #[serde(default)]
    pub next_payment_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceSubscription {
    pub status: String,
    pub subscription_code: String,
}

/// `invoice.update` payload. `amount` is in minor units.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceUpdateData {
    pub amount: i64,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    pub subscription: InvoiceSubscription,
    pub customer: EventCustomer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_charge_success_with_walkin_metadata() {
        let payload = json!({
            "status": "success",
            "reference": "ref_123",
            "amount": 500000,
            "paid_at": "2026-03-14T10:00:00Z",
            "metadata": {
                "custom": {
                    "type": "walkin",
                    "entry_date": "2026-03-15"
                }
            },
            "authorization": { "authorization_code": "AUTH_abc" },
            "customer": {
                "email": "visitor@example.com",
                "customer_code": "CUS_x1",
                "first_name": "Ada",
                "last_name": "Okoro"
            }
        });

        let data: ChargeSuccessData = serde_json::from_value(payload).unwrap();
        let custom = data.custom().unwrap();
        assert_eq!(custom.kind, "walkin");
        assert_eq!(
            custom.entry_date,
            NaiveDate::from_ymd_opt(2026, 3, 15)
        );
        assert_eq!(data.customer.full_name().as_deref(), Some("Ada Okoro"));
    }

    #[test]
    fn test_charge_success_with_string_metadata() {
        // Charges made directly on the provider dashboard carry "" here.
        let payload = json!({
            "status": "success",
            "reference": "ref_456",
            "amount": 1500000,
            "paid_at": "2026-03-14T10:00:00Z",
            "metadata": "",
            "authorization": { "authorization_code": "AUTH_def" },
            "customer": { "email": "m@example.com", "customer_code": "CUS_x2" },
            "plan": { "plan_code": "PLN_monthly" }
        });

        let data: ChargeSuccessData = serde_json::from_value(payload).unwrap();
        assert!(data.custom().is_none());
        assert_eq!(data.plan.unwrap().plan_code, "PLN_monthly");
    }

    #[test]
    fn test_webhook_envelope_parses() {
        let body = r#"{"event": "subscription.disable", "data": {"status": "cancelled", "subscription_code": "SUB_1", "email_token": "tok_1"}}"#;
        let envelope: WebhookEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.event, "subscription.disable");

        let data: SubscriptionDisableData = serde_json::from_value(envelope.data).unwrap();
        assert_eq!(data.subscription_code, "SUB_1");
    }

    #[test]
    fn test_subscription_create_parses_created_at_alias() {
        let payload = json!({
            "status": "active",
            "subscription_code": "SUB_9",
            "email_token": "tok_9",
            "next_payment_date": "2026-04-14T00:00:00Z",
            "createdAt": "2026-03-14T00:00:00Z",
            "plan": { "plan_code": "PLN_annual", "name": "Annual" },
            "customer": { "email": "m@example.com", "customer_code": "CUS_x3" }
        });

        let data: SubscriptionCreateData = serde_json::from_value(payload).unwrap();
        assert_eq!(data.plan.plan_code, "PLN_annual");
        assert_eq!(data.created_at.to_rfc3339(), "2026-03-14T00:00:00+00:00");
    }
}
