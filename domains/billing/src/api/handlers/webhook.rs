//! Paystack webhook endpoint
//!
//! POST /v1/payments/webhook
//!
//! Verification happens in order: origin IP against the provider's
//! published addresses, then the HMAC-SHA512 body signature, then payload
//! parsing. Only verified deliveries reach the dispatcher.

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Json},
};

use longbow_common::{ApiBody, Error, Result};
use longbow_paystack::signature::{is_allowlisted, verify_signature};

use crate::api::middleware::BillingState;
use crate::domain::events::WebhookEnvelope;

const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// Client IP as reported by the proxy in front of us.
///
/// Clients can send an `x-forwarded-for` of their own with arbitrary
/// entries; our proxy appends the address it actually accepted the
/// connection from as the last entry. Only that rightmost entry is
/// trustworthy, so it is the one checked against the allowlist.
fn client_ip(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next_back())
        .map(str::trim)
}

pub async fn payment_webhook(
    State(state): State<BillingState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let ip = client_ip(&headers)
        .ok_or_else(|| Error::Authorization("Forbidden: IP not allowed".to_string()))?;
    if !is_allowlisted(ip) {
        tracing::warn!(ip, "Webhook from non-allowlisted address");
        return Err(Error::Authorization("Forbidden: IP not allowed".to_string()));
    }

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| Error::Validation("Signature missing".to_string()))?;
    if !verify_signature(&state.webhook_secret, &body, signature) {
        tracing::warn!(ip, "Webhook signature mismatch");
        return Err(Error::Validation("Invalid signature".to_string()));
    }

    let envelope: WebhookEnvelope = serde_json::from_slice(&body)
        .map_err(|e| Error::Validation(format!("Invalid webhook payload: {}", e)))?;

    tracing::info!(event = %envelope.event, "Webhook delivery accepted");

    let outcome = state
        .dispatcher
        .dispatch(&envelope.event, envelope.data)
        .await
        .map_err(|e| match e {
            // Infrastructure failures stay 500 so the provider retries;
            // handled business failures are reported back as 400.
            Error::Database(_)
            | Error::Unexpected(_)
            | Error::Serialization(_)
            | Error::Internal(_) => e,
            other => Error::Provider(other.to_string()),
        })?;

    Ok(Json(ApiBody::message(outcome.message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_takes_rightmost_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            "10.0.0.1, 52.31.139.75".parse().unwrap(),
        );
        assert_eq!(client_ip(&headers), Some("52.31.139.75"));
    }

    #[test]
    fn test_client_ip_ignores_client_supplied_entries() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            "52.31.139.75, 203.0.113.9".parse().unwrap(),
        );
        assert_eq!(client_ip(&headers), Some("203.0.113.9"));
    }

    #[test]
    fn test_client_ip_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers), None);
    }
}
