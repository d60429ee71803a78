//! Webhook signature verification
//!
//! Paystack signs webhook deliveries with HMAC-SHA512 over the raw request
//! body, keyed by the account secret key, and sends the hex digest in the
//! `X-Paystack-Signature` header. Deliveries also originate from a small,
//! published set of IP addresses.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

type HmacSha512 = Hmac<Sha512>;

/// IP addresses Paystack delivers webhooks from
pub const PAYSTACK_ALLOWED_IPS: [&str; 3] =
    ["52.31.139.75", "52.49.173.169", "52.214.14.220"];

/// Check whether a request origin is on the provider's allowlist
pub fn is_allowlisted(ip: &str) -> bool {
    PAYSTACK_ALLOWED_IPS.contains(&ip.trim())
}

/// Verify the signature header against the raw body.
///
/// Comparison is constant-time so the check leaks no timing information
/// about the expected digest.
pub fn verify_signature(secret_key: &str, body: &[u8], signature: &str) -> bool {
    let mut mac = match HmacSha512::new_from_slice(secret_key.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(body);
    let expected = hex::encode(mac.finalize().into_bytes());

    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

/// Compute the hex signature for a body. Used by tests and the mock
/// provider to construct valid deliveries.
pub fn sign_body(secret_key: &str, body: &[u8]) -> String {
    // HMAC accepts keys of any length, so this cannot fail
    let mut mac = HmacSha512::new_from_slice(secret_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signature_accepted() {
        let secret = "sk_test_secret";
        let body = br#"{"event":"charge.success"}"#;
        let signature = sign_body(secret, body);
        assert!(verify_signature(secret, body, &signature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let body = br#"{"event":"charge.success"}"#;
        let signature = sign_body("sk_test_secret", body);
        assert!(!verify_signature("sk_live_other", body, &signature));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let secret = "sk_test_secret";
        let signature = sign_body(secret, br#"{"event":"charge.success"}"#);
        assert!(!verify_signature(
            secret,
            br#"{"event":"charge.failed"}"#,
            &signature
        ));
    }

    #[test]
    fn test_malformed_signature_rejected() {
        assert!(!verify_signature("sk_test_secret", b"{}", "not-hex"));
        assert!(!verify_signature("sk_test_secret", b"{}", ""));
    }

    #[test]
    fn test_allowlist() {
        assert!(is_allowlisted("52.31.139.75"));
        assert!(is_allowlisted(" 52.214.14.220 "));
        assert!(!is_allowlisted("10.0.0.1"));
        assert!(!is_allowlisted(""));
    }
}
