//! The `{error, message, data}` response envelope
//!
//! Every successful endpoint returns this shape; failures go through
//! [`crate::Error`] which produces `{error: true, message}`.

use serde::Serialize;

/// Response body envelope for successful API operations.
#[derive(Debug, Serialize)]
pub struct ApiBody<T: Serialize> {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiBody<()> {
    /// A success body with a message and no data payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> ApiBody<T> {
    /// A success body with a message and data payload.
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            error: false,
            message: message.into(),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only_body_skips_data() {
        let body = ApiBody::message("Plan deleted successfully.");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], false);
        assert_eq!(json["message"], "Plan deleted successfully.");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_body_with_data() {
        let body = ApiBody::with_data("Plans found.", vec![1, 2, 3]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], false);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }
}
