//! Mock Email Service Implementation
//!
//! In-memory email capture for testing without external dependencies.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::{EmailError, EmailMessage, EmailReceipt, EmailService};

/// Captured email for test verification
#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub message: EmailMessage,
    pub receipt: EmailReceipt,
}

/// Mock email service for testing
#[derive(Debug, Clone)]
pub struct MockEmailService {
    captured_emails: Arc<Mutex<Vec<CapturedEmail>>>,
    default_from: String,
    contact_recipient: String,
    /// Whether sending is enabled (can simulate failures)
    enabled: Arc<Mutex<bool>>,
}

impl MockEmailService {
    /// Create new mock email service
    pub fn new() -> Self {
        Self {
            captured_emails: Arc::new(Mutex::new(Vec::new())),
            default_from: "noreply@longbow.club".to_string(),
            contact_recipient: "info@longbow.club".to_string(),
            enabled: Arc::new(Mutex::new(true)),
        }
    }

    /// Create mock service with custom addresses
    pub fn with_addresses(default_from: String, contact_recipient: String) -> Self {
        Self {
            captured_emails: Arc::new(Mutex::new(Vec::new())),
            default_from,
            contact_recipient,
            enabled: Arc::new(Mutex::new(true)),
        }
    }

    /// Get all captured emails
    pub fn get_captured_emails(&self) -> Vec<CapturedEmail> {
        self.captured_emails.lock().unwrap().clone()
    }

    /// Get captured emails for a specific recipient
    pub fn get_emails_for_recipient(&self, recipient: &str) -> Vec<CapturedEmail> {
        self.captured_emails
            .lock()
            .unwrap()
            .iter()
            .filter(|email| email.message.to == recipient)
            .cloned()
            .collect()
    }

    /// Clear all captured emails
    pub fn clear_captured_emails(&self) {
        self.captured_emails.lock().unwrap().clear();
    }

    /// Enable or disable email sending (for testing failures)
    pub fn set_enabled(&self, enabled: bool) {
        *self.enabled.lock().unwrap() = enabled;
    }

    /// Get count of captured emails
    pub fn email_count(&self) -> usize {
        self.captured_emails.lock().unwrap().len()
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        let enabled = *self.enabled.lock().unwrap();
        if !enabled {
            return Err(EmailError::Configuration(
                "Mock email service disabled".to_string(),
            ));
        }

        tracing::debug!(
            to = %message.to,
            subject = %message.subject,
            "Capturing email in mock service"
        );

        let message_id = format!("mock-{}", Uuid::new_v4());

        let mut metadata = HashMap::new();
        metadata.insert("mock".to_string(), "true".to_string());
        for (key, value) in &message.metadata {
            metadata.insert(key.clone(), value.clone());
        }

        let receipt = EmailReceipt {
            message_id: message_id.clone(),
            sent_at: Utc::now(),
            provider: "mock".to_string(),
            metadata,
        };

        let captured = CapturedEmail {
            message,
            receipt: receipt.clone(),
        };

        self.captured_emails.lock().unwrap().push(captured);

        tracing::info!(message_id = %message_id, "Email captured by mock service");

        Ok(receipt)
    }

    fn default_from(&self) -> String {
        self.default_from.clone()
    }

    fn contact_recipient(&self) -> String {
        self.contact_recipient.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_captures_emails() {
        let service = MockEmailService::new();

        let message = EmailMessage::new(
            "info@longbow.club".to_string(),
            "noreply@longbow.club".to_string(),
            "Test".to_string(),
            "Body".to_string(),
        );

        let receipt = service.send_email(message).await.unwrap();
        assert_eq!(receipt.provider, "mock");
        assert!(receipt.message_id.starts_with("mock-"));

        assert_eq!(service.email_count(), 1);
        let captured = service.get_emails_for_recipient("info@longbow.club");
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].message.subject, "Test");
    }

    #[tokio::test]
    async fn test_mock_disabled_fails() {
        let service = MockEmailService::new();
        service.set_enabled(false);

        let message = EmailMessage::new(
            "info@longbow.club".to_string(),
            "noreply@longbow.club".to_string(),
            "Test".to_string(),
            "Body".to_string(),
        );

        let result = service.send_email(message).await;
        assert!(result.is_err());
        assert_eq!(service.email_count(), 0);
    }

    #[tokio::test]
    async fn test_contact_notification_goes_to_club_inbox() {
        let service = MockEmailService::new();

        service
            .send_contact_notification(
                "Robin",
                "Hood",
                "robin@sherwood.example",
                "+2348012345678",
                "I would like to book a session.",
            )
            .await
            .unwrap();

        let captured = service.get_emails_for_recipient("info@longbow.club");
        assert_eq!(captured.len(), 1);
        let message = &captured[0].message;
        assert!(message.subject.contains("Robin Hood"));
        assert_eq!(
            message.reply_to,
            Some("robin@sherwood.example".to_string())
        );
        assert!(message.body_text.contains("I would like to book a session."));
        assert_eq!(
            message.metadata.get("email_type"),
            Some(&"contact_message".to_string())
        );
    }

    #[tokio::test]
    async fn test_clear_captured_emails() {
        let service = MockEmailService::new();

        let message = EmailMessage::new(
            "a@example.com".to_string(),
            "noreply@longbow.club".to_string(),
            "Test".to_string(),
            "Body".to_string(),
        );
        service.send_email(message).await.unwrap();
        assert_eq!(service.email_count(), 1);

        service.clear_captured_emails();
        assert_eq!(service.email_count(), 0);
    }
}
