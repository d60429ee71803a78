//! AWS SES Email Service Implementation
//!
//! Production email delivery through AWS Simple Email Service (SES),
//! with an optional endpoint override for local testing.

use aws_config::BehaviorVersion;
use aws_sdk_ses::types::{Body, Content, Destination, Message};
use aws_sdk_ses::Client as SesClient;
use chrono::Utc;

use crate::{EmailConfig, EmailError, EmailMessage, EmailReceipt, EmailService};

/// AWS SES email service implementation
pub struct SesEmailService {
    client: SesClient,
    config: EmailConfig,
}

impl SesEmailService {
    /// Create new SES email service
    pub async fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let mut aws_config_builder = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &config.aws_region {
            aws_config_builder =
                aws_config_builder.region(aws_config::Region::new(region.clone()));
        }

        // Endpoint override for LocalStack-style local testing
        if let Some(endpoint_url) = &config.aws_endpoint_url {
            tracing::info!("Using custom SES endpoint: {}", endpoint_url);
            aws_config_builder = aws_config_builder.endpoint_url(endpoint_url);
        }

        let aws_config = aws_config_builder.load().await;
        let client = SesClient::new(&aws_config);

        Ok(Self { client, config })
    }

    /// Build the SES message body from text and optional HTML parts
    fn build_body(message: &EmailMessage) -> Result<Body, EmailError> {
        let text_content = Content::builder()
            .data(&message.body_text)
            .charset("UTF-8")
            .build()
            .map_err(|e| EmailError::AwsSes(format!("Failed to build text content: {}", e)))?;

        let mut body_builder = Body::builder().text(text_content);

        if let Some(html) = &message.body_html {
            let html_content = Content::builder()
                .data(html)
                .charset("UTF-8")
                .build()
                .map_err(|e| EmailError::AwsSes(format!("Failed to build html content: {}", e)))?;
            body_builder = body_builder.html(html_content);
        }

        Ok(body_builder.build())
    }
}

#[async_trait::async_trait]
impl EmailService for SesEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        tracing::debug!(
            to = %message.to,
            subject = %message.subject,
            "Sending email via AWS SES"
        );

        let destination = Destination::builder().to_addresses(&message.to).build();

        let subject = Content::builder()
            .data(&message.subject)
            .charset("UTF-8")
            .build()
            .map_err(|e| EmailError::AwsSes(format!("Failed to build subject: {}", e)))?;

        let body = Self::build_body(&message)?;

        let ses_message = Message::builder().subject(subject).body(body).build();

        let mut request = self
            .client
            .send_email()
            .source(&message.from)
            .destination(destination)
            .message(ses_message);

        if let Some(reply_to) = &message.reply_to {
            request = request.reply_to_addresses(reply_to);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EmailError::AwsSes(format!("Failed to send email: {}", e)))?;

        let message_id = response.message_id().to_string();

        tracing::info!(
            message_id = %message_id,
            to = %message.to,
            "Email sent successfully via SES"
        );

        let mut metadata = message.metadata;
        metadata.insert("ses_message_id".to_string(), message_id.clone());

        Ok(EmailReceipt {
            message_id,
            sent_at: Utc::now(),
            provider: "aws-ses".to_string(),
            metadata,
        })
    }

    fn default_from(&self) -> String {
        self.config.default_from.clone()
    }

    fn contact_recipient(&self) -> String {
        self.config.contact_recipient.clone()
    }
}

impl std::fmt::Debug for SesEmailService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesEmailService")
            .field("region", &self.config.aws_region)
            .field("endpoint_url", &self.config.aws_endpoint_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ses_service_creation() {
        let config = EmailConfig {
            provider: "ses".to_string(),
            aws_region: Some("eu-west-1".to_string()),
            aws_endpoint_url: None,
            default_from: "noreply@longbow.club".to_string(),
            contact_recipient: "info@longbow.club".to_string(),
            enabled: true,
        };

        let service = SesEmailService::new(config).await.unwrap();
        assert_eq!(service.default_from(), "noreply@longbow.club");
        assert_eq!(service.contact_recipient(), "info@longbow.club");
    }
}
