//! Contact form handlers
//!
//! The message is stored first, then forwarded to the club inbox. Storage
//! stays pure; talking to the email service is this layer's job.

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use validator::Validate;

use longbow_auth::AdminUser;
use longbow_common::{ApiBody, Error, Result, ValidatedJson};

use crate::api::middleware::ContentState;
use crate::domain::entities::ContactMessage;

#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 1, max = 5000))]
    pub message: String,

    #[validate(length(min = 1, max = 30))]
    pub phone_number: String,
}

/// POST /v1/contact
pub async fn send_contact_message(
    State(state): State<ContentState>,
    ValidatedJson(payload): ValidatedJson<ContactRequest>,
) -> Result<impl IntoResponse> {
    let message = ContactMessage::new(
        payload.email,
        payload.first_name,
        payload.last_name,
        payload.message,
        payload.phone_number,
    )?;

    let stored = state.repos.contact_messages.create(&message).await?;

    state
        .email
        .send_contact_notification(
            &stored.first_name,
            &stored.last_name,
            &stored.email,
            &stored.phone_number,
            &stored.message,
        )
        .await
        .map_err(|e| Error::Internal(e.to_string()))?;

    Ok(Json(ApiBody::message("Message sent successfully.")))
}

/// GET /v1/contact (admin)
pub async fn list_contact_messages(
    AdminUser(_session): AdminUser,
    State(state): State<ContentState>,
) -> Result<impl IntoResponse> {
    let messages = state.repos.contact_messages.list_all().await?;
    Ok(Json(ApiBody::with_data("Contact messages found.", messages)))
}
