//! Walk-in day pass handlers
//!
//! - POST /v1/walk-ins/initialize - Open a checkout for a day pass
//! - GET /v1/walk-ins - Admin listing
//!
//! The pass row itself is only written by the charge webhook; this
//! endpoint enforces the daily cap and starts the payment.

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use longbow_auth::AdminUser;
use longbow_common::{ApiBody, Error, Result, ValidatedJson};

use crate::api::handlers::provider_error;
use crate::api::middleware::BillingState;
use crate::domain::entities::MAX_WALK_INS_PER_DAY;

#[derive(Debug, Deserialize, Validate)]
pub struct WalkInInitializeRequest {
    #[validate(email)]
    pub email: String,

    pub entry_date: NaiveDate,
}

/// POST /v1/walk-ins/initialize
pub async fn initialize_walk_in(
    State(state): State<BillingState>,
    ValidatedJson(payload): ValidatedJson<WalkInInitializeRequest>,
) -> Result<impl IntoResponse> {
    let sold = state
        .billing
        .walk_ins
        .count_for_entry_date(payload.entry_date)
        .await?;
    if sold >= MAX_WALK_INS_PER_DAY {
        return Err(Error::Validation(
            "Walk-in slots for this day are filled.".to_string(),
        ));
    }

    let plan = state
        .members
        .plans
        .find_walk_in_plan()
        .await?
        .ok_or_else(|| Error::NotFound("Plan not found.".to_string()))?;

    let metadata = json!({
        "custom": {
            "type": "walkin",
            "entry_date": payload.entry_date,
        }
    });
    let checkout = state
        .payments
        .initialize_transaction(&payload.email, plan.price, None, metadata)
        .await
        .map_err(provider_error)?;

    Ok(Json(ApiBody::with_data(
        "Walk-in payment initialized.",
        json!({
            "authorization_url": checkout.authorization_url,
            "reference": checkout.reference,
        }),
    )))
}

/// GET /v1/walk-ins (admin)
pub async fn list_walk_ins(
    AdminUser(_session): AdminUser,
    State(state): State<BillingState>,
) -> Result<impl IntoResponse> {
    let walk_ins = state.billing.walk_ins.list_all().await?;
    Ok(Json(ApiBody::with_data("Walk-ins found.", walk_ins)))
}
