//! Competition registrant handlers
//!
//! - POST /v1/champions - Register for a competition
//! - PUT /v1/champions/{id} - Fill in team/discipline details
//! - POST /v1/champions/{id}/initialize - Open a checkout for the entry fee
//! - GET /v1/champions - Admin listing

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use longbow_auth::AdminUser;
use longbow_common::{ApiBody, Error, Result, ValidatedJson};

use crate::api::handlers::provider_error;
use crate::api::middleware::BillingState;
use crate::domain::entities::ChampionUser;
use crate::repository::ChampionUserUpdate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateChampionRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    pub event_date: DateTime<Utc>,

    #[validate(length(min = 1, max = 30))]
    pub phone_number: String,

    pub sex: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,

    pub association: Option<String>,
    pub nationality: Option<String>,
    pub language: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub distance: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateChampionRequest {
    pub association: Option<String>,
    pub nationality: Option<String>,
    pub language: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub distance: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

/// POST /v1/champions
pub async fn create_champion(
    State(state): State<BillingState>,
    ValidatedJson(payload): ValidatedJson<CreateChampionRequest>,
) -> Result<impl IntoResponse> {
    let mut champion = ChampionUser::new(
        payload.first_name,
        payload.last_name,
        payload.email,
        payload.event_date,
        payload.phone_number,
    )?;
    champion.sex = payload.sex;
    champion.image_url = payload.image_url;
    champion.association = payload.association;
    champion.nationality = payload.nationality;
    champion.language = payload.language;
    champion.state = payload.state;
    champion.country = payload.country;
    champion.category = payload.category;
    champion.distance = payload.distance;

    let created = state.billing.champion_users.create(&champion).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiBody::with_data(
            "Champion user created successfully.",
            json!({
                "id": created.id,
                "unique_id": created.unique_id,
            }),
        )),
    ))
}

/// PUT /v1/champions/{id}
pub async fn update_champion(
    State(state): State<BillingState>,
    Path(champion_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateChampionRequest>,
) -> Result<impl IntoResponse> {
    let update = ChampionUserUpdate {
        association: payload.association,
        nationality: payload.nationality,
        language: payload.language,
        state: payload.state,
        country: payload.country,
        category: payload.category,
        distance: payload.distance,
        image_url: payload.image_url,
    };

    state
        .billing
        .champion_users
        .update(champion_id, &update)
        .await?
        .ok_or_else(|| Error::NotFound("Champion user not found.".to_string()))?;

    Ok(Json(ApiBody::message("Champion user updated successfully.")))
}

/// POST /v1/champions/{id}/initialize
///
/// The unique ID placed in the checkout metadata is how the charge
/// webhook later finds this registrant to mark paid.
pub async fn initialize_champion_payment(
    State(state): State<BillingState>,
    Path(champion_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let champion = state
        .billing
        .champion_users
        .get_by_id(champion_id)
        .await?
        .ok_or_else(|| Error::NotFound("Champion user not found.".to_string()))?;

    // Fee is category-based, in major units; the provider takes kobo.
    let amount = champion.entry_fee() * 100;
    let metadata = json!({
        "custom": {
            "type": "competition",
            "unique_id": champion.unique_id,
        }
    });
    let checkout = state
        .payments
        .initialize_transaction(&champion.email, amount, None, metadata)
        .await
        .map_err(provider_error)?;

    Ok(Json(ApiBody::with_data(
        "Payment initialized.",
        json!({
            "authorization_url": checkout.authorization_url,
            "reference": checkout.reference,
        }),
    )))
}

/// GET /v1/champions (admin)
pub async fn list_champions(
    AdminUser(_session): AdminUser,
    State(state): State<BillingState>,
) -> Result<impl IntoResponse> {
    let champions = state.billing.champion_users.list_all().await?;
    Ok(Json(ApiBody::with_data("Champion users found.", champions)))
}
