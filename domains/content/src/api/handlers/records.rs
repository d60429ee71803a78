//! Competition record handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use longbow_auth::AdminUser;
use longbow_common::{ApiBody, Error, Result, ValidatedJson};

use crate::api::middleware::ContentState;
use crate::domain::entities::Record;
use crate::repository::RecordUpdate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecordRequest {
    #[validate(length(min = 1, max = 200))]
    pub competition: String,

    #[validate(length(min = 1, max = 200))]
    pub location: String,

    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,

    #[validate(length(min = 1, max = 50))]
    pub rank: String,

    #[validate(url)]
    pub image_url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecordRequest {
    #[validate(length(min = 1, max = 200))]
    pub competition: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 50))]
    pub rank: Option<String>,

    #[validate(url)]
    pub image_url: Option<String>,
}

/// POST /v1/records (admin)
pub async fn create_record(
    AdminUser(_session): AdminUser,
    State(state): State<ContentState>,
    ValidatedJson(payload): ValidatedJson<CreateRecordRequest>,
) -> Result<impl IntoResponse> {
    let record = Record::new(
        payload.competition,
        payload.location,
        payload.start_date,
        payload.end_date,
        payload.rank,
        payload.image_url,
    )?;
    let created = state.repos.records.create(&record).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiBody::with_data("Record created successfully.", created)),
    ))
}

/// GET /v1/records
pub async fn list_records(State(state): State<ContentState>) -> Result<impl IntoResponse> {
    let records = state.repos.records.list_all().await?;
    Ok(Json(ApiBody::with_data("Records found.", records)))
}

/// GET /v1/records/{id}
pub async fn get_record(
    State(state): State<ContentState>,
    Path(record_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let record = state
        .repos
        .records
        .get_by_id(record_id)
        .await?
        .ok_or_else(|| Error::NotFound("Record not found.".to_string()))?;

    Ok(Json(ApiBody::with_data("Record found.", record)))
}

/// PATCH /v1/records/{id} (admin)
pub async fn update_record(
    AdminUser(_session): AdminUser,
    State(state): State<ContentState>,
    Path(record_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRecordRequest>,
) -> Result<impl IntoResponse> {
    let update = RecordUpdate {
        competition: payload.competition,
        location: payload.location,
        start_date: payload.start_date,
        end_date: payload.end_date,
        rank: payload.rank,
        image_url: payload.image_url,
    };

    let updated = state
        .repos
        .records
        .update(record_id, &update)
        .await?
        .ok_or_else(|| Error::NotFound("Record not found.".to_string()))?;

    Ok(Json(ApiBody::with_data(
        "Record updated successfully.",
        updated,
    )))
}

/// DELETE /v1/records/{id} (admin)
pub async fn delete_record(
    AdminUser(_session): AdminUser,
    State(state): State<ContentState>,
    Path(record_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    if !state.repos.records.delete(record_id).await? {
        return Err(Error::NotFound("Record not found.".to_string()));
    }

    Ok(Json(ApiBody::message("Record deleted successfully.")))
}
