//! Archer leaderboard handlers
//!
//! The listing groups entries by bow discipline, each sorted by points
//! descending. Updates add competition points to the stored total rather
//! than replacing it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use longbow_auth::AdminUser;
use longbow_common::{ApiBody, Error, RepositoryError, Result, ValidatedJson};

use crate::api::middleware::ContentState;
use crate::domain::entities::{ArcherRank, BowType};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateArcherRankRequest {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,

    #[validate(range(min = 0))]
    pub point: i32,

    #[serde(rename = "type")]
    pub bow_type: BowType,

    #[validate(url)]
    pub image_url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateArcherRankRequest {
    /// Points gained, added to the stored total.
    #[validate(range(min = 0))]
    pub point: i32,
}

/// Leaderboard grouped by discipline.
#[derive(Debug, Serialize)]
pub struct RankBoard {
    #[serde(rename = "General")]
    pub general: Vec<ArcherRank>,
    #[serde(rename = "Recurve")]
    pub recurve: Vec<ArcherRank>,
    #[serde(rename = "Compound")]
    pub compound: Vec<ArcherRank>,
    #[serde(rename = "Barebow")]
    pub barebow: Vec<ArcherRank>,
}

/// POST /v1/ranks (admin)
pub async fn create_archer_rank(
    AdminUser(_session): AdminUser,
    State(state): State<ContentState>,
    ValidatedJson(payload): ValidatedJson<CreateArcherRankRequest>,
) -> Result<impl IntoResponse> {
    let rank = ArcherRank::new(
        payload.full_name,
        payload.point,
        payload.bow_type,
        payload.image_url,
    )?;

    let created = state.repos.archer_ranks.create(&rank).await.map_err(|e| match e {
        RepositoryError::AlreadyExists => {
            Error::Conflict("Archer rank already exists.".to_string())
        }
        other => other.into(),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiBody::with_data(
            "Archer rank created successfully.",
            created,
        )),
    ))
}

/// GET /v1/ranks
pub async fn list_archer_ranks(State(state): State<ContentState>) -> Result<impl IntoResponse> {
    let board = RankBoard {
        general: state.repos.archer_ranks.list_by_type(BowType::General).await?,
        recurve: state.repos.archer_ranks.list_by_type(BowType::Recurve).await?,
        compound: state.repos.archer_ranks.list_by_type(BowType::Compound).await?,
        barebow: state.repos.archer_ranks.list_by_type(BowType::Barebow).await?,
    };

    Ok(Json(ApiBody::with_data("Archer ranks found.", board)))
}

/// GET /v1/ranks/{id}
pub async fn get_archer_rank(
    State(state): State<ContentState>,
    Path(rank_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let rank = state
        .repos
        .archer_ranks
        .get_by_id(rank_id)
        .await?
        .ok_or_else(|| Error::NotFound("Archer rank not found.".to_string()))?;

    Ok(Json(ApiBody::with_data("Archer rank found.", rank)))
}

/// PATCH /v1/ranks/{id} (admin)
pub async fn update_archer_rank(
    AdminUser(_session): AdminUser,
    State(state): State<ContentState>,
    Path(rank_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateArcherRankRequest>,
) -> Result<impl IntoResponse> {
    let updated = state
        .repos
        .archer_ranks
        .add_points(rank_id, payload.point)
        .await?
        .ok_or_else(|| Error::NotFound("Archer rank not found.".to_string()))?;

    Ok(Json(ApiBody::with_data(
        "Archer rank updated successfully.",
        updated,
    )))
}

/// DELETE /v1/ranks/{id} (admin)
pub async fn delete_archer_rank(
    AdminUser(_session): AdminUser,
    State(state): State<ContentState>,
    Path(rank_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    if !state.repos.archer_ranks.delete(rank_id).await? {
        return Err(Error::NotFound("Archer rank not found.".to_string()));
    }

    Ok(Json(ApiBody::message("Archer rank deleted successfully.")))
}
