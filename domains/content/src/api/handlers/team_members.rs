//! Team member handlers
//!
//! Public listing, admin-gated mutation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use longbow_auth::AdminUser;
use longbow_common::{ApiBody, Error, Result, ValidatedJson};

use crate::api::middleware::ContentState;
use crate::domain::entities::TeamMember;
use crate::repository::TeamMemberUpdate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub position: String,

    #[validate(length(max = 2000))]
    pub context: String,

    #[validate(url)]
    pub image_url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTeamMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub position: Option<String>,

    #[validate(length(max = 2000))]
    pub context: Option<String>,

    #[validate(url)]
    pub image_url: Option<String>,
}

/// POST /v1/teams (admin)
pub async fn create_team_member(
    AdminUser(_session): AdminUser,
    State(state): State<ContentState>,
    ValidatedJson(payload): ValidatedJson<CreateTeamMemberRequest>,
) -> Result<impl IntoResponse> {
    let member = TeamMember::new(
        payload.name,
        payload.position,
        payload.context,
        payload.image_url,
    )?;
    let created = state.repos.team_members.create(&member).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiBody::with_data(
            "Team Member created successfully.",
            created,
        )),
    ))
}

/// GET /v1/teams
pub async fn list_team_members(State(state): State<ContentState>) -> Result<impl IntoResponse> {
    let members = state.repos.team_members.list_all().await?;
    Ok(Json(ApiBody::with_data("Team Members found.", members)))
}

/// GET /v1/teams/{id}
pub async fn get_team_member(
    State(state): State<ContentState>,
    Path(member_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let member = state
        .repos
        .team_members
        .get_by_id(member_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team Member not found.".to_string()))?;

    Ok(Json(ApiBody::with_data("Team Member found.", member)))
}

/// PATCH /v1/teams/{id} (admin)
pub async fn update_team_member(
    AdminUser(_session): AdminUser,
    State(state): State<ContentState>,
    Path(member_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTeamMemberRequest>,
) -> Result<impl IntoResponse> {
    let update = TeamMemberUpdate {
        name: payload.name,
        position: payload.position,
        context: payload.context,
        image_url: payload.image_url,
    };

    let updated = state
        .repos
        .team_members
        .update(member_id, &update)
        .await?
        .ok_or_else(|| Error::NotFound("Team Member not found.".to_string()))?;

    Ok(Json(ApiBody::with_data(
        "Team Member updated successfully.",
        updated,
    )))
}

/// DELETE /v1/teams/{id} (admin)
pub async fn delete_team_member(
    AdminUser(_session): AdminUser,
    State(state): State<ContentState>,
    Path(member_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    if !state.repos.team_members.delete(member_id).await? {
        return Err(Error::NotFound("Team Member not found.".to_string()));
    }

    Ok(Json(ApiBody::message("Team Member deleted successfully.")))
}
