//! Plan management handlers
//!
//! Listing is public; mutation is admin-only. Stored prices are in minor
//! units, responses expose major units.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use longbow_auth::AdminUser;
use longbow_common::{ApiBody, Error, RepositoryError, Result, ValidatedJson};

use crate::api::middleware::MembersState;
use crate::domain::entities::{Plan, PlanInterval};
use crate::repository::{PlanUpdate, PlanUpdateOutcome};

/// Plan as exposed over the API, with the price in major units.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub id: Uuid,
    pub plan_code: Option<String>,
    pub name: String,
    pub price: i64,
    pub benefits: Vec<String>,
    pub interval: PlanInterval,
    pub duration_days: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        let price = plan.display_price();
        Self {
            id: plan.id,
            plan_code: plan.plan_code,
            name: plan.name,
            price,
            benefits: plan.benefits,
            interval: plan.interval,
            duration_days: plan.duration_days,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlanRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Price in minor units (kobo).
    #[validate(range(min = 0))]
    pub price: i64,

    pub benefits: Vec<String>,
    pub interval: PlanInterval,

    #[validate(range(min = 1))]
    pub duration_days: i32,

    pub plan_code: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlanRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(range(min = 0))]
    pub price: Option<i64>,

    pub benefits: Option<Vec<String>>,
    pub interval: Option<PlanInterval>,

    #[validate(range(min = 1))]
    pub duration_days: Option<i32>,

    pub plan_code: Option<String>,
}

/// POST /v1/plans (admin)
pub async fn create_plan(
    AdminUser(_session): AdminUser,
    State(state): State<MembersState>,
    ValidatedJson(payload): ValidatedJson<CreatePlanRequest>,
) -> Result<impl IntoResponse> {
    let plan = Plan::new(
        payload.name,
        payload.price,
        payload.benefits,
        payload.interval,
        payload.duration_days,
        payload.plan_code,
    )?;

    let created = state.repos.plans.create(&plan).await.map_err(|e| match e {
        RepositoryError::AlreadyExists => Error::Conflict("Plan already exists.".to_string()),
        other => other.into(),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiBody::with_data(
            "Plan created successfully.",
            PlanResponse::from(created),
        )),
    ))
}

/// GET /v1/plans
pub async fn list_plans(State(state): State<MembersState>) -> Result<impl IntoResponse> {
    let plans: Vec<PlanResponse> = state
        .repos
        .plans
        .list_all()
        .await?
        .into_iter()
        .map(PlanResponse::from)
        .collect();

    Ok(Json(ApiBody::with_data("Plans found.", plans)))
}

/// GET /v1/plans/{id}
pub async fn get_plan(
    State(state): State<MembersState>,
    Path(plan_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let plan = state
        .repos
        .plans
        .get_by_id(plan_id)
        .await?
        .ok_or_else(|| Error::NotFound("Plan not found.".to_string()))?;

    Ok(Json(ApiBody::with_data(
        "Plan found.",
        PlanResponse::from(plan),
    )))
}

/// PATCH /v1/plans/{id} (admin)
///
/// Distinguishes a missing plan from a no-op update so the caller learns
/// which happened.
pub async fn update_plan(
    AdminUser(_session): AdminUser,
    State(state): State<MembersState>,
    Path(plan_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePlanRequest>,
) -> Result<impl IntoResponse> {
    let update = PlanUpdate {
        name: payload.name,
        price: payload.price,
        benefits: payload.benefits,
        interval: payload.interval,
        duration_days: payload.duration_days,
        plan_code: payload.plan_code,
    };

    match state.repos.plans.update(plan_id, &update).await? {
        PlanUpdateOutcome::NotFound => Err(Error::NotFound("Plan not found.".to_string())),
        PlanUpdateOutcome::NoChanges => {
            Ok(Json(ApiBody::message("No changes were made to the plan.")).into_response())
        }
        PlanUpdateOutcome::Updated(plan) => Ok(Json(ApiBody::with_data(
            "Plan updated successfully.",
            PlanResponse::from(plan),
        ))
        .into_response()),
    }
}

/// DELETE /v1/plans/{id} (admin)
pub async fn delete_plan(
    AdminUser(_session): AdminUser,
    State(state): State<MembersState>,
    Path(plan_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    if !state.repos.plans.delete(plan_id).await? {
        return Err(Error::NotFound("Plan not found.".to_string()));
    }

    Ok(Json(ApiBody::message("Plan deleted successfully.")))
}
