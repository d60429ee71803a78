//! Member account and profile handlers
//!
//! - GET /v1/account - Profile summary for the authenticated member
//! - PATCH /v1/users/{id} - Profile update (self or admin)
//! - GET /v1/users - Admin listing

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use longbow_auth::{AdminUser, AuthUser};
use longbow_common::{ApiBody, Error, Result, ValidatedJson};

use crate::api::middleware::MembersState;
use crate::domain::entities::{PaymentHistory, RegistrationStatus, SubscriptionStatus};
use crate::repository::UserProfileUpdate;

/// Profile summary returned by GET /v1/account.
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub image_url: Option<String>,
    pub user_status: RegistrationStatus,
    pub plan_id: Option<Uuid>,
    pub plan: Option<String>,
    pub benefits: Vec<String>,
    /// Plan price in major units.
    pub price: Option<i64>,
    pub points: i64,
    pub status: Option<SubscriptionStatus>,
    pub end_date: Option<DateTime<Utc>>,
    pub payment_history: Vec<PaymentHistory>,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub date_of_birth: Option<DateTime<Utc>>,
    #[validate(length(max = 255))]
    pub street: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[validate(length(max = 30))]
    pub phone_number: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,

    #[validate(length(max = 100))]
    pub emergency_first_name: Option<String>,
    #[validate(length(max = 100))]
    pub emergency_last_name: Option<String>,
    #[validate(length(max = 100))]
    pub emergency_relationship: Option<String>,
    #[validate(length(max = 30))]
    pub emergency_phone_number: Option<String>,

    pub has_allergies: Option<bool>,
    #[validate(length(max = 1000))]
    pub allergy_details: Option<String>,

    pub previous_experience: Option<bool>,
    #[validate(length(max = 1000))]
    pub experience_details: Option<String>,
    pub interested_in_beginner_lessons: Option<bool>,
}

/// GET /v1/account
///
/// Joins the member's plan, subscription, leaderboard points, and payment
/// history into a single dashboard payload.
pub async fn get_account(
    AuthUser(session): AuthUser,
    State(state): State<MembersState>,
) -> Result<impl IntoResponse> {
    let user = state
        .repos
        .users
        .get_by_id(session.user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found.".to_string()))?;

    let plan = match user.plan_id {
        Some(plan_id) => state.repos.plans.get_by_id(plan_id).await?,
        None => None,
    };

    let subscription = state
        .repos
        .subscriptions
        .find_by_user_id(user.id)
        .await?;

    let payment_history = state.repos.payment_history.list_by_user(user.id).await?;
    let points = state.repos.users.leaderboard_points(&user.full_name()).await?;

    let summary = AccountSummary {
        image_url: user.image_url.clone(),
        user_status: user.status,
        plan_id: user.plan_id,
        plan: plan.as_ref().map(|p| p.name.clone()),
        benefits: plan.as_ref().map(|p| p.benefits.clone()).unwrap_or_default(),
        price: plan.as_ref().map(|p| p.display_price()),
        points,
        status: subscription.as_ref().map(|s| s.status),
        end_date: subscription.as_ref().and_then(|s| s.end_date),
        payment_history,
        full_name: user.full_name(),
    };

    Ok(Json(ApiBody::with_data("User found.", summary)))
}

/// PATCH /v1/users/{id}
///
/// Members can edit their own profile; admins can edit anyone's.
pub async fn update_user(
    AuthUser(session): AuthUser,
    State(state): State<MembersState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<impl IntoResponse> {
    if session.user_id != user_id && !session.role.is_admin() {
        return Err(Error::Authorization(
            "You can only update your own profile.".to_string(),
        ));
    }

    let update = UserProfileUpdate {
        date_of_birth: payload.date_of_birth,
        street: payload.street,
        city: payload.city,
        postal_code: payload.postal_code,
        phone_number: payload.phone_number,
        image_url: payload.image_url,
        emergency_first_name: payload.emergency_first_name,
        emergency_last_name: payload.emergency_last_name,
        emergency_relationship: payload.emergency_relationship,
        emergency_phone_number: payload.emergency_phone_number,
        has_allergies: payload.has_allergies,
        allergy_details: payload.allergy_details,
        previous_experience: payload.previous_experience,
        experience_details: payload.experience_details,
        interested_in_beginner_lessons: payload.interested_in_beginner_lessons,
        ..UserProfileUpdate::default()
    };

    let updated = state
        .repos
        .users
        .update_profile(user_id, &update)
        .await?
        .ok_or_else(|| Error::NotFound("User not found.".to_string()))?;

    Ok(Json(ApiBody::with_data("User updated successfully.", updated)))
}

/// GET /v1/users (admin)
pub async fn list_users(
    AdminUser(_session): AdminUser,
    State(state): State<MembersState>,
) -> Result<impl IntoResponse> {
    let users = state.repos.users.list_all().await?;
    Ok(Json(ApiBody::with_data("Users found.", users)))
}
