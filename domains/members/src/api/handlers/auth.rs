//! Auth and registration funnel handlers
//!
//! Implements the onboarding flow:
//! - POST /v1/auth/register - Create a member and their provider customer
//! - PUT /v1/auth/register/acknowledgment/{user_id} - Waiver acknowledgement
//! - PUT /v1/auth/register/conduct/{user_id} - Code of conduct signature
//! - PUT /v1/auth/register/subscribe/{user_id} - Pick a plan and start checkout
//! - POST /v1/auth/login, GET /v1/auth/refresh, GET /v1/auth/logout

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

use longbow_auth::{AnyTokenUser, RefreshUser};
use longbow_common::{hash_password, verify_password, ApiBody, Error, RepositoryError, Result, ValidatedJson};

use crate::api::handlers::provider_error;
use crate::api::middleware::MembersState;
use crate::domain::entities::{RegistrationStatus, Subscription, User};
use crate::domain::state::{RegistrationEvent, RegistrationFunnel};
use crate::repository::UserProfileUpdate;

const FUNNEL_REJECTION: &str = "User already filled or not allowed to fill form";

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    pub phone_number: Option<String>,
}

/// Profile details collected alongside the waiver acknowledgement.
#[derive(Debug, Deserialize, Validate)]
pub struct AcknowledgmentRequest {
    pub member_acknowledgement: bool,

    pub date_of_birth: Option<DateTime<Utc>>,
    #[validate(length(max = 255))]
    pub street: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[validate(length(max = 30))]
    pub phone_number: Option<String>,

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

#[derive(Debug, Deserialize, Validate)]
pub struct ConductRequest {
    pub acknowledge_risks: bool,
    pub consent_to_media: bool,

    #[validate(length(min = 1, max = 10))]
    pub initials: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    pub plan_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /v1/auth/register
///
/// Creates the member at the top of the registration funnel and registers
/// them as a customer at the payment provider. Duplicate emails are
/// rejected both here and by the unique index on `users.email`.
pub async fn register(
    State(state): State<MembersState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse> {
    if state.repos.users.find_by_email(&payload.email).await?.is_some() {
        return Err(Error::Conflict("User already exists.".to_string()));
    }

    let mut user = User::new(
        payload.email.clone(),
        hash_password(&payload.password),
        payload.first_name.clone(),
        payload.last_name.clone(),
    )?;
    user.phone_number = payload.phone_number.clone();

    let customer = state
        .payments
        .create_customer(
            &payload.email,
            &payload.first_name,
            &payload.last_name,
            payload.phone_number.as_deref().unwrap_or(""),
        )
        .await
        .map_err(provider_error)?;
    user.customer_code = Some(customer.customer_code);

    let created = state.repos.users.create(&user).await.map_err(|e| match e {
        RepositoryError::AlreadyExists => Error::Conflict("User already exists.".to_string()),
        other => other.into(),
    })?;

    tracing::info!(user_id = %created.id, "Member registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiBody::with_data(
            "User registered successfully.",
            json!({
                "user_id": created.id,
                "email": created.email,
            }),
        )),
    ))
}

/// PUT /v1/auth/register/acknowledgment/{user_id}
///
/// Records the membership acknowledgement and profile details, moving the
/// funnel from `terms_condition` to `waiver`. Any other starting position
/// is rejected.
pub async fn acknowledgment(
    State(state): State<MembersState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AcknowledgmentRequest>,
) -> Result<impl IntoResponse> {
    let user = state
        .repos
        .users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found.".to_string()))?;

    if !payload.member_acknowledgement {
        return Err(Error::Validation(FUNNEL_REJECTION.to_string()));
    }

    let next = RegistrationFunnel::transition(user.status, RegistrationEvent::Acknowledge)
        .map_err(|_| Error::Validation(FUNNEL_REJECTION.to_string()))?;

    let update = UserProfileUpdate {
        date_of_birth: payload.date_of_birth,
        street: payload.street,
        city: payload.city,
        postal_code: payload.postal_code,
        phone_number: payload.phone_number,
        emergency_first_name: payload.emergency_first_name,
        emergency_last_name: payload.emergency_last_name,
        emergency_relationship: payload.emergency_relationship,
        emergency_phone_number: payload.emergency_phone_number,
        has_allergies: payload.has_allergies,
        allergy_details: payload.allergy_details,
        previous_experience: payload.previous_experience,
        experience_details: payload.experience_details,
        interested_in_beginner_lessons: payload.interested_in_beginner_lessons,
        member_acknowledgement: Some(true),
        ..UserProfileUpdate::default()
    };

    state.repos.users.update_profile(user_id, &update).await?;
    state.repos.users.set_status(user_id, next).await?;

    Ok(Json(ApiBody::message("User updated successfully.")))
}

/// PUT /v1/auth/register/conduct/{user_id}
///
/// Records the code-of-conduct signature, moving the funnel to `payment`.
/// Resubmission while payment is pending is allowed but does not rewrite
/// the stored consent.
pub async fn conduct(
    State(state): State<MembersState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ConductRequest>,
) -> Result<impl IntoResponse> {
    let user = state
        .repos
        .users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found.".to_string()))?;

    if !payload.acknowledge_risks || !payload.consent_to_media {
        return Err(Error::Validation(FUNNEL_REJECTION.to_string()));
    }

    let next = RegistrationFunnel::transition(user.status, RegistrationEvent::SignConduct)
        .map_err(|_| Error::Validation(FUNNEL_REJECTION.to_string()))?;

    if user.status != RegistrationStatus::Payment {
        let update = UserProfileUpdate {
            acknowledge_risks: Some(true),
            consent_to_media: Some(true),
            initials: Some(payload.initials),
            ..UserProfileUpdate::default()
        };
        state.repos.users.update_profile(user_id, &update).await?;
        state.repos.users.set_status(user_id, next).await?;
    }

    Ok(Json(ApiBody::message("User updated successfully.")))
}

/// PUT /v1/auth/register/subscribe/{user_id}
///
/// Picks a plan, creates a pending subscription, and opens a hosted
/// checkout at the provider. The charge webhook completes the funnel.
pub async fn subscribe(
    State(state): State<MembersState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SubscribeRequest>,
) -> Result<impl IntoResponse> {
    let plan = state
        .repos
        .plans
        .get_by_id(payload.plan_id)
        .await?
        .ok_or_else(|| Error::NotFound("Plan not found.".to_string()))?;

    let user = state
        .repos
        .users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found.".to_string()))?;

    if state.repos.subscriptions.find_by_user_id(user_id).await?.is_some() {
        return Err(Error::Conflict(
            "User already has an active subscription.".to_string(),
        ));
    }

    let subscription = Subscription::new(&user, &plan);
    let created = state
        .repos
        .subscriptions
        .create(&subscription)
        .await
        .map_err(|e| match e {
            RepositoryError::AlreadyExists => {
                Error::Conflict("User already has an active subscription.".to_string())
            }
            other => other.into(),
        })?;

    state.repos.users.set_plan(user_id, plan.id).await?;

    // Metadata round-trips through the provider and drives the
    // charge.success dispatch branch.
    let metadata = json!({
        "custom": {
            "type": "subscription",
            "plan_code": plan.plan_code,
            "customer_code": user.customer_code,
        }
    });
    let checkout = state
        .payments
        .initialize_transaction(&user.email, plan.price, plan.plan_code.as_deref(), metadata)
        .await
        .map_err(provider_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiBody::with_data(
            "Subscription created successfully.",
            json!({
                "subscription_id": created.id,
                "user_id": created.user_id,
                "plan_id": created.plan_id,
                "status": created.status,
                "authorization_url": checkout.authorization_url,
            }),
        )),
    ))
}

/// POST /v1/auth/login
pub async fn login(
    State(state): State<MembersState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse> {
    let user = state
        .repos
        .users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| Error::Authentication("User not found.".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(Error::Authentication(
            "Invalid email or password.".to_string(),
        ));
    }

    let tokens = state
        .auth
        .issue_token_pair(user.id, user.role)
        .map_err(|e| Error::Internal(e.to_string()))?;

    Ok(Json(ApiBody::with_data(
        "User logged in successfully.",
        json!({
            "access_token": tokens.access_token,
            "refresh_token": tokens.refresh_token,
            "status": user.status,
            "plan_id": user.plan_id,
        }),
    )))
}

/// GET /v1/auth/refresh
///
/// Refresh-token-only; issues a fresh access token.
pub async fn refresh(
    RefreshUser(session): RefreshUser,
    State(state): State<MembersState>,
) -> Result<impl IntoResponse> {
    let access_token = state
        .auth
        .issue_access_token(session.user_id, session.role)
        .map_err(|e| Error::Internal(e.to_string()))?;

    Ok(Json(ApiBody::with_data(
        "Access token refreshed successfully.",
        json!({ "access_token": access_token }),
    )))
}

/// GET /v1/auth/logout
///
/// Accepts either token type and denylists its jti. Replaying a logout
/// is a no-op.
pub async fn logout(
    AnyTokenUser(session): AnyTokenUser,
    State(state): State<MembersState>,
) -> Result<impl IntoResponse> {
    state
        .auth
        .revoke(&session.jti)
        .await
        .map_err(|e| Error::Internal(e.to_string()))?;

    Ok(Json(ApiBody::message(format!(
        "{} token revoked successfully",
        session.token_type
    ))))
}
