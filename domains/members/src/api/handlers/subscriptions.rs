//! Subscription management handlers
//!
//! - GET /v1/subscriptions - Admin listing with member details
//! - GET /v1/subscriptions/stats - Active members per plan
//! - POST /v1/subscriptions/upgrade - Move to a different plan

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use longbow_auth::{AdminUser, AuthUser};
use longbow_common::{ApiBody, Error, Result, ValidatedJson};

use crate::api::handlers::provider_error;
use crate::api::middleware::MembersState;
use crate::domain::entities::Subscription;
use crate::domain::state::{SubscriptionEvent, SubscriptionStateMachine};

#[derive(Debug, Deserialize, Validate)]
pub struct UpgradeRequest {
    pub plan_id: Uuid,
}

/// GET /v1/subscriptions (admin)
pub async fn list_subscriptions(
    AdminUser(_session): AdminUser,
    State(state): State<MembersState>,
) -> Result<impl IntoResponse> {
    let subscriptions = state.repos.subscriptions.list_with_user_details().await?;

    if subscriptions.is_empty() {
        return Err(Error::NotFound("Subscriptions not found.".to_string()));
    }

    Ok(Json(ApiBody::with_data(
        "Subscriptions found.",
        subscriptions,
    )))
}

/// GET /v1/subscriptions/stats (admin)
///
/// Active-member counts per plan, excluding the synthetic registration
/// and walk-in intervals.
pub async fn subscription_stats(
    AdminUser(_session): AdminUser,
    State(state): State<MembersState>,
) -> Result<impl IntoResponse> {
    let stats = state.repos.subscriptions.active_users_by_plan().await?;
    Ok(Json(ApiBody::with_data("Subscription stats found.", stats)))
}

/// POST /v1/subscriptions/upgrade
///
/// Two paths: no subscription exists for (member, target plan) yet, so a
/// pending one is created and a checkout opened; or one exists, so it is
/// re-enabled both locally and at the provider.
pub async fn upgrade_subscription(
    AuthUser(session): AuthUser,
    State(state): State<MembersState>,
    ValidatedJson(payload): ValidatedJson<UpgradeRequest>,
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
        .get_by_id(session.user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found.".to_string()))?;

    let existing = state
        .repos
        .subscriptions
        .find_by_user_and_plan(user.id, plan.id)
        .await?;

    match existing {
        None => {
            let subscription = Subscription::new(&user, &plan);
            let created = state.repos.subscriptions.create(&subscription).await?;

            let metadata = json!({
                "custom": {
                    "type": "subscription",
                    "plan_code": plan.plan_code,
                    "customer_code": user.customer_code,
                }
            });
            let checkout = state
                .payments
                .initialize_transaction(
                    &user.email,
                    plan.price,
                    plan.plan_code.as_deref(),
                    metadata,
                )
                .await
                .map_err(provider_error)?;

            Ok((
                StatusCode::CREATED,
                Json(ApiBody::with_data(
                    "Subscription created successfully.",
                    json!({
                        "subscription_id": created.id,
                        "plan_id": created.plan_id,
                        "status": created.status,
                        "authorization_url": checkout.authorization_url,
                    }),
                )),
            )
                .into_response())
        }
        Some(subscription) => {
            let next =
                SubscriptionStateMachine::transition(subscription.status, SubscriptionEvent::Enable)?;

            if let (Some(code), Some(token)) = (
                subscription.subscription_code.as_deref(),
                subscription.email_token.as_deref(),
            ) {
                state
                    .payments
                    .enable_subscription(code, token)
                    .await
                    .map_err(provider_error)?;
            }

            let updated = state
                .repos
                .subscriptions
                .set_status(subscription.id, next)
                .await?
                .ok_or_else(|| Error::NotFound("Subscription not found.".to_string()))?;

            state.repos.users.set_plan(user.id, plan.id).await?;

            Ok(Json(ApiBody::with_data(
                "Subscription upgraded successfully.",
                json!({
                    "subscription_id": updated.id,
                    "plan_id": updated.plan_id,
                    "status": updated.status,
                }),
            ))
            .into_response())
        }
    }
}
