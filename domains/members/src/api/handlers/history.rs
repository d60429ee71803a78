//! Payment history handlers
//!
//! - GET /v1/history - Admin view of every recorded payment
//! - GET /v1/history/{user_id} - A member's own payments (or any, for admins)

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use longbow_auth::{AdminUser, AuthUser};
use longbow_common::{ApiBody, Error, Pagination, Result};

use crate::api::middleware::MembersState;

/// GET /v1/history (admin, paginated)
pub async fn list_history(
    AdminUser(_session): AdminUser,
    State(state): State<MembersState>,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse> {
    let history = state
        .repos
        .payment_history
        .list_all(page.offset(), page.limit())
        .await?;
    Ok(Json(ApiBody::with_data("Payment histories found.", history)))
}

/// GET /v1/history/{user_id}
pub async fn list_user_history(
    AuthUser(session): AuthUser,
    State(state): State<MembersState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    if session.user_id != user_id && !session.role.is_admin() {
        return Err(Error::Authorization(
            "You can only view your own payment history.".to_string(),
        ));
    }

    let history = state.repos.payment_history.list_by_user(user_id).await?;
    Ok(Json(ApiBody::with_data("Payment histories found.", history)))
}
