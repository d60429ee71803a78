//! HTTP handlers for the members domain

pub mod auth;
pub mod history;
pub mod plans;
pub mod subscriptions;
pub mod users;

use longbow_common::Error;
use longbow_paystack::PaymentError;

/// Map payment provider failures onto the API error type.
///
/// Provider rejections of a well-formed request surface as 400 with the
/// provider's message; transport and configuration failures are internal.
pub(crate) fn provider_error(err: PaymentError) -> Error {
    match err {
        PaymentError::Rejected(message) => Error::Provider(message),
        other => Error::Internal(other.to_string()),
    }
}
