//! HTTP handlers for the billing domain

pub mod champions;
pub mod walk_ins;
pub mod webhook;

use longbow_common::Error;
use longbow_paystack::PaymentError;

/// Map payment provider failures onto the API error type.
pub(crate) fn provider_error(err: PaymentError) -> Error {
    match err {
        PaymentError::Rejected(message) => Error::Provider(message),
        other => Error::Internal(other.to_string()),
    }
}
