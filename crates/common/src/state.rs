//! Common state machine error types
//!
//! Shared by the registration-funnel and subscription-lifecycle state
//! machines in the members domain.

use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot transition from {from} to {to} via {event}")]
    InvalidTransition {
        from: String,
        to: String,
        event: String,
    },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),

    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}

/// Rejected transitions surface to clients as 400 validation failures.
impl From<StateError> for crate::Error {
    fn from(err: StateError) -> Self {
        crate::Error::Validation(err.to_string())
    }
}
