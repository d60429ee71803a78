//! State machines for the members domain
//!
//! Two machines govern the domain:
//! - the registration funnel a new member walks through
//!   (`terms_condition -> waiver -> payment -> done`), and
//! - the subscription lifecycle driven by user actions and provider
//!   webhook events.

use longbow_common::StateError;

use crate::domain::entities::{RegistrationStatus, SubscriptionStatus};

// ============================================================================
// Registration Funnel
// ============================================================================

/// Events that advance a member through the registration funnel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegistrationEvent {
    /// Member signs the membership acknowledgement form
    Acknowledge,
    /// Member signs the range rules and code-of-conduct waiver
    SignConduct,
    /// A successful subscription charge completes onboarding
    CompletePayment,
}

impl std::fmt::Display for RegistrationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Acknowledge => write!(f, "acknowledge"),
            Self::SignConduct => write!(f, "sign_conduct"),
            Self::CompletePayment => write!(f, "complete_payment"),
        }
    }
}

/// Registration funnel state machine
pub struct RegistrationFunnel;

impl RegistrationFunnel {
    /// Attempt a funnel transition.
    ///
    /// Re-signing the conduct form from the payment step is allowed (the
    /// member may revise their answers until they pay), which makes
    /// `SignConduct` a self-loop on `Payment`.
    pub fn transition(
        current: RegistrationStatus,
        event: RegistrationEvent,
    ) -> Result<RegistrationStatus, StateError> {
        if current == RegistrationStatus::Done {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (RegistrationStatus::TermsCondition, RegistrationEvent::Acknowledge) => {
                RegistrationStatus::Waiver
            }
            (RegistrationStatus::Waiver, RegistrationEvent::SignConduct) => {
                RegistrationStatus::Payment
            }
            (RegistrationStatus::Payment, RegistrationEvent::SignConduct) => {
                RegistrationStatus::Payment
            }
            (RegistrationStatus::Payment, RegistrationEvent::CompletePayment) => {
                RegistrationStatus::Done
            }
            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    to: "unknown".to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: RegistrationStatus, event: RegistrationEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}

// ============================================================================
// Subscription Lifecycle
// ============================================================================

/// Events that drive the subscription lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubscriptionEvent {
    /// First successful charge activates the subscription
    Activate,
    /// Member re-enables a subscription (upgrade path)
    Enable,
    /// Member or provider cancels the subscription
    Cancel,
    /// Provider reports the subscription will not renew
    StopRenewal,
    /// Provider flags the subscription for attention (failed charge)
    FlagAttention,
    /// Subscription reaches its end date
    Complete,
}

impl std::fmt::Display for SubscriptionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Activate => write!(f, "activate"),
            Self::Enable => write!(f, "enable"),
            Self::Cancel => write!(f, "cancel"),
            Self::StopRenewal => write!(f, "stop_renewal"),
            Self::FlagAttention => write!(f, "flag_attention"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Subscription lifecycle state machine
pub struct SubscriptionStateMachine;

impl SubscriptionStateMachine {
    pub fn transition(
        current: SubscriptionStatus,
        event: SubscriptionEvent,
    ) -> Result<SubscriptionStatus, StateError> {
        if matches!(
            current,
            SubscriptionStatus::Cancelled | SubscriptionStatus::Completed
        ) {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (SubscriptionStatus::Pending, SubscriptionEvent::Activate) => {
                SubscriptionStatus::Active
            }
            (SubscriptionStatus::Pending, SubscriptionEvent::Enable) => {
                SubscriptionStatus::Enabled
            }
            (SubscriptionStatus::Pending, SubscriptionEvent::Cancel) => {
                SubscriptionStatus::Cancelled
            }

            (SubscriptionStatus::Active, SubscriptionEvent::Cancel)
            | (SubscriptionStatus::Enabled, SubscriptionEvent::Cancel) => {
                SubscriptionStatus::Cancelled
            }
            (SubscriptionStatus::Active, SubscriptionEvent::StopRenewal)
            | (SubscriptionStatus::Enabled, SubscriptionEvent::StopRenewal) => {
                SubscriptionStatus::NonRenewing
            }
            (SubscriptionStatus::Active, SubscriptionEvent::FlagAttention)
            | (SubscriptionStatus::Enabled, SubscriptionEvent::FlagAttention) => {
                SubscriptionStatus::Attention
            }
            (SubscriptionStatus::Active, SubscriptionEvent::Complete)
            | (SubscriptionStatus::Enabled, SubscriptionEvent::Complete) => {
                SubscriptionStatus::Completed
            }
            (SubscriptionStatus::Active, SubscriptionEvent::Enable) => {
                SubscriptionStatus::Enabled
            }

            // A non-renewing subscription can be re-enabled before it runs out,
            // or run to completion, or be cancelled outright.
            (SubscriptionStatus::NonRenewing, SubscriptionEvent::Enable) => {
                SubscriptionStatus::Enabled
            }
            (SubscriptionStatus::NonRenewing, SubscriptionEvent::Complete) => {
                SubscriptionStatus::Completed
            }
            (SubscriptionStatus::NonRenewing, SubscriptionEvent::Cancel) => {
                SubscriptionStatus::Cancelled
            }

            // Attention resolves back to active on a successful charge,
            // or the subscription is cancelled.
            (SubscriptionStatus::Attention, SubscriptionEvent::Activate) => {
                SubscriptionStatus::Active
            }
            (SubscriptionStatus::Attention, SubscriptionEvent::Cancel) => {
                SubscriptionStatus::Cancelled
            }

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    to: "unknown".to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    pub fn can_transition(current: SubscriptionStatus, event: SubscriptionEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod registration_funnel {
        use super::*;

        #[test]
        fn test_full_funnel_walk() {
            let waiver = RegistrationFunnel::transition(
                RegistrationStatus::TermsCondition,
                RegistrationEvent::Acknowledge,
            )
            .unwrap();
            assert_eq!(waiver, RegistrationStatus::Waiver);

            let payment =
                RegistrationFunnel::transition(waiver, RegistrationEvent::SignConduct).unwrap();
            assert_eq!(payment, RegistrationStatus::Payment);

            let done =
                RegistrationFunnel::transition(payment, RegistrationEvent::CompletePayment)
                    .unwrap();
            assert_eq!(done, RegistrationStatus::Done);
        }

        #[test]
        fn test_acknowledge_only_from_terms_condition() {
            let result = RegistrationFunnel::transition(
                RegistrationStatus::Waiver,
                RegistrationEvent::Acknowledge,
            );
            assert!(matches!(result, Err(StateError::InvalidTransition { .. })));
        }

        #[test]
        fn test_conduct_allowed_from_payment() {
            // Members may re-sign the conduct form until they pay
            let result = RegistrationFunnel::transition(
                RegistrationStatus::Payment,
                RegistrationEvent::SignConduct,
            );
            assert_eq!(result, Ok(RegistrationStatus::Payment));
        }

        #[test]
        fn test_complete_payment_only_from_payment() {
            let result = RegistrationFunnel::transition(
                RegistrationStatus::Waiver,
                RegistrationEvent::CompletePayment,
            );
            assert!(result.is_err());
        }

        #[test]
        fn test_done_is_terminal() {
            let result = RegistrationFunnel::transition(
                RegistrationStatus::Done,
                RegistrationEvent::SignConduct,
            );
            assert!(matches!(result, Err(StateError::TerminalState(_))));
        }

        #[test]
        fn test_can_transition() {
            assert!(RegistrationFunnel::can_transition(
                RegistrationStatus::TermsCondition,
                RegistrationEvent::Acknowledge
            ));
            assert!(!RegistrationFunnel::can_transition(
                RegistrationStatus::TermsCondition,
                RegistrationEvent::SignConduct
            ));
        }
    }

    mod subscription_lifecycle {
        use super::*;

        #[test]
        fn test_pending_to_active() {
            let result = SubscriptionStateMachine::transition(
                SubscriptionStatus::Pending,
                SubscriptionEvent::Activate,
            );
            assert_eq!(result, Ok(SubscriptionStatus::Active));
        }

        #[test]
        fn test_active_to_non_renewing() {
            let result = SubscriptionStateMachine::transition(
                SubscriptionStatus::Active,
                SubscriptionEvent::StopRenewal,
            );
            assert_eq!(result, Ok(SubscriptionStatus::NonRenewing));
        }

        #[test]
        fn test_non_renewing_can_be_re_enabled() {
            let result = SubscriptionStateMachine::transition(
                SubscriptionStatus::NonRenewing,
                SubscriptionEvent::Enable,
            );
            assert_eq!(result, Ok(SubscriptionStatus::Enabled));
        }

        #[test]
        fn test_attention_resolves_on_activate() {
            let result = SubscriptionStateMachine::transition(
                SubscriptionStatus::Attention,
                SubscriptionEvent::Activate,
            );
            assert_eq!(result, Ok(SubscriptionStatus::Active));
        }

        #[test]
        fn test_cancelled_is_terminal() {
            let result = SubscriptionStateMachine::transition(
                SubscriptionStatus::Cancelled,
                SubscriptionEvent::Enable,
            );
            assert!(matches!(result, Err(StateError::TerminalState(_))));
        }

        #[test]
        fn test_completed_is_terminal() {
            let result = SubscriptionStateMachine::transition(
                SubscriptionStatus::Completed,
                SubscriptionEvent::Activate,
            );
            assert!(matches!(result, Err(StateError::TerminalState(_))));
        }

        #[test]
        fn test_pending_cannot_stop_renewal() {
            let result = SubscriptionStateMachine::transition(
                SubscriptionStatus::Pending,
                SubscriptionEvent::StopRenewal,
            );
            assert!(matches!(result, Err(StateError::InvalidTransition { .. })));
        }
    }
}
