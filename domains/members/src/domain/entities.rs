//! Domain entities for the Longbow members domain
//!
//! Club members, subscription plans, subscriptions, and the append-only
//! payment history. Enums map to Postgres types via `sqlx::Type`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use longbow_auth::Role;
use longbow_common::{Error, Result};
use validator::ValidateEmail;

/// Registration funnel position. Members move through
/// `terms_condition -> waiver -> payment -> done` during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "registration_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    TermsCondition,
    Waiver,
    Payment,
    Done,
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationStatus::TermsCondition => write!(f, "terms_condition"),
            RegistrationStatus::Waiver => write!(f, "waiver"),
            RegistrationStatus::Payment => write!(f, "payment"),
            RegistrationStatus::Done => write!(f, "done"),
        }
    }
}

/// Billing interval of a plan. `Registration` and `WalkIn` are synthetic
/// intervals used for one-off charges and are excluded from membership
/// aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "plan_interval", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanInterval {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Biannually,
    Annually,
    WalkIn,
    Registration,
}

impl std::fmt::Display for PlanInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlanInterval::Hourly => "hourly",
            PlanInterval::Daily => "daily",
            PlanInterval::Weekly => "weekly",
            PlanInterval::Monthly => "monthly",
            PlanInterval::Quarterly => "quarterly",
            PlanInterval::Biannually => "biannually",
            PlanInterval::Annually => "annually",
            PlanInterval::WalkIn => "walk_in",
            PlanInterval::Registration => "registration",
        };
        write!(f, "{}", s)
    }
}

/// Subscription lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "subscription_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Pending,
    Active,
    Enabled,
    Cancelled,
    NonRenewing,
    Attention,
    Completed,
}

impl SubscriptionStatus {
    /// Parse the status strings Paystack sends on webhook payloads.
    /// The provider spells non-renewing with a hyphen.
    pub fn from_provider(value: &str) -> Result<Self> {
        match value {
            "pending" => Ok(Self::Pending),
            "active" | "success" => Ok(Self::Active),
            "enabled" => Ok(Self::Enabled),
            "cancelled" | "canceled" | "disabled" => Ok(Self::Cancelled),
            "non-renewing" | "non_renewing" => Ok(Self::NonRenewing),
            "attention" => Ok(Self::Attention),
            "completed" | "complete" => Ok(Self::Completed),
            other => Err(Error::Validation(format!(
                "Unknown subscription status: {}",
                other
            ))),
        }
    }

    /// Map an invoice outcome onto a subscription status. Invoice
    /// payloads carry charge outcomes like "failed" that are not
    /// subscription states; anything that is not a known state flags
    /// the subscription for attention instead of refusing the delivery.
    pub fn from_invoice(value: &str) -> Self {
        Self::from_provider(value).unwrap_or(Self::Attention)
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Enabled => "enabled",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::NonRenewing => "non_renewing",
            SubscriptionStatus::Attention => "attention",
            SubscriptionStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

/// Club member.
///
/// The profile fields beyond identity are collected step by step as the
/// member moves through the registration funnel, so most are nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
    pub image_url: Option<String>,

    // Emergency contact
    pub emergency_first_name: Option<String>,
    pub emergency_last_name: Option<String>,
    pub emergency_relationship: Option<String>,
    pub emergency_phone_number: Option<String>,

    // Medical information
    pub has_allergies: Option<bool>,
    pub allergy_details: Option<String>,

    // Archery experience
    pub previous_experience: Option<bool>,
    pub experience_details: Option<String>,
    pub interested_in_beginner_lessons: Option<bool>,

    // Waiver and code-of-conduct consent
    pub member_acknowledgement: Option<bool>,
    pub acknowledge_risks: Option<bool>,
    pub consent_to_media: Option<bool>,
    pub initials: Option<String>,

    pub status: RegistrationStatus,
    pub role: Role,
    pub plan_id: Option<Uuid>,

    // Payment provider identifiers
    pub customer_code: Option<String>,
    pub auth_code: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new member at the start of the registration funnel.
    pub fn new(
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Result<Self> {
        if !email.validate_email() {
            return Err(Error::Validation("Invalid email address".to_string()));
        }
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(Error::Validation(
                "First and last name are required".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            first_name,
            last_name,
            date_of_birth: None,
            street: None,
            city: None,
            postal_code: None,
            phone_number: None,
            image_url: None,
            emergency_first_name: None,
            emergency_last_name: None,
            emergency_relationship: None,
            emergency_phone_number: None,
            has_allergies: None,
            allergy_details: None,
            previous_experience: None,
            experience_details: None,
            interested_in_beginner_lessons: None,
            member_acknowledgement: None,
            acknowledge_risks: None,
            consent_to_media: None,
            initials: None,
            status: RegistrationStatus::TermsCondition,
            role: Role::Member,
            plan_id: None,
            customer_code: None,
            auth_code: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Subscription plan. `price` is stored in minor units (kobo); listings
/// expose `price / 100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Plan {
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

impl Plan {
    pub fn new(
        name: String,
        price: i64,
        benefits: Vec<String>,
        interval: PlanInterval,
        duration_days: i32,
        plan_code: Option<String>,
    ) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::Validation("Plan name is required".to_string()));
        }
        if price < 0 {
            return Err(Error::Validation("Price cannot be negative".to_string()));
        }
        if duration_days <= 0 {
            return Err(Error::Validation(
                "Plan duration must be at least one day".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Plan {
            id: Uuid::new_v4(),
            plan_code,
            name,
            price,
            benefits,
            interval,
            duration_days,
            created_at: now,
            updated_at: now,
        })
    }

    /// Price in major units for listings and profile summaries.
    pub fn display_price(&self) -> i64 {
        self.price / 100
    }
}

/// A member's subscription to a plan. One row per (user, plan) pair,
/// enforced by a unique index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub email: String,
    pub subscription_code: Option<String>,
    pub email_token: Option<String>,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Create a pending subscription whose end date is derived from the
    /// plan duration.
    pub fn new(user: &User, plan: &Plan) -> Self {
        let now = Utc::now();
        Subscription {
            id: Uuid::new_v4(),
            user_id: user.id,
            plan_id: plan.id,
            email: user.email.clone(),
            subscription_code: None,
            email_token: None,
            status: SubscriptionStatus::Pending,
            start_date: now,
            end_date: Some(now + Duration::days(plan.duration_days as i64)),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Append-only payment log entry. Referencing user/plan when the payer
/// could be resolved, otherwise carrying the raw email from the charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaymentHistory {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub plan_id: Option<Uuid>,
    pub amount: Option<i64>,
    pub status: String,
    pub reference: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub payment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentHistory {
    /// History row for a resolved member and plan.
    pub fn for_member(
        user_id: Uuid,
        plan_id: Option<Uuid>,
        amount: i64,
        status: String,
        reference: Option<String>,
        name: String,
        payment_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        PaymentHistory {
            id: Uuid::new_v4(),
            user_id: Some(user_id),
            plan_id,
            amount: Some(amount),
            status,
            reference,
            name: Some(name),
            email: None,
            payment_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// History row for a payer known only by email (walk-ins, competition
    /// entries).
    pub fn for_email(
        email: String,
        amount: i64,
        status: String,
        reference: Option<String>,
        payment_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        PaymentHistory {
            id: Uuid::new_v4(),
            user_id: None,
            plan_id: None,
            amount: Some(amount),
            status,
            reference,
            name: None,
            email: Some(email),
            payment_date,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_status_serde() {
        let json = serde_json::to_string(&RegistrationStatus::TermsCondition).unwrap();
        assert_eq!(json, "\"terms_condition\"");
        let parsed: RegistrationStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(parsed, RegistrationStatus::Done);
    }

    #[test]
    fn test_subscription_status_from_provider() {
        assert_eq!(
            SubscriptionStatus::from_provider("non-renewing").unwrap(),
            SubscriptionStatus::NonRenewing
        );
        assert_eq!(
            SubscriptionStatus::from_provider("active").unwrap(),
            SubscriptionStatus::Active
        );
        assert_eq!(
            SubscriptionStatus::from_provider("disabled").unwrap(),
            SubscriptionStatus::Cancelled
        );
        assert!(SubscriptionStatus::from_provider("bogus").is_err());
    }

    #[test]
    fn test_subscription_status_from_invoice_never_rejects() {
        assert_eq!(
            SubscriptionStatus::from_invoice("success"),
            SubscriptionStatus::Active
        );
        // Charge outcomes like "failed" are not subscription states;
        // they flag the subscription instead of bouncing the delivery.
        assert_eq!(
            SubscriptionStatus::from_invoice("failed"),
            SubscriptionStatus::Attention
        );
        assert_eq!(
            SubscriptionStatus::from_invoice("non-renewing"),
            SubscriptionStatus::NonRenewing
        );
    }

    #[test]
    fn test_user_new_rejects_bad_email() {
        let result = User::new(
            "not-an-email".to_string(),
            "hash".to_string(),
            "Robin".to_string(),
            "Hood".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_user_new_starts_at_terms_condition() {
        let user = User::new(
            "robin@sherwood.example".to_string(),
            "hash".to_string(),
            "Robin".to_string(),
            "Hood".to_string(),
        )
        .unwrap();
        assert_eq!(user.status, RegistrationStatus::TermsCondition);
        assert_eq!(user.role, Role::Member);
        assert_eq!(user.full_name(), "Robin Hood");
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User::new(
            "robin@sherwood.example".to_string(),
            "secret-hash".to_string(),
            "Robin".to_string(),
            "Hood".to_string(),
        )
        .unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }

    #[test]
    fn test_plan_display_price_divides_by_100() {
        let plan = Plan::new(
            "Monthly Membership".to_string(),
            2500000,
            vec!["Range access".to_string()],
            PlanInterval::Monthly,
            30,
            None,
        )
        .unwrap();
        assert_eq!(plan.display_price(), 25000);
    }

    #[test]
    fn test_plan_new_validation() {
        assert!(Plan::new(
            "".to_string(),
            100,
            vec![],
            PlanInterval::Monthly,
            30,
            None
        )
        .is_err());
        assert!(Plan::new(
            "Annual".to_string(),
            -1,
            vec![],
            PlanInterval::Annually,
            365,
            None
        )
        .is_err());
        assert!(Plan::new(
            "Annual".to_string(),
            100,
            vec![],
            PlanInterval::Annually,
            0,
            None
        )
        .is_err());
    }

    #[test]
    fn test_subscription_end_date_from_plan_duration() {
        let user = User::new(
            "robin@sherwood.example".to_string(),
            "hash".to_string(),
            "Robin".to_string(),
            "Hood".to_string(),
        )
        .unwrap();
        let plan = Plan::new(
            "Monthly Membership".to_string(),
            2500000,
            vec![],
            PlanInterval::Monthly,
            30,
            None,
        )
        .unwrap();

        let subscription = Subscription::new(&user, &plan);
        assert_eq!(subscription.status, SubscriptionStatus::Pending);
        let end = subscription.end_date.unwrap();
        assert_eq!(end - subscription.start_date, Duration::days(30));
    }
}
