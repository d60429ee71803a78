//! Domain entities for the billing domain
//!
//! Walk-in day passes and competition registrants. Both are paid for
//! through hosted checkouts and confirmed by the charge webhook.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use longbow_common::{Error, Result};

/// Hard cap on day passes sold for a single calendar day.
pub const MAX_WALK_INS_PER_DAY: i64 = 6;

/// Competition entry fee in major units, by discipline category.
pub fn competition_entry_fee(category: Option<&str>) -> i64 {
    match category {
        Some("youth") | Some("junior") => 5_000,
        _ => 10_000,
    }
}

/// Whether a competition entry has been paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Unpaid => write!(f, "unpaid"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

/// A single-visit day pass. Created only by the charge webhook once the
/// payment has cleared; `amount` is stored in major units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WalkIn {
    pub id: Uuid,
    pub email: String,
    pub entry_date: NaiveDate,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WalkIn {
    pub fn new(email: String, entry_date: NaiveDate, amount: i64) -> Self {
        let now = Utc::now();
        WalkIn {
            id: Uuid::new_v4(),
            email,
            entry_date,
            amount,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Competition registrant, independent of club membership.
///
/// `unique_id` travels through the provider's checkout metadata and is
/// how the charge webhook finds the entry to mark paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChampionUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub event_date: DateTime<Utc>,
    pub phone_number: String,
    pub image_url: Option<String>,
    pub sex: Option<String>,

    // Team / club
    pub association: Option<String>,
    pub nationality: Option<String>,
    pub language: Option<String>,

    // Place of departure
    pub state: Option<String>,
    pub country: Option<String>,

    // Discipline
    pub category: Option<String>,
    pub distance: Option<String>,

    pub payment_status: PaymentStatus,
    pub unique_id: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChampionUser {
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        event_date: DateTime<Utc>,
        phone_number: String,
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
        Ok(ChampionUser {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            event_date,
            phone_number,
            image_url: None,
            sex: None,
            association: None,
            nationality: None,
            language: None,
            state: None,
            country: None,
            category: None,
            distance: None,
            payment_status: PaymentStatus::Unpaid,
            unique_id: Uuid::new_v4().simple().to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Entry fee in major units for this registrant's category.
    pub fn entry_fee(&self) -> i64 {
        competition_entry_fee(self.category.as_deref())
    }
}
