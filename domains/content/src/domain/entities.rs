//! Domain entities for the content domain
//!
//! Club-facing content: coaching/committee team members, competition
//! records, the archer leaderboard, and incoming contact messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use longbow_common::{Error, Result};

/// Bow discipline a leaderboard entry is ranked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "bow_type", rename_all = "lowercase")]
pub enum BowType {
    General,
    Recurve,
    Compound,
    Barebow,
}

impl BowType {
    pub const ALL: [BowType; 4] = [
        BowType::General,
        BowType::Recurve,
        BowType::Compound,
        BowType::Barebow,
    ];
}

impl std::fmt::Display for BowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BowType::General => write!(f, "General"),
            BowType::Recurve => write!(f, "Recurve"),
            BowType::Compound => write!(f, "Compound"),
            BowType::Barebow => write!(f, "Barebow"),
        }
    }
}

/// Coaching or committee member shown on the club site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub context: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn new(name: String, position: String, context: String, image_url: String) -> Result<Self> {
        if name.trim().is_empty() || position.trim().is_empty() {
            return Err(Error::Validation(
                "Name and position are required".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(TeamMember {
            id: Uuid::new_v4(),
            name,
            position,
            context,
            image_url,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Competition result achieved by the club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: Uuid,
    pub competition: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub rank: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    pub fn new(
        competition: String,
        location: String,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        rank: String,
        image_url: String,
    ) -> Result<Self> {
        if end_date < start_date {
            return Err(Error::Validation(
                "End date cannot be before start date".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Record {
            id: Uuid::new_v4(),
            competition,
            location,
            start_date,
            end_date,
            rank,
            image_url,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Leaderboard entry. One row per (bow type, archer), enforced by a
/// unique index; points accumulate across updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArcherRank {
    pub id: Uuid,
    pub full_name: String,
    pub point: i32,
    #[serde(rename = "type")]
    pub bow_type: BowType,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArcherRank {
    pub fn new(full_name: String, point: i32, bow_type: BowType, image_url: String) -> Result<Self> {
        let full_name = full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(Error::Validation("Full name is required".to_string()));
        }
        if point < 0 {
            return Err(Error::Validation("Points cannot be negative".to_string()));
        }

        let now = Utc::now();
        Ok(ArcherRank {
            id: Uuid::new_v4(),
            full_name,
            point,
            bow_type,
            image_url,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Message submitted through the contact form. Stored, then forwarded to
/// the club inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub message: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(
        email: String,
        first_name: String,
        last_name: String,
        message: String,
        phone_number: String,
    ) -> Result<Self> {
        if !email.validate_email() {
            return Err(Error::Validation("Invalid email address".to_string()));
        }
        if message.trim().is_empty() {
            return Err(Error::Validation("Message is required".to_string()));
        }

        let now = Utc::now();
        Ok(ContactMessage {
            id: Uuid::new_v4(),
            email,
            first_name,
            last_name,
            message,
            phone_number,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bow_type_serde_uses_original_casing() {
        let json = serde_json::to_string(&BowType::Recurve).unwrap();
        assert_eq!(json, "\"Recurve\"");
        let parsed: BowType = serde_json::from_str("\"Barebow\"").unwrap();
        assert_eq!(parsed, BowType::Barebow);
    }

    #[test]
    fn test_archer_rank_trims_name() {
        let rank = ArcherRank::new(
            "  Robin Hood  ".to_string(),
            120,
            BowType::General,
            "https://img.example.com/robin.png".to_string(),
        )
        .unwrap();
        assert_eq!(rank.full_name, "Robin Hood");
    }

    #[test]
    fn test_archer_rank_rejects_negative_points() {
        let result = ArcherRank::new(
            "Robin Hood".to_string(),
            -5,
            BowType::General,
            String::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_record_rejects_inverted_dates() {
        let start = Utc::now();
        let end = start - chrono::Duration::days(1);
        let result = Record::new(
            "Nationals".to_string(),
            "Lagos".to_string(),
            start,
            end,
            "1st".to_string(),
            String::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_contact_message_requires_valid_email() {
        let result = ContactMessage::new(
            "nope".to_string(),
            "Ada".to_string(),
            "Okoro".to_string(),
            "Hello".to_string(),
            "+2348000000000".to_string(),
        );
        assert!(result.is_err());
    }
}
