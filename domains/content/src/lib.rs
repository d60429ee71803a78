//! Content domain for Longbow
//!
//! Club-facing content: team members, competition records, the archer
//! leaderboard, and contact messages.

pub mod api;
pub mod domain;
pub mod repository;

pub use api::{routes, ContentState};
pub use domain::entities::{ArcherRank, BowType, ContactMessage, Record, TeamMember};
pub use repository::{
    ArcherRankRepository, ContactMessageRepository, ContentRepositories, RecordRepository,
    RecordUpdate, TeamMemberRepository, TeamMemberUpdate,
};
