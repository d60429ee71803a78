//! Repository implementations for the content domain

pub mod archer_ranks;
pub mod contact_messages;
pub mod records;
pub mod team_members;

use sqlx::PgPool;

pub use archer_ranks::ArcherRankRepository;
pub use contact_messages::ContactMessageRepository;
pub use records::{RecordRepository, RecordUpdate};
pub use team_members::{TeamMemberRepository, TeamMemberUpdate};

/// Combined repository access for the content domain
#[derive(Clone)]
pub struct ContentRepositories {
    pub team_members: TeamMemberRepository,
    pub records: RecordRepository,
    pub archer_ranks: ArcherRankRepository,
    pub contact_messages: ContactMessageRepository,
}

impl ContentRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            team_members: TeamMemberRepository::new(pool.clone()),
            records: RecordRepository::new(pool.clone()),
            archer_ranks: ArcherRankRepository::new(pool.clone()),
            contact_messages: ContactMessageRepository::new(pool),
        }
    }
}
