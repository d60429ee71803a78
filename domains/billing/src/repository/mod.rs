//! Repository implementations for the billing domain

pub mod champion_users;
pub mod walk_ins;

use sqlx::PgPool;

pub use champion_users::{ChampionUserRepository, ChampionUserUpdate};
pub use walk_ins::WalkInRepository;

/// Combined repository access for the billing domain
#[derive(Clone)]
pub struct BillingRepositories {
    pub walk_ins: WalkInRepository,
    pub champion_users: ChampionUserRepository,
}

impl BillingRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            walk_ins: WalkInRepository::new(pool.clone()),
            champion_users: ChampionUserRepository::new(pool),
        }
    }
}
