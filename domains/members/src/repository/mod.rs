//! Repository implementations for the members domain

pub mod payment_history;
pub mod plans;
pub mod subscriptions;
pub mod transactions;
pub mod users;

use sqlx::{PgPool, Postgres, Transaction};

pub use payment_history::PaymentHistoryRepository;
pub use plans::{PlanRepository, PlanUpdate, PlanUpdateOutcome};
pub use subscriptions::{PlanActiveUsers, SubscriptionRepository, SubscriptionWithUser};
pub use transactions::{append_payment_history_tx, update_subscription_from_invoice_tx};
pub use users::{UserProfileUpdate, UserRepository};

/// Combined repository access for the members domain
#[derive(Clone)]
pub struct MembersRepositories {
    pool: PgPool,
    pub users: UserRepository,
    pub plans: PlanRepository,
    pub subscriptions: SubscriptionRepository,
    pub payment_history: PaymentHistoryRepository,
}

impl MembersRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            plans: PlanRepository::new(pool.clone()),
            subscriptions: SubscriptionRepository::new(pool.clone()),
            payment_history: PaymentHistoryRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
