//! Walk-in repository

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::entities::WalkIn;
use longbow_common::RepositoryError;

const WALK_IN_COLUMNS: &str = "id, email, entry_date, amount, created_at, updated_at";

#[derive(Clone)]
pub struct WalkInRepository {
    pool: PgPool,
}

impl WalkInRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, walk_in: &WalkIn) -> Result<WalkIn, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO walk_ins (id, email, entry_date, amount, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {WALK_IN_COLUMNS}
            "#
        );

        sqlx::query_as::<_, WalkIn>(&sql)
            .bind(walk_in.id)
            .bind(&walk_in.email)
            .bind(walk_in.entry_date)
            .bind(walk_in.amount)
            .bind(walk_in.created_at)
            .bind(walk_in.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    /// Passes already sold for a calendar day. Consulted before opening
    /// a checkout so the cap rejects the seventh visitor.
    pub async fn count_for_entry_date(
        &self,
        entry_date: NaiveDate,
    ) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM walk_ins WHERE entry_date = $1")
                .bind(entry_date)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn list_all(&self) -> Result<Vec<WalkIn>, RepositoryError> {
        let sql = format!(
            "SELECT {WALK_IN_COLUMNS} FROM walk_ins ORDER BY entry_date DESC, created_at DESC"
        );
        let walk_ins = sqlx::query_as::<_, WalkIn>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(walk_ins)
    }
}
