//! Payment history repository
//!
//! The history table is append-only; there are no update or delete paths.

use crate::domain::entities::PaymentHistory;
use longbow_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

const HISTORY_COLUMNS: &str = r#"
    id, user_id, plan_id, amount, status, reference, name, email,
    payment_date, created_at, updated_at
"#;

#[derive(Clone)]
pub struct PaymentHistoryRepository {
    pool: PgPool,
}

impl PaymentHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        history: &PaymentHistory,
    ) -> Result<PaymentHistory, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO payment_history (id, user_id, plan_id, amount, status, reference,
                                         name, email, payment_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {HISTORY_COLUMNS}
            "#
        );

        sqlx::query_as::<_, PaymentHistory>(&sql)
            .bind(history.id)
            .bind(history.user_id)
            .bind(history.plan_id)
            .bind(history.amount)
            .bind(&history.status)
            .bind(&history.reference)
            .bind(&history.name)
            .bind(&history.email)
            .bind(history.payment_date)
            .bind(history.created_at)
            .bind(history.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    pub async fn list_all(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PaymentHistory>, RepositoryError> {
        let sql = format!(
            r#"
            SELECT {HISTORY_COLUMNS} FROM payment_history
            ORDER BY payment_date DESC
            OFFSET $1 LIMIT $2
            "#
        );
        let rows = sqlx::query_as::<_, PaymentHistory>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PaymentHistory>, RepositoryError> {
        let sql = format!(
            r#"
            SELECT {HISTORY_COLUMNS} FROM payment_history
            WHERE user_id = $1
            ORDER BY payment_date DESC
            "#
        );
        let rows = sqlx::query_as::<_, PaymentHistory>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
