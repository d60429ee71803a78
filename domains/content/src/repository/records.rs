//! Competition record repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::Record;
use longbow_common::RepositoryError;

const RECORD_COLUMNS: &str =
    "id, competition, location, start_date, end_date, rank, image_url, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct RecordUpdate {
    pub competition: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub rank: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct RecordRepository {
    pool: PgPool,
}

impl RecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: &Record) -> Result<Record, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO records (id, competition, location, start_date, end_date,
                                 rank, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {RECORD_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Record>(&sql)
            .bind(record.id)
            .bind(&record.competition)
            .bind(&record.location)
            .bind(record.start_date)
            .bind(record.end_date)
            .bind(&record.rank)
            .bind(&record.image_url)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Record>, RepositoryError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM records WHERE id = $1");
        let record = sqlx::query_as::<_, Record>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    /// Most recent competitions first.
    pub async fn list_all(&self) -> Result<Vec<Record>, RepositoryError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM records ORDER BY start_date DESC");
        let records = sqlx::query_as::<_, Record>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    pub async fn update(
        &self,
        id: Uuid,
        update: &RecordUpdate,
    ) -> Result<Option<Record>, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE records SET
                competition = COALESCE($2, competition),
                location = COALESCE($3, location),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                rank = COALESCE($6, rank),
                image_url = COALESCE($7, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {RECORD_COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, Record>(&sql)
            .bind(id)
            .bind(&update.competition)
            .bind(&update.location)
            .bind(update.start_date)
            .bind(update.end_date)
            .bind(&update.rank)
            .bind(&update.image_url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
