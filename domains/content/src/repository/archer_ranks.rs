//! Archer leaderboard repository
//!
//! One row per (bow type, archer); the unique index on that pair is the
//! arbiter of duplicate entries.

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{ArcherRank, BowType};
use longbow_common::RepositoryError;

const RANK_COLUMNS: &str =
    "id, full_name, point, bow_type, image_url, created_at, updated_at";

#[derive(Clone)]
pub struct ArcherRankRepository {
    pool: PgPool,
}

impl ArcherRankRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, rank: &ArcherRank) -> Result<ArcherRank, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO archer_ranks (id, full_name, point, bow_type, image_url,
                                      created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {RANK_COLUMNS}
            "#
        );

        sqlx::query_as::<_, ArcherRank>(&sql)
            .bind(rank.id)
            .bind(&rank.full_name)
            .bind(rank.point)
            .bind(rank.bow_type)
            .bind(&rank.image_url)
            .bind(rank.created_at)
            .bind(rank.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ArcherRank>, RepositoryError> {
        let sql = format!("SELECT {RANK_COLUMNS} FROM archer_ranks WHERE id = $1");
        let rank = sqlx::query_as::<_, ArcherRank>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(rank)
    }

    /// Leaderboard for one discipline, highest points first.
    pub async fn list_by_type(
        &self,
        bow_type: BowType,
    ) -> Result<Vec<ArcherRank>, RepositoryError> {
        let sql = format!(
            "SELECT {RANK_COLUMNS} FROM archer_ranks WHERE bow_type = $1 ORDER BY point DESC"
        );
        let ranks = sqlx::query_as::<_, ArcherRank>(&sql)
            .bind(bow_type)
            .fetch_all(&self.pool)
            .await?;
        Ok(ranks)
    }

    /// Add competition points to an entry. Returns the updated row, or
    /// `None` when no entry matched.
    pub async fn add_points(
        &self,
        id: Uuid,
        points: i32,
    ) -> Result<Option<ArcherRank>, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE archer_ranks SET point = point + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {RANK_COLUMNS}
            "#
        );
        let rank = sqlx::query_as::<_, ArcherRank>(&sql)
            .bind(id)
            .bind(points)
            .fetch_optional(&self.pool)
            .await?;
        Ok(rank)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM archer_ranks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
