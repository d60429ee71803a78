//! Champion user repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{ChampionUser, PaymentStatus};
use longbow_common::RepositoryError;

const CHAMPION_COLUMNS: &str = r#"
    id, first_name, last_name, email, event_date, phone_number, image_url, sex,
    association, nationality, language, state, country, category, distance,
    payment_status, unique_id, created_at, updated_at
"#;

/// Team/discipline fields a registrant can fill in after creation.
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ChampionUserUpdate {
    pub association: Option<String>,
    pub nationality: Option<String>,
    pub language: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub distance: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct ChampionUserRepository {
    pool: PgPool,
}

impl ChampionUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, champion: &ChampionUser) -> Result<ChampionUser, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO champion_users (id, first_name, last_name, email, event_date,
                                        phone_number, image_url, sex, association,
                                        nationality, language, state, country, category,
                                        distance, payment_status, unique_id,
                                        created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19)
            RETURNING {CHAMPION_COLUMNS}
            "#
        );

        sqlx::query_as::<_, ChampionUser>(&sql)
            .bind(champion.id)
            .bind(&champion.first_name)
            .bind(&champion.last_name)
            .bind(&champion.email)
            .bind(champion.event_date)
            .bind(&champion.phone_number)
            .bind(&champion.image_url)
            .bind(&champion.sex)
            .bind(&champion.association)
            .bind(&champion.nationality)
            .bind(&champion.language)
            .bind(&champion.state)
            .bind(&champion.country)
            .bind(&champion.category)
            .bind(&champion.distance)
            .bind(champion.payment_status)
            .bind(&champion.unique_id)
            .bind(champion.created_at)
            .bind(champion.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ChampionUser>, RepositoryError> {
        let sql = format!("SELECT {CHAMPION_COLUMNS} FROM champion_users WHERE id = $1");
        let champion = sqlx::query_as::<_, ChampionUser>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(champion)
    }

    pub async fn list_all(&self) -> Result<Vec<ChampionUser>, RepositoryError> {
        let sql = format!(
            "SELECT {CHAMPION_COLUMNS} FROM champion_users ORDER BY event_date DESC"
        );
        let champions = sqlx::query_as::<_, ChampionUser>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(champions)
    }

    /// Apply a partial update; returns `None` when no row matched.
    pub async fn update(
        &self,
        id: Uuid,
        update: &ChampionUserUpdate,
    ) -> Result<Option<ChampionUser>, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE champion_users SET
                association = COALESCE($2, association),
                nationality = COALESCE($3, nationality),
                language = COALESCE($4, language),
                state = COALESCE($5, state),
                country = COALESCE($6, country),
                category = COALESCE($7, category),
                distance = COALESCE($8, distance),
                image_url = COALESCE($9, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CHAMPION_COLUMNS}
            "#
        );

        let champion = sqlx::query_as::<_, ChampionUser>(&sql)
            .bind(id)
            .bind(&update.association)
            .bind(&update.nationality)
            .bind(&update.language)
            .bind(&update.state)
            .bind(&update.country)
            .bind(&update.category)
            .bind(&update.distance)
            .bind(&update.image_url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(champion)
    }

    /// Flip a registrant to paid, matched by the unique ID carried in the
    /// checkout metadata. Returns the number of rows matched.
    pub async fn mark_paid_by_unique_id(&self, unique_id: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE champion_users SET payment_status = $2, updated_at = NOW()
            WHERE unique_id = $1
            "#,
        )
        .bind(unique_id)
        .bind(PaymentStatus::Paid)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
