//! Contact message repository
//!
//! Pure storage; forwarding the message by email happens in the handler
//! layer, not here.

use sqlx::PgPool;

use crate::domain::entities::ContactMessage;
use longbow_common::RepositoryError;

const CONTACT_COLUMNS: &str =
    "id, email, first_name, last_name, message, phone_number, created_at, updated_at";

#[derive(Clone)]
pub struct ContactMessageRepository {
    pool: PgPool,
}

impl ContactMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        message: &ContactMessage,
    ) -> Result<ContactMessage, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO contact_messages (id, email, first_name, last_name, message,
                                          phone_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CONTACT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(message.id)
            .bind(&message.email)
            .bind(&message.first_name)
            .bind(&message.last_name)
            .bind(&message.message)
            .bind(&message.phone_number)
            .bind(message.created_at)
            .bind(message.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    pub async fn list_all(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let sql = format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_messages ORDER BY created_at DESC"
        );
        let messages = sqlx::query_as::<_, ContactMessage>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(messages)
    }
}
