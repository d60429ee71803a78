//! User repository

use crate::domain::entities::{RegistrationStatus, User};
use longbow_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = r#"
    id, email, password_hash, first_name, last_name, date_of_birth,
    street, city, postal_code, phone_number, image_url,
    emergency_first_name, emergency_last_name, emergency_relationship,
    emergency_phone_number, has_allergies, allergy_details,
    previous_experience, experience_details, interested_in_beginner_lessons,
    member_acknowledgement, acknowledge_risks, consent_to_media, initials,
    status, role, plan_id, customer_code, auth_code, created_at, updated_at
"#;

/// Nullable profile fields a member can fill in as they move through the
/// registration funnel. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UserProfileUpdate {
    pub date_of_birth: Option<chrono::DateTime<chrono::Utc>>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
    pub image_url: Option<String>,
    pub emergency_first_name: Option<String>,
    pub emergency_last_name: Option<String>,
    pub emergency_relationship: Option<String>,
    pub emergency_phone_number: Option<String>,
    pub has_allergies: Option<bool>,
    pub allergy_details: Option<String>,
    pub previous_experience: Option<bool>,
    pub experience_details: Option<String>,
    pub interested_in_beginner_lessons: Option<bool>,
    pub member_acknowledgement: Option<bool>,
    pub acknowledge_risks: Option<bool>,
    pub consent_to_media: Option<bool>,
    pub initials: Option<String>,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new member. The unique index on email is the arbiter of
    /// duplicates; a conflict surfaces as `RepositoryError::AlreadyExists`.
    pub async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO users (
                id, email, password_hash, first_name, last_name,
                phone_number, status, role, customer_code, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone_number)
            .bind(user.status)
            .bind(user.role)
            .bind(&user.customer_code)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_customer_code(
        &self,
        customer_code: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE customer_code = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(customer_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Merge nullable profile fields into the stored row. Each COALESCE
    /// keeps the existing value when the update carries `None`.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: &UserProfileUpdate,
    ) -> Result<Option<User>, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE users SET
                date_of_birth = COALESCE($2, date_of_birth),
                street = COALESCE($3, street),
                city = COALESCE($4, city),
                postal_code = COALESCE($5, postal_code),
                phone_number = COALESCE($6, phone_number),
                image_url = COALESCE($7, image_url),
                emergency_first_name = COALESCE($8, emergency_first_name),
                emergency_last_name = COALESCE($9, emergency_last_name),
                emergency_relationship = COALESCE($10, emergency_relationship),
                emergency_phone_number = COALESCE($11, emergency_phone_number),
                has_allergies = COALESCE($12, has_allergies),
                allergy_details = COALESCE($13, allergy_details),
                previous_experience = COALESCE($14, previous_experience),
                experience_details = COALESCE($15, experience_details),
                interested_in_beginner_lessons = COALESCE($16, interested_in_beginner_lessons),
                member_acknowledgement = COALESCE($17, member_acknowledgement),
                acknowledge_risks = COALESCE($18, acknowledge_risks),
                consent_to_media = COALESCE($19, consent_to_media),
                initials = COALESCE($20, initials),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .bind(update.date_of_birth)
            .bind(&update.street)
            .bind(&update.city)
            .bind(&update.postal_code)
            .bind(&update.phone_number)
            .bind(&update.image_url)
            .bind(&update.emergency_first_name)
            .bind(&update.emergency_last_name)
            .bind(&update.emergency_relationship)
            .bind(&update.emergency_phone_number)
            .bind(update.has_allergies)
            .bind(&update.allergy_details)
            .bind(update.previous_experience)
            .bind(&update.experience_details)
            .bind(update.interested_in_beginner_lessons)
            .bind(update.member_acknowledgement)
            .bind(update.acknowledge_risks)
            .bind(update.consent_to_media)
            .bind(&update.initials)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn set_status(
        &self,
        user_id: Uuid,
        status: RegistrationStatus,
    ) -> Result<Option<User>, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE users SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Repoint a member at a different plan (subscription upgrade path).
    pub async fn set_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Option<User>, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE users SET plan_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .bind(plan_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Leaderboard points accumulated under the member's full name.
    /// Members without a ranking entry score zero.
    pub async fn leaderboard_points(&self, full_name: &str) -> Result<i64, RepositoryError> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(point), 0) FROM archer_ranks WHERE full_name = $1",
        )
        .bind(full_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    /// Advance a member to `done` and record the charge authorization,
    /// but only when they are sitting at the payment step. Returns the
    /// number of rows moved (0 when the member was not at `payment`).
    pub async fn complete_registration(
        &self,
        customer_code: &str,
        auth_code: &str,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET status = 'done', auth_code = $2, updated_at = NOW()
            WHERE customer_code = $1 AND status = 'payment'
            "#,
        )
        .bind(customer_code)
        .bind(auth_code)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
