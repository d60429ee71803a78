//! Subscription repository

use crate::domain::entities::{Subscription, SubscriptionStatus};
use chrono::{DateTime, Utc};
use longbow_common::RepositoryError;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

const SUBSCRIPTION_COLUMNS: &str = r#"
    id, user_id, plan_id, email, subscription_code, email_token,
    status, start_date, end_date, created_at, updated_at
"#;

/// Admin listing row: subscription joined with the owning member.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SubscriptionWithUser {
    pub name: String,
    pub image_url: Option<String>,
    pub email: String,
    pub status: SubscriptionStatus,
}

/// Active-member count per plan for the admin dashboard.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PlanActiveUsers {
    pub plan_name: String,
    pub active_users: i64,
}

#[derive(Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a subscription. The UNIQUE(user_id, plan_id) index is the
    /// arbiter of duplicates.
    pub async fn create(
        &self,
        subscription: &Subscription,
    ) -> Result<Subscription, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO subscriptions (id, user_id, plan_id, email, subscription_code,
                                       email_token, status, start_date, end_date,
                                       created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {SUBSCRIPTION_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Subscription>(&sql)
            .bind(subscription.id)
            .bind(subscription.user_id)
            .bind(subscription.plan_id)
            .bind(&subscription.email)
            .bind(&subscription.subscription_code)
            .bind(&subscription.email_token)
            .bind(subscription.status)
            .bind(subscription.start_date)
            .bind(subscription.end_date)
            .bind(subscription.created_at)
            .bind(subscription.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    /// Insert or refresh the subscription for a (user, plan) pair.
    ///
    /// Webhook deliveries can be replayed by the provider; the upsert on
    /// the natural key keeps replays from producing duplicate rows.
    pub async fn upsert(
        &self,
        subscription: &Subscription,
    ) -> Result<Subscription, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO subscriptions (id, user_id, plan_id, email, subscription_code,
                                       email_token, status, start_date, end_date,
                                       created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id, plan_id) DO UPDATE SET
                email = EXCLUDED.email,
                subscription_code = EXCLUDED.subscription_code,
                email_token = EXCLUDED.email_token,
                status = EXCLUDED.status,
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                updated_at = NOW()
            RETURNING {SUBSCRIPTION_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Subscription>(&sql)
            .bind(subscription.id)
            .bind(subscription.user_id)
            .bind(subscription.plan_id)
            .bind(&subscription.email)
            .bind(&subscription.subscription_code)
            .bind(&subscription.email_token)
            .bind(subscription.status)
            .bind(subscription.start_date)
            .bind(subscription.end_date)
            .bind(subscription.created_at)
            .bind(subscription.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Subscription>, RepositoryError> {
        let sql = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE user_id = $1 LIMIT 1"
        );
        let subscription = sqlx::query_as::<_, Subscription>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(subscription)
    }

    pub async fn find_by_user_and_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Option<Subscription>, RepositoryError> {
        let sql = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE user_id = $1 AND plan_id = $2"
        );
        let subscription = sqlx::query_as::<_, Subscription>(&sql)
            .bind(user_id)
            .bind(plan_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(subscription)
    }

    pub async fn list_all(&self) -> Result<Vec<Subscription>, RepositoryError> {
        let sql = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions ORDER BY created_at DESC"
        );
        let subscriptions = sqlx::query_as::<_, Subscription>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(subscriptions)
    }

    /// Admin listing joined with member name, image, and email.
    pub async fn list_with_user_details(
        &self,
    ) -> Result<Vec<SubscriptionWithUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, SubscriptionWithUser>(
            r#"
            SELECT u.first_name || ' ' || u.last_name AS name,
                   u.image_url,
                   s.email,
                   s.status
            FROM subscriptions s
            JOIN users u ON u.id = s.user_id
            ORDER BY s.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Active-member count per plan, keeping plans with zero active
    /// members and excluding the synthetic registration/walk-in intervals.
    pub async fn active_users_by_plan(&self) -> Result<Vec<PlanActiveUsers>, RepositoryError> {
        let rows = sqlx::query_as::<_, PlanActiveUsers>(
            r#"
            SELECT p.name AS plan_name,
                   COUNT(s.id) FILTER (WHERE s.status = 'active') AS active_users
            FROM plans p
            LEFT JOIN subscriptions s ON s.plan_id = p.id
            WHERE p.interval NOT IN ('registration', 'walk_in')
            GROUP BY p.id, p.name
            ORDER BY p.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: SubscriptionStatus,
    ) -> Result<Option<Subscription>, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE subscriptions SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {SUBSCRIPTION_COLUMNS}
            "#
        );
        let subscription = sqlx::query_as::<_, Subscription>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(subscription)
    }

    /// Set the status of the subscription matching the provider's
    /// (subscription_code, email_token) pair. Returns the number of rows
    /// matched; 0 means the pair is unknown.
    pub async fn set_status_by_codes(
        &self,
        subscription_code: &str,
        email_token: &str,
        status: SubscriptionStatus,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions SET status = $3, updated_at = NOW()
            WHERE subscription_code = $1 AND email_token = $2
            "#,
        )
        .bind(subscription_code)
        .bind(email_token)
        .bind(status)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Mark a subscription non-renewing with its final end date.
    pub async fn stop_renewal_by_codes(
        &self,
        subscription_code: &str,
        email_token: &str,
        status: SubscriptionStatus,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions SET status = $3, end_date = $4, updated_at = NOW()
            WHERE subscription_code = $1 AND email_token = $2
            "#,
        )
        .bind(subscription_code)
        .bind(email_token)
        .bind(status)
        .bind(end_date)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
