//! Plan repository

use crate::domain::entities::{Plan, PlanInterval};
use longbow_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

const PLAN_COLUMNS: &str =
    "id, plan_code, name, price, benefits, interval, duration_days, created_at, updated_at";

/// Outcome of a plan update, distinguishing a missing row from an update
/// that changed nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanUpdateOutcome {
    Updated(Plan),
    NoChanges,
    NotFound,
}

/// Partial update for a plan; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PlanUpdate {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub benefits: Option<Vec<String>>,
    pub interval: Option<PlanInterval>,
    pub duration_days: Option<i32>,
    pub plan_code: Option<String>,
}

#[derive(Clone)]
pub struct PlanRepository {
    pool: PgPool,
}

impl PlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a plan. The unique index on name turns duplicates into
    /// `RepositoryError::AlreadyExists`.
    pub async fn create(&self, plan: &Plan) -> Result<Plan, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO plans (id, plan_code, name, price, benefits, interval,
                               duration_days, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PLAN_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Plan>(&sql)
            .bind(plan.id)
            .bind(&plan.plan_code)
            .bind(&plan.name)
            .bind(plan.price)
            .bind(&plan.benefits)
            .bind(plan.interval)
            .bind(plan.duration_days)
            .bind(plan.created_at)
            .bind(plan.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Plan>, RepositoryError> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = $1");
        let plan = sqlx::query_as::<_, Plan>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(plan)
    }

    pub async fn find_by_plan_code(
        &self,
        plan_code: &str,
    ) -> Result<Option<Plan>, RepositoryError> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE plan_code = $1");
        let plan = sqlx::query_as::<_, Plan>(&sql)
            .bind(plan_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(plan)
    }

    /// The day-pass plan charged for walk-in visits.
    pub async fn find_walk_in_plan(&self) -> Result<Option<Plan>, RepositoryError> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE interval = 'walk_in'");
        let plan = sqlx::query_as::<_, Plan>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(plan)
    }

    pub async fn list_all(&self) -> Result<Vec<Plan>, RepositoryError> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans ORDER BY price ASC");
        let plans = sqlx::query_as::<_, Plan>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(plans)
    }

    /// Apply a partial update, reporting whether the plan was missing or
    /// the update was a no-op.
    pub async fn update(
        &self,
        id: Uuid,
        update: &PlanUpdate,
    ) -> Result<PlanUpdateOutcome, RepositoryError> {
        let Some(existing) = self.get_by_id(id).await? else {
            return Ok(PlanUpdateOutcome::NotFound);
        };

        let name = update.name.clone().unwrap_or_else(|| existing.name.clone());
        let price = update.price.unwrap_or(existing.price);
        let benefits = update
            .benefits
            .clone()
            .unwrap_or_else(|| existing.benefits.clone());
        let interval = update.interval.unwrap_or(existing.interval);
        let duration_days = update.duration_days.unwrap_or(existing.duration_days);
        let plan_code = update
            .plan_code
            .clone()
            .or_else(|| existing.plan_code.clone());

        let unchanged = name == existing.name
            && price == existing.price
            && benefits == existing.benefits
            && interval == existing.interval
            && duration_days == existing.duration_days
            && plan_code == existing.plan_code;
        if unchanged {
            return Ok(PlanUpdateOutcome::NoChanges);
        }

        let sql = format!(
            r#"
            UPDATE plans SET
                name = $2, price = $3, benefits = $4, interval = $5,
                duration_days = $6, plan_code = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {PLAN_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Plan>(&sql)
            .bind(id)
            .bind(&name)
            .bind(price)
            .bind(&benefits)
            .bind(interval)
            .bind(duration_days)
            .bind(&plan_code)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?;

        Ok(PlanUpdateOutcome::Updated(updated))
    }

    /// Delete a plan; returns false when no row matched.
    pub async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
