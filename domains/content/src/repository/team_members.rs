//! Team member repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::TeamMember;
use longbow_common::RepositoryError;

const TEAM_COLUMNS: &str = "id, name, position, context, image_url, created_at, updated_at";

/// Fields a team member entry can change after creation.
#[derive(Debug, Clone, Default)]
pub struct TeamMemberUpdate {
    pub name: Option<String>,
    pub position: Option<String>,
    pub context: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct TeamMemberRepository {
    pool: PgPool,
}

impl TeamMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, member: &TeamMember) -> Result<TeamMember, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO team_members (id, name, position, context, image_url,
                                      created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TEAM_COLUMNS}
            "#
        );

        sqlx::query_as::<_, TeamMember>(&sql)
            .bind(member.id)
            .bind(&member.name)
            .bind(&member.position)
            .bind(&member.context)
            .bind(&member.image_url)
            .bind(member.created_at)
            .bind(member.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<TeamMember>, RepositoryError> {
        let sql = format!("SELECT {TEAM_COLUMNS} FROM team_members WHERE id = $1");
        let member = sqlx::query_as::<_, TeamMember>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    pub async fn list_all(&self) -> Result<Vec<TeamMember>, RepositoryError> {
        let sql = format!("SELECT {TEAM_COLUMNS} FROM team_members ORDER BY created_at ASC");
        let members = sqlx::query_as::<_, TeamMember>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }

    pub async fn update(
        &self,
        id: Uuid,
        update: &TeamMemberUpdate,
    ) -> Result<Option<TeamMember>, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE team_members SET
                name = COALESCE($2, name),
                position = COALESCE($3, position),
                context = COALESCE($4, context),
                image_url = COALESCE($5, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TEAM_COLUMNS}
            "#
        );

        let member = sqlx::query_as::<_, TeamMember>(&sql)
            .bind(id)
            .bind(&update.name)
            .bind(&update.position)
            .bind(&update.context)
            .bind(&update.image_url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
