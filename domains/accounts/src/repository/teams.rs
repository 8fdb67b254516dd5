//! Team repository

use crate::domain::entities::{MembershipRole, Team};
use showcase_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// All columns in the teams table.
const TEAM_COLUMNS: &str =
    "id, name, description, owner_id, logo_url, is_public, created_at, updated_at";

/// Row shape for the membership join in `list_for_user`
#[derive(sqlx::FromRow)]
struct TeamWithRoleRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    owner_id: Uuid,
    logo_url: Option<String>,
    is_public: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    role: MembershipRole,
}

/// Project summary shown on a team page (cross-domain read of projects).
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct TeamProjectCard {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub is_public: bool,
}

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find team by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Team>> {
        let query = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1");
        let team = sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(team)
    }

    /// Check whether a team name is already taken
    pub async fn name_exists(&self, name: &str) -> Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM teams WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// List teams the user belongs to, with their role
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<(Team, MembershipRole)>> {
        let rows = sqlx::query_as::<_, TeamWithRoleRow>(
            "SELECT t.id, t.name, t.description, t.owner_id, t.logo_url, t.is_public, \
                    t.created_at, t.updated_at, m.role \
             FROM teams t \
             INNER JOIN team_memberships m ON t.id = m.team_id \
             WHERE m.user_id = $1 \
             ORDER BY t.name ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    Team {
                        id: r.id,
                        name: r.name,
                        description: r.description,
                        owner_id: r.owner_id,
                        logo_url: r.logo_url,
                        is_public: r.is_public,
                        created_at: r.created_at,
                        updated_at: r.updated_at,
                    },
                    r.role,
                )
            })
            .collect())
    }

    /// List teams owned by the user
    pub async fn list_owned(&self, user_id: Uuid) -> Result<Vec<Team>> {
        let query =
            format!("SELECT {TEAM_COLUMNS} FROM teams WHERE owner_id = $1 ORDER BY name ASC");
        let teams = sqlx::query_as::<_, Team>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(teams)
    }

    /// Projects assigned to a team, newest first
    pub async fn list_projects(&self, team_id: Uuid) -> Result<Vec<TeamProjectCard>> {
        let projects = sqlx::query_as::<_, TeamProjectCard>(
            "SELECT id, title, slug, status::text AS status, is_public \
             FROM projects WHERE team_id = $1 ORDER BY created_at DESC",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }
}
