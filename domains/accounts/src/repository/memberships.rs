//! Team membership repository

use crate::domain::entities::{MembershipRole, TeamMembership};
use chrono::{DateTime, Utc};
use showcase_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// All columns in the team_memberships table.
const MEMBERSHIP_COLUMNS: &str = "id, team_id, user_id, role, joined_at";

/// Membership joined with the member's public identity
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct MembershipWithUser {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: MembershipRole,
    pub joined_at: DateTime<Utc>,
    pub username: String,
    pub display_name: Option<String>,
}

#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's membership in a team
    pub async fn get_by_team_and_user(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TeamMembership>> {
        let query = format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM team_memberships \
             WHERE team_id = $1 AND user_id = $2"
        );
        let membership = sqlx::query_as::<_, TeamMembership>(&query)
            .bind(team_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(membership)
    }

    /// List members of a team with their identities
    pub async fn list_for_team(&self, team_id: Uuid) -> Result<Vec<MembershipWithUser>> {
        let members = sqlx::query_as::<_, MembershipWithUser>(
            "SELECT m.id, m.team_id, m.user_id, m.role, m.joined_at, \
                    u.username, u.display_name \
             FROM team_memberships m \
             INNER JOIN users u ON u.id = m.user_id \
             WHERE m.team_id = $1 \
             ORDER BY m.joined_at ASC",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Add a member to a team
    pub async fn create(&self, membership: &TeamMembership) -> Result<TeamMembership> {
        let query = format!(
            "INSERT INTO team_memberships ({MEMBERSHIP_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {MEMBERSHIP_COLUMNS}"
        );
        let created = sqlx::query_as::<_, TeamMembership>(&query)
            .bind(membership.id)
            .bind(membership.team_id)
            .bind(membership.user_id)
            .bind(membership.role)
            .bind(membership.joined_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Remove a member from a team
    pub async fn delete(&self, team_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM team_memberships WHERE team_id = $1 AND user_id = $2",
        )
        .bind(team_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
