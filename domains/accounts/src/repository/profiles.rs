//! User profile repository

use crate::domain::entities::UserProfile;
use chrono::{DateTime, Utc};
use showcase_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// All columns in the user_profiles table.
const PROFILE_COLUMNS: &str = "\
    id, user_id, bio, avatar_url, role, website, location, \
    is_public_portfolio, portfolio_theme, total_projects, total_views, \
    created_at, updated_at";

/// Public-project summary for portfolio pages (cross-domain read of the
/// projects table).
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct ProjectCard {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub view_count: i32,
    pub like_count: i32,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the profile belonging to a user
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1");
        let profile = sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    /// Update profile settings
    pub async fn update(&self, profile: &UserProfile) -> Result<UserProfile> {
        let query = format!(
            "UPDATE user_profiles \
             SET bio = $2, avatar_url = $3, role = $4, website = $5, location = $6, \
                 is_public_portfolio = $7, portfolio_theme = $8, updated_at = NOW() \
             WHERE user_id = $1 RETURNING {PROFILE_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, UserProfile>(&query)
            .bind(profile.user_id)
            .bind(&profile.bio)
            .bind(&profile.avatar_url)
            .bind(profile.role)
            .bind(&profile.website)
            .bind(&profile.location)
            .bind(profile.is_public_portfolio)
            .bind(profile.portfolio_theme)
            .fetch_one(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Bump the portfolio view counter (not called for self-views)
    pub async fn increment_total_views(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE user_profiles SET total_views = total_views + 1 WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Public published projects for a portfolio page, newest first
    pub async fn list_public_projects(&self, user_id: Uuid) -> Result<Vec<ProjectCard>> {
        let projects = sqlx::query_as::<_, ProjectCard>(
            "SELECT id, title, slug, description, thumbnail_url, view_count, like_count, \
                    published_at \
             FROM projects \
             WHERE creator_id = $1 AND is_public = TRUE AND status = 'published' \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }
}
