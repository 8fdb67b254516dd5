//! Project-media association repository

use crate::domain::entities::ProjectMediaAssociation;
use showcase_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// All columns in the project_media table.
const ASSOCIATION_COLUMNS: &str =
    "id, project_id, media_id, display_order, caption, is_cover, added_at";

/// Lightweight project row for edit checks (cross-domain read of projects).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectRef {
    pub id: Uuid,
    pub slug: String,
    pub creator_id: Uuid,
    pub team_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct AssociationRepository {
    pool: PgPool,
}

impl AssociationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find association by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<ProjectMediaAssociation>> {
        let query = format!("SELECT {ASSOCIATION_COLUMNS} FROM project_media WHERE id = $1");
        let association = sqlx::query_as::<_, ProjectMediaAssociation>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(association)
    }

    /// Check whether a media asset is already attached to a project
    pub async fn exists(&self, project_id: Uuid, media_id: Uuid) -> Result<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM project_media WHERE project_id = $1 AND media_id = $2)",
        )
        .bind(project_id)
        .bind(media_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Current number of attachments on a project (used to append at
    /// the end of the display order)
    pub async fn count_for_project(&self, project_id: Uuid) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM project_media WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Attach a media asset to a project
    pub async fn create(
        &self,
        association: &ProjectMediaAssociation,
    ) -> Result<ProjectMediaAssociation> {
        let query = format!(
            "INSERT INTO project_media ({ASSOCIATION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {ASSOCIATION_COLUMNS}"
        );
        let created = sqlx::query_as::<_, ProjectMediaAssociation>(&query)
            .bind(association.id)
            .bind(association.project_id)
            .bind(association.media_id)
            .bind(association.display_order)
            .bind(&association.caption)
            .bind(association.is_cover)
            .bind(association.added_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Detach a media asset from a project
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM project_media WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Load the project fields needed for edit checks, by slug
    pub async fn find_project_by_slug(&self, slug: &str) -> Result<Option<ProjectRef>> {
        let project = sqlx::query_as::<_, ProjectRef>(
            "SELECT id, slug, creator_id, team_id FROM projects WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// Load the project fields needed for edit checks, by ID
    pub async fn find_project(&self, id: Uuid) -> Result<Option<ProjectRef>> {
        let project = sqlx::query_as::<_, ProjectRef>(
            "SELECT id, slug, creator_id, team_id FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }
}
