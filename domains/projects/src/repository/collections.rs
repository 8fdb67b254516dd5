//! Project collection repository

use crate::domain::entities::{Project, ProjectCollection};
use showcase_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// All columns in the project_collections table.
const COLLECTION_COLUMNS: &str = "\
    id, name, slug, description, owner_id, is_public, display_order, \
    created_at, updated_at";

#[derive(Clone)]
pub struct CollectionRepository {
    pool: PgPool,
}

impl CollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find collection by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<ProjectCollection>> {
        let query = format!("SELECT {COLLECTION_COLUMNS} FROM project_collections WHERE id = $1");
        let collection = sqlx::query_as::<_, ProjectCollection>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(collection)
    }

    /// Find a collection by its owner and slug (slug is unique per owner)
    pub async fn find_by_owner_and_slug(
        &self,
        owner_id: Uuid,
        slug: &str,
    ) -> Result<Option<ProjectCollection>> {
        let query = format!(
            "SELECT {COLLECTION_COLUMNS} FROM project_collections \
             WHERE owner_id = $1 AND slug = $2"
        );
        let collection = sqlx::query_as::<_, ProjectCollection>(&query)
            .bind(owner_id)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(collection)
    }

    /// Check whether an owner already uses a slug
    pub async fn slug_exists_for_owner(&self, owner_id: Uuid, slug: &str) -> Result<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM project_collections WHERE owner_id = $1 AND slug = $2)",
        )
        .bind(owner_id)
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Collections owned by a user, in display order
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<ProjectCollection>> {
        let query = format!(
            "SELECT {COLLECTION_COLUMNS} FROM project_collections \
             WHERE owner_id = $1 ORDER BY display_order ASC, name ASC"
        );
        let collections = sqlx::query_as::<_, ProjectCollection>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(collections)
    }

    /// Create a new collection
    pub async fn create(&self, collection: &ProjectCollection) -> Result<ProjectCollection> {
        let query = format!(
            "INSERT INTO project_collections ({COLLECTION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLLECTION_COLUMNS}"
        );
        let created = sqlx::query_as::<_, ProjectCollection>(&query)
            .bind(collection.id)
            .bind(&collection.name)
            .bind(&collection.slug)
            .bind(&collection.description)
            .bind(collection.owner_id)
            .bind(collection.is_public)
            .bind(collection.display_order)
            .bind(collection.created_at)
            .bind(collection.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Resolve a username to its user ID (cross-domain read of users)
    pub async fn owner_id_by_username(&self, username: &str) -> Result<Option<Uuid>> {
        let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(id,)| id))
    }

    /// Check whether a project is already in a collection
    pub async fn contains_project(&self, collection_id: Uuid, project_id: Uuid) -> Result<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM collection_projects \
             WHERE collection_id = $1 AND project_id = $2)",
        )
        .bind(collection_id)
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Add a project to a collection
    pub async fn add_project(&self, collection_id: Uuid, project_id: Uuid) -> Result<()> {
        sqlx::query(
            "INSERT INTO collection_projects (collection_id, project_id) VALUES ($1, $2)",
        )
        .bind(collection_id)
        .bind(project_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Projects in a collection; optionally only public published ones
    pub async fn list_projects(
        &self,
        collection_id: Uuid,
        public_only: bool,
    ) -> Result<Vec<Project>> {
        let visibility = if public_only {
            " AND p.is_public = TRUE AND p.status = 'published'"
        } else {
            ""
        };
        let query = format!(
            "SELECT p.id, p.title, p.slug, p.description, p.thumbnail_url, \
                    p.creator_id, p.team_id, p.category_id, p.tags, \
                    p.status, p.is_public, p.is_featured, \
                    p.view_count, p.like_count, p.created_at, p.updated_at, p.published_at \
             FROM projects p \
             INNER JOIN collection_projects cp ON cp.project_id = p.id \
             WHERE cp.collection_id = $1{visibility} \
             ORDER BY p.created_at DESC"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(collection_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }
}
