//! Media tag repository

use crate::domain::entities::{MediaAsset, MediaTag};
use showcase_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// All columns in the media_tags table.
const TAG_COLUMNS: &str = "id, name, slug, description, created_at";

#[derive(Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find tag by slug
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<MediaTag>> {
        let query = format!("SELECT {TAG_COLUMNS} FROM media_tags WHERE slug = $1");
        let tag = sqlx::query_as::<_, MediaTag>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tag)
    }

    /// Check whether a tag name or slug is taken
    pub async fn name_or_slug_exists(&self, name: &str, slug: &str) -> Result<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM media_tags WHERE name = $1 OR slug = $2)",
        )
        .bind(name)
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// All tags, ordered by name
    pub async fn list_all(&self) -> Result<Vec<MediaTag>> {
        let query = format!("SELECT {TAG_COLUMNS} FROM media_tags ORDER BY name ASC");
        let tags = sqlx::query_as::<_, MediaTag>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(tags)
    }

    /// Create a new tag
    pub async fn create(&self, tag: &MediaTag) -> Result<MediaTag> {
        let query = format!(
            "INSERT INTO media_tags ({TAG_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {TAG_COLUMNS}"
        );
        let created = sqlx::query_as::<_, MediaTag>(&query)
            .bind(tag.id)
            .bind(&tag.name)
            .bind(&tag.slug)
            .bind(&tag.description)
            .bind(tag.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Check whether a tag is attached to an asset
    pub async fn is_attached(&self, tag_id: Uuid, media_id: Uuid) -> Result<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM media_asset_tags WHERE tag_id = $1 AND media_id = $2)",
        )
        .bind(tag_id)
        .bind(media_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Attach a tag to an asset
    pub async fn attach(&self, tag_id: Uuid, media_id: Uuid) -> Result<()> {
        sqlx::query("INSERT INTO media_asset_tags (tag_id, media_id) VALUES ($1, $2)")
            .bind(tag_id)
            .bind(media_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Public ready assets carrying a tag, newest first
    pub async fn list_public_assets(&self, tag_id: Uuid) -> Result<Vec<MediaAsset>> {
        let assets = sqlx::query_as::<_, MediaAsset>(
            "SELECT m.id, m.title, m.description, m.file_path, m.file_type, m.file_size, \
                    m.mime_type, m.owner_id, m.status, m.is_public, m.duration, m.width, \
                    m.height, m.created_at, m.updated_at \
             FROM media_assets m \
             INNER JOIN media_asset_tags t ON t.media_id = m.id \
             WHERE t.tag_id = $1 AND m.is_public = TRUE AND m.status = 'ready' \
             ORDER BY m.created_at DESC",
        )
        .bind(tag_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assets)
    }
}
