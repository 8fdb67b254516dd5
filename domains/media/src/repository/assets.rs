//! Media asset repository

use crate::domain::entities::{FileType, MediaAsset};
use showcase_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// All columns in the media_assets table, used for SELECT and RETURNING clauses.
const ASSET_COLUMNS: &str = "\
    id, title, description, file_path, file_type, file_size, mime_type, \
    owner_id, status, is_public, duration, width, height, \
    created_at, updated_at";

/// Project summary for "used in" listings (cross-domain read of projects).
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct ProjectUsage {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

#[derive(Clone)]
pub struct MediaAssetRepository {
    pool: PgPool,
}

impl MediaAssetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find asset by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<MediaAsset>> {
        let query = format!("SELECT {ASSET_COLUMNS} FROM media_assets WHERE id = $1");
        let asset = sqlx::query_as::<_, MediaAsset>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(asset)
    }

    /// Create a new asset
    pub async fn create(&self, asset: &MediaAsset) -> Result<MediaAsset> {
        let query = format!(
            "INSERT INTO media_assets ({ASSET_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {ASSET_COLUMNS}"
        );
        let created = sqlx::query_as::<_, MediaAsset>(&query)
            .bind(asset.id)
            .bind(&asset.title)
            .bind(&asset.description)
            .bind(&asset.file_path)
            .bind(asset.file_type)
            .bind(asset.file_size)
            .bind(&asset.mime_type)
            .bind(asset.owner_id)
            .bind(asset.status)
            .bind(asset.is_public)
            .bind(asset.duration)
            .bind(asset.width)
            .bind(asset.height)
            .bind(asset.created_at)
            .bind(asset.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Update asset metadata
    pub async fn update(&self, asset: &MediaAsset) -> Result<MediaAsset> {
        let query = format!(
            "UPDATE media_assets SET \
                title = $2, description = $3, is_public = $4, status = $5, \
                duration = $6, width = $7, height = $8, updated_at = NOW() \
             WHERE id = $1 RETURNING {ASSET_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, MediaAsset>(&query)
            .bind(asset.id)
            .bind(&asset.title)
            .bind(&asset.description)
            .bind(asset.is_public)
            .bind(asset.status)
            .bind(asset.duration)
            .bind(asset.width)
            .bind(asset.height)
            .fetch_one(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Delete an asset
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM media_assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// An owner's library, newest first, with optional type filter and
    /// title search
    pub async fn list_for_owner(
        &self,
        owner_id: Uuid,
        file_type: Option<FileType>,
        search: Option<&str>,
    ) -> Result<Vec<MediaAsset>> {
        let mut conditions = String::from("owner_id = $1");
        let mut binds = 1;

        if file_type.is_some() {
            binds += 1;
            conditions.push_str(&format!(" AND file_type = ${binds}"));
        }
        if search.is_some() {
            binds += 1;
            conditions.push_str(&format!(" AND title ILIKE ${binds}"));
        }

        let query = format!(
            "SELECT {ASSET_COLUMNS} FROM media_assets \
             WHERE {conditions} ORDER BY created_at DESC"
        );

        let mut q = sqlx::query_as::<_, MediaAsset>(&query).bind(owner_id);
        if let Some(file_type) = file_type {
            q = q.bind(file_type);
        }
        if let Some(search) = search {
            q = q.bind(format!("%{}%", search));
        }
        let assets = q.fetch_all(&self.pool).await?;

        Ok(assets)
    }

    /// Count an owner's assets, optionally restricted to one type
    pub async fn count_for_owner(
        &self,
        owner_id: Uuid,
        file_type: Option<FileType>,
    ) -> Result<i64> {
        let (count,): (i64,) = match file_type {
            Some(file_type) => {
                sqlx::query_as(
                    "SELECT COUNT(*) FROM media_assets WHERE owner_id = $1 AND file_type = $2",
                )
                .bind(owner_id)
                .bind(file_type)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM media_assets WHERE owner_id = $1")
                    .bind(owner_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count)
    }

    /// Projects that use this asset
    pub async fn list_projects_using(&self, media_id: Uuid) -> Result<Vec<ProjectUsage>> {
        let projects = sqlx::query_as::<_, ProjectUsage>(
            "SELECT p.id, p.title, p.slug \
             FROM projects p \
             INNER JOIN project_media a ON a.project_id = p.id \
             WHERE a.media_id = $1 \
             ORDER BY p.title ASC",
        )
        .bind(media_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }
}
