//! Per-type media detail repositories
//!
//! Each record is 1:1 with a media asset; only the matching table for
//! the asset's file type is ever populated.

use crate::domain::entities::{AudioDetails, DocumentDetails, ImageDetails, VideoDetails};
use showcase_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct MediaDetailRepository {
    pool: PgPool,
}

impl MediaDetailRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create image details for an asset
    pub async fn create_image(&self, details: &ImageDetails) -> Result<ImageDetails> {
        let created = sqlx::query_as::<_, ImageDetails>(
            "INSERT INTO image_details (id, media_id, format, is_thumbnail, alt_text) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, media_id, format, is_thumbnail, alt_text",
        )
        .bind(details.id)
        .bind(details.media_id)
        .bind(&details.format)
        .bind(details.is_thumbnail)
        .bind(&details.alt_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find image details for an asset
    pub async fn find_image(&self, media_id: Uuid) -> Result<Option<ImageDetails>> {
        let details = sqlx::query_as::<_, ImageDetails>(
            "SELECT id, media_id, format, is_thumbnail, alt_text \
             FROM image_details WHERE media_id = $1",
        )
        .bind(media_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(details)
    }

    /// Create video details for an asset
    pub async fn create_video(&self, details: &VideoDetails) -> Result<VideoDetails> {
        let created = sqlx::query_as::<_, VideoDetails>(
            "INSERT INTO video_details (id, media_id, codec, quality, thumbnail_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, media_id, codec, quality, thumbnail_url",
        )
        .bind(details.id)
        .bind(details.media_id)
        .bind(&details.codec)
        .bind(details.quality)
        .bind(&details.thumbnail_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find video details for an asset
    pub async fn find_video(&self, media_id: Uuid) -> Result<Option<VideoDetails>> {
        let details = sqlx::query_as::<_, VideoDetails>(
            "SELECT id, media_id, codec, quality, thumbnail_url \
             FROM video_details WHERE media_id = $1",
        )
        .bind(media_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(details)
    }

    /// Create audio details for an asset
    pub async fn create_audio(&self, details: &AudioDetails) -> Result<AudioDetails> {
        let created = sqlx::query_as::<_, AudioDetails>(
            "INSERT INTO audio_details (id, media_id, artist, album, genre, codec, bitrate_kbps) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, media_id, artist, album, genre, codec, bitrate_kbps",
        )
        .bind(details.id)
        .bind(details.media_id)
        .bind(&details.artist)
        .bind(&details.album)
        .bind(&details.genre)
        .bind(&details.codec)
        .bind(details.bitrate_kbps)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find audio details for an asset
    pub async fn find_audio(&self, media_id: Uuid) -> Result<Option<AudioDetails>> {
        let details = sqlx::query_as::<_, AudioDetails>(
            "SELECT id, media_id, artist, album, genre, codec, bitrate_kbps \
             FROM audio_details WHERE media_id = $1",
        )
        .bind(media_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(details)
    }

    /// Create document details for an asset
    pub async fn create_document(&self, details: &DocumentDetails) -> Result<DocumentDetails> {
        let created = sqlx::query_as::<_, DocumentDetails>(
            "INSERT INTO document_details (id, media_id, kind, page_count) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, media_id, kind, page_count",
        )
        .bind(details.id)
        .bind(details.media_id)
        .bind(details.kind)
        .bind(details.page_count)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find document details for an asset
    pub async fn find_document(&self, media_id: Uuid) -> Result<Option<DocumentDetails>> {
        let details = sqlx::query_as::<_, DocumentDetails>(
            "SELECT id, media_id, kind, page_count \
             FROM document_details WHERE media_id = $1",
        )
        .bind(media_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(details)
    }
}
