//! Domain entities for the Showcase media domain
//!
//! A media asset is the uploaded file plus its metadata; type-specific
//! metadata lives in per-type detail records keyed by the asset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use showcase_common::{Error, Result};

pub use showcase_common::slug::{slugify, validate_slug};

/// Broad classification of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_file_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Video,
    Audio,
    Document,
    Other,
}

impl FileType {
    /// Classify a file by its extension (lowercase, without the dot)
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" => FileType::Image,
            "mp4" | "avi" | "mov" | "mkv" | "webm" | "flv" => FileType::Video,
            "mp3" | "wav" | "flac" | "aac" | "m4a" | "ogg" => FileType::Audio,
            "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" => FileType::Document,
            _ => FileType::Other,
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Image => write!(f, "image"),
            FileType::Video => write!(f, "video"),
            FileType::Audio => write!(f, "audio"),
            FileType::Document => write!(f, "document"),
            FileType::Other => write!(f, "other"),
        }
    }
}

/// Processing status of an uploaded asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "media_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    Uploading,
    Processing,
    #[default]
    Ready,
    Error,
}

/// Media asset entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MediaAsset {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Storage-relative path of the stored file
    pub file_path: String,
    pub file_type: FileType,
    pub file_size: i64,
    pub mime_type: Option<String>,
    pub owner_id: Uuid,
    pub status: MediaStatus,
    pub is_public: bool,
    /// Duration in seconds (audio/video)
    pub duration: Option<i32>,
    /// Pixel dimensions (images/video)
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MediaAsset {
    /// Create a new asset record with validation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        description: Option<String>,
        file_path: String,
        file_type: FileType,
        file_size: i64,
        mime_type: Option<String>,
        owner_id: Uuid,
        is_public: bool,
    ) -> Result<Self> {
        if title.is_empty() || title.len() > 255 {
            return Err(Error::Validation(
                "Media title must be 1-255 characters".to_string(),
            ));
        }

        if let Some(ref description) = description {
            if description.len() > 500 {
                return Err(Error::Validation(
                    "Description must be at most 500 characters".to_string(),
                ));
            }
        }

        if file_path.is_empty() {
            return Err(Error::Validation("File path cannot be empty".to_string()));
        }

        if file_size < 0 {
            return Err(Error::Validation(
                "File size cannot be negative".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(MediaAsset {
            id: Uuid::new_v4(),
            title,
            description,
            file_path,
            file_type,
            file_size,
            mime_type,
            owner_id,
            status: MediaStatus::Ready,
            is_public,
            duration: None,
            width: None,
            height: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// File extension of the stored file (lowercase, without the dot)
    pub fn file_extension(&self) -> Option<&str> {
        let name = self.display_filename();
        name.rsplit_once('.').map(|(_, ext)| ext)
    }

    /// Stored filename without its directory prefix
    pub fn display_filename(&self) -> &str {
        self.file_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.file_path)
    }

    /// Mark the asset ready for use
    pub fn mark_ready(&mut self) {
        self.status = MediaStatus::Ready;
        self.updated_at = Utc::now();
    }

    /// Validate invariants
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() || self.title.len() > 255 {
            return Err(Error::Validation(
                "Media title must be 1-255 characters".to_string(),
            ));
        }

        if let Some(ref description) = self.description {
            if description.len() > 500 {
                return Err(Error::Validation(
                    "Description must be at most 500 characters".to_string(),
                ));
            }
        }

        if self.file_size < 0 {
            return Err(Error::Validation(
                "File size cannot be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Video quality ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "video_quality")]
pub enum VideoQuality {
    #[sqlx(rename = "360p")]
    #[serde(rename = "360p")]
    Q360,
    #[sqlx(rename = "480p")]
    #[serde(rename = "480p")]
    Q480,
    #[default]
    #[sqlx(rename = "720p")]
    #[serde(rename = "720p")]
    Q720,
    #[sqlx(rename = "1080p")]
    #[serde(rename = "1080p")]
    Q1080,
    #[sqlx(rename = "4k")]
    #[serde(rename = "4k")]
    Q4k,
}

/// Document category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "document_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    #[default]
    Pdf,
    Doc,
    Spreadsheet,
    Presentation,
    Other,
}

/// Image-specific metadata (1:1 with a MediaAsset)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ImageDetails {
    pub id: Uuid,
    pub media_id: Uuid,
    pub format: Option<String>,
    pub is_thumbnail: bool,
    pub alt_text: Option<String>,
}

impl ImageDetails {
    pub fn new(media_id: Uuid) -> Self {
        ImageDetails {
            id: Uuid::new_v4(),
            media_id,
            format: None,
            is_thumbnail: false,
            alt_text: None,
        }
    }
}

/// Video-specific metadata (1:1 with a MediaAsset)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VideoDetails {
    pub id: Uuid,
    pub media_id: Uuid,
    pub codec: Option<String>,
    pub quality: VideoQuality,
    pub thumbnail_url: Option<String>,
}

impl VideoDetails {
    pub fn new(media_id: Uuid) -> Self {
        VideoDetails {
            id: Uuid::new_v4(),
            media_id,
            codec: None,
            quality: VideoQuality::default(),
            thumbnail_url: None,
        }
    }
}

/// Audio-specific metadata (1:1 with a MediaAsset)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AudioDetails {
    pub id: Uuid,
    pub media_id: Uuid,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub codec: Option<String>,
    pub bitrate_kbps: Option<i32>,
}

impl AudioDetails {
    pub fn new(media_id: Uuid) -> Self {
        AudioDetails {
            id: Uuid::new_v4(),
            media_id,
            artist: None,
            album: None,
            genre: None,
            codec: None,
            bitrate_kbps: None,
        }
    }
}

/// Document-specific metadata (1:1 with a MediaAsset)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentDetails {
    pub id: Uuid,
    pub media_id: Uuid,
    pub kind: DocumentKind,
    pub page_count: Option<i32>,
}

impl DocumentDetails {
    pub fn new(media_id: Uuid) -> Self {
        DocumentDetails {
            id: Uuid::new_v4(),
            media_id,
            kind: DocumentKind::default(),
            page_count: None,
        }
    }
}

/// Association between a project and a media asset, with display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectMediaAssociation {
    pub id: Uuid,
    pub project_id: Uuid,
    pub media_id: Uuid,
    pub display_order: i32,
    pub caption: Option<String>,
    pub is_cover: bool,
    pub added_at: DateTime<Utc>,
}

impl ProjectMediaAssociation {
    /// Create a new association with validation
    pub fn new(
        project_id: Uuid,
        media_id: Uuid,
        display_order: i32,
        caption: Option<String>,
        is_cover: bool,
    ) -> Result<Self> {
        if let Some(ref caption) = caption {
            if caption.len() > 500 {
                return Err(Error::Validation(
                    "Caption must be at most 500 characters".to_string(),
                ));
            }
        }

        Ok(ProjectMediaAssociation {
            id: Uuid::new_v4(),
            project_id,
            media_id,
            display_order,
            caption,
            is_cover,
            added_at: Utc::now(),
        })
    }
}

/// Tag for organizing and searching media
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MediaTag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MediaTag {
    /// Create a new tag with validation
    pub fn new(name: String, slug: Option<String>, description: Option<String>) -> Result<Self> {
        if name.is_empty() || name.len() > 100 {
            return Err(Error::Validation(
                "Tag name must be 1-100 characters".to_string(),
            ));
        }

        let slug = match slug {
            Some(s) => {
                validate_slug(&s)?;
                s
            }
            None => slugify(&name)?,
        };

        Ok(MediaTag {
            id: Uuid::new_v4(),
            name,
            slug,
            description,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset() -> MediaAsset {
        MediaAsset::new(
            "Title Sequence".to_string(),
            Some("Opening titles".to_string()),
            "2025/08/07/abc-title.mp4".to_string(),
            FileType::Video,
            1024,
            Some("video/mp4".to_string()),
            Uuid::new_v4(),
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_file_type_classification() {
        assert_eq!(FileType::from_extension("jpg"), FileType::Image);
        assert_eq!(FileType::from_extension("webp"), FileType::Image);
        assert_eq!(FileType::from_extension("mp4"), FileType::Video);
        assert_eq!(FileType::from_extension("webm"), FileType::Video);
        assert_eq!(FileType::from_extension("mp3"), FileType::Audio);
        assert_eq!(FileType::from_extension("ogg"), FileType::Audio);
        assert_eq!(FileType::from_extension("pdf"), FileType::Document);
        assert_eq!(FileType::from_extension("docx"), FileType::Document);
        assert_eq!(FileType::from_extension("exe"), FileType::Other);
        assert_eq!(FileType::from_extension(""), FileType::Other);
    }

    #[test]
    fn test_asset_creation_defaults() {
        let asset = asset();
        assert_eq!(asset.status, MediaStatus::Ready);
        assert!(!asset.is_public);
        assert!(asset.duration.is_none());
        assert!(asset.validate().is_ok());
    }

    #[test]
    fn test_asset_title_boundaries() {
        let make = |title: String| {
            MediaAsset::new(
                title,
                None,
                "2025/08/07/f.png".to_string(),
                FileType::Image,
                1,
                None,
                Uuid::new_v4(),
                false,
            )
        };

        assert!(make("a".repeat(255)).is_ok());
        assert!(make("a".repeat(256)).is_err());
        assert!(make(String::new()).is_err());
    }

    #[test]
    fn test_asset_description_boundary() {
        let make = |description: Option<String>| {
            MediaAsset::new(
                "Title".to_string(),
                description,
                "2025/08/07/f.png".to_string(),
                FileType::Image,
                1,
                None,
                Uuid::new_v4(),
                false,
            )
        };

        assert!(make(Some("a".repeat(500))).is_ok());
        assert!(make(Some("a".repeat(501))).is_err());
    }

    #[test]
    fn test_asset_rejects_negative_size_and_empty_path() {
        let bad_size = MediaAsset::new(
            "Title".to_string(),
            None,
            "2025/08/07/f.png".to_string(),
            FileType::Image,
            -1,
            None,
            Uuid::new_v4(),
            false,
        );
        assert!(bad_size.is_err());

        let empty_path = MediaAsset::new(
            "Title".to_string(),
            None,
            String::new(),
            FileType::Image,
            1,
            None,
            Uuid::new_v4(),
            false,
        );
        assert!(empty_path.is_err());
    }

    #[test]
    fn test_display_filename_and_extension() {
        let asset = asset();
        assert_eq!(asset.display_filename(), "abc-title.mp4");
        assert_eq!(asset.file_extension(), Some("mp4"));
    }

    #[test]
    fn test_extension_missing() {
        let mut asset = asset();
        asset.file_path = "2025/08/07/noext".to_string();
        assert_eq!(asset.file_extension(), None);
    }

    #[test]
    fn test_mark_ready() {
        let mut asset = asset();
        asset.status = MediaStatus::Processing;
        asset.mark_ready();
        assert_eq!(asset.status, MediaStatus::Ready);
    }

    #[test]
    fn test_association_caption_boundary() {
        let ok = ProjectMediaAssociation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            0,
            Some("a".repeat(500)),
            false,
        );
        assert!(ok.is_ok());

        let too_long = ProjectMediaAssociation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            0,
            Some("a".repeat(501)),
            false,
        );
        assert!(too_long.is_err());
    }

    #[test]
    fn test_detail_records_link_to_media() {
        let media_id = Uuid::new_v4();

        assert_eq!(ImageDetails::new(media_id).media_id, media_id);
        assert_eq!(VideoDetails::new(media_id).quality, VideoQuality::Q720);
        assert!(AudioDetails::new(media_id).artist.is_none());
        assert_eq!(DocumentDetails::new(media_id).kind, DocumentKind::Pdf);
    }

    #[test]
    fn test_tag_creation() {
        let tag = MediaTag::new("Behind The Scenes".to_string(), None, None).unwrap();
        assert_eq!(tag.slug, "behind-the-scenes");

        assert!(MediaTag::new(String::new(), None, None).is_err());
        assert!(MediaTag::new("a".repeat(101), None, None).is_err());
    }

    #[test]
    fn test_video_quality_serialization() {
        assert_eq!(
            serde_json::to_string(&VideoQuality::Q1080).unwrap(),
            "\"1080p\""
        );
        let q: VideoQuality = serde_json::from_str("\"4k\"").unwrap();
        assert_eq!(q, VideoQuality::Q4k);
    }

    #[test]
    fn test_file_type_serialization() {
        assert_eq!(
            serde_json::to_string(&FileType::Document).unwrap(),
            "\"document\""
        );
        let t: FileType = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(t, FileType::Image);
    }
}
