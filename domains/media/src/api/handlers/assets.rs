//! Media library, upload, and asset management handlers

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showcase_auth::AuthUser;
use showcase_common::{Error, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::MediaState;
use crate::domain::entities::{
    AudioDetails, DocumentDetails, DocumentKind, FileType, ImageDetails, MediaAsset, MediaStatus,
    VideoDetails,
};
use crate::domain::storage::{extension_allowed, extract_extension, guess_mime};
use crate::repository::ProjectUsage;

/// Library filter query parameters
#[derive(Debug, Deserialize)]
pub struct LibraryQuery {
    #[serde(rename = "type")]
    pub file_type: Option<FileType>,
    pub search: Option<String>,
}

/// Request for updating asset metadata
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMediaRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    pub is_public: Option<bool>,
}

/// Media asset payload for API operations
#[derive(Debug, Serialize)]
pub struct MediaAssetResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_path: String,
    pub filename: String,
    pub file_type: FileType,
    pub file_size: i64,
    pub mime_type: Option<String>,
    pub owner_id: Uuid,
    pub status: MediaStatus,
    pub is_public: bool,
    pub duration: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MediaAsset> for MediaAssetResponse {
    fn from(asset: MediaAsset) -> Self {
        let filename = asset.display_filename().to_string();
        Self {
            id: asset.id,
            title: asset.title,
            description: asset.description,
            file_path: asset.file_path,
            filename,
            file_type: asset.file_type,
            file_size: asset.file_size,
            mime_type: asset.mime_type,
            owner_id: asset.owner_id,
            status: asset.status,
            is_public: asset.is_public,
            duration: asset.duration,
            width: asset.width,
            height: asset.height,
            created_at: asset.created_at,
            updated_at: asset.updated_at,
        }
    }
}

/// Type-specific detail payload on the asset detail endpoint
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DetailPayload {
    Image(ImageDetails),
    Video(VideoDetails),
    Audio(AudioDetails),
    Document(DocumentDetails),
}

/// Media library payload with per-type counts
#[derive(Debug, Serialize)]
pub struct LibraryResponse {
    pub media: Vec<MediaAssetResponse>,
    pub total_count: i64,
    pub image_count: i64,
    pub video_count: i64,
    pub audio_count: i64,
    pub document_count: i64,
}

/// Asset detail payload
#[derive(Debug, Serialize)]
pub struct MediaDetailResponse {
    #[serde(flatten)]
    pub media: MediaAssetResponse,
    pub details: Option<DetailPayload>,
    pub projects: Vec<ProjectUsage>,
    pub can_edit: bool,
}

/// View the caller's media library
///
/// **GET /v1/media**
///
/// Filterable by file type and title search; always reports per-type
/// totals for the whole library.
pub async fn library(
    AuthUser(ctx): AuthUser,
    State(state): State<MediaState>,
    Query(query): Query<LibraryQuery>,
) -> Result<Json<LibraryResponse>> {
    let assets = state
        .repos
        .assets
        .list_for_owner(ctx.user.id, query.file_type, query.search.as_deref())
        .await?;

    let total_count = state.repos.assets.count_for_owner(ctx.user.id, None).await?;
    let image_count = state
        .repos
        .assets
        .count_for_owner(ctx.user.id, Some(FileType::Image))
        .await?;
    let video_count = state
        .repos
        .assets
        .count_for_owner(ctx.user.id, Some(FileType::Video))
        .await?;
    let audio_count = state
        .repos
        .assets
        .count_for_owner(ctx.user.id, Some(FileType::Audio))
        .await?;
    let document_count = state
        .repos
        .assets
        .count_for_owner(ctx.user.id, Some(FileType::Document))
        .await?;

    Ok(Json(LibraryResponse {
        media: assets.into_iter().map(Into::into).collect(),
        total_count,
        image_count,
        video_count,
        audio_count,
        document_count,
    }))
}

/// Upload a media file
///
/// **POST /v1/media** (multipart)
///
/// Accepts a `file` part plus optional `title`, `description`, and
/// `is_public` parts. Enforces the size ceiling and extension allowlist,
/// classifies the file, stores it on disk, and records the asset with a
/// matching per-type detail record.
pub async fn upload_media(
    AuthUser(ctx): AuthUser,
    State(state): State<MediaState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MediaAssetResponse>)> {
    let mut file: Option<(String, axum::body::Bytes)> = None;
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut is_public = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| Error::Validation("Uploaded file must have a filename".to_string()))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::Validation(e.to_string()))?;
                file = Some((filename, data));
            }
            Some("title") => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| Error::Validation(e.to_string()))?,
                );
            }
            Some("description") => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| Error::Validation(e.to_string()))?,
                );
            }
            Some("is_public") => {
                is_public = field
                    .text()
                    .await
                    .map_err(|e| Error::Validation(e.to_string()))?
                    == "true";
            }
            _ => {}
        }
    }

    let (filename, data) = file.ok_or_else(|| Error::Validation("No file provided".to_string()))?;

    if data.len() as u64 > state.max_upload_size {
        return Err(Error::Validation(format!(
            "File size exceeds limit of {} MB",
            state.max_upload_size / (1024 * 1024)
        )));
    }

    let extension = extract_extension(&filename)
        .ok_or_else(|| Error::Validation("File must have an extension".to_string()))?;

    if !extension_allowed(&extension) {
        return Err(Error::Validation(format!(
            "File type .{} is not allowed",
            extension
        )));
    }

    let file_type = FileType::from_extension(&extension);
    let mime_type = guess_mime(&extension).map(str::to_string);

    let stored_path = state.storage.store(&filename, &data).await?;

    let title = title.filter(|t| !t.trim().is_empty()).unwrap_or_else(|| filename.clone());
    let description = description.filter(|d| !d.is_empty());

    let asset = MediaAsset::new(
        title,
        description,
        stored_path,
        file_type,
        data.len() as i64,
        mime_type,
        ctx.user.id,
        is_public,
    )?;

    let created = state.repos.assets.create(&asset).await?;

    // One detail record per asset, matching its type
    match file_type {
        FileType::Image => {
            let mut details = ImageDetails::new(created.id);
            details.format = Some(extension.to_ascii_uppercase());
            state.repos.details.create_image(&details).await?;
        }
        FileType::Video => {
            state
                .repos
                .details
                .create_video(&VideoDetails::new(created.id))
                .await?;
        }
        FileType::Audio => {
            state
                .repos
                .details
                .create_audio(&AudioDetails::new(created.id))
                .await?;
        }
        FileType::Document => {
            let mut details = DocumentDetails::new(created.id);
            details.kind = match extension.as_str() {
                "pdf" => DocumentKind::Pdf,
                "doc" | "docx" => DocumentKind::Doc,
                _ => DocumentKind::Other,
            };
            state.repos.details.create_document(&details).await?;
        }
        FileType::Other => {}
    }

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Load an asset the caller is allowed to see; hidden assets 404
async fn load_visible(
    state: &MediaState,
    id: Uuid,
    viewer_id: Uuid,
) -> Result<MediaAsset> {
    let asset = state
        .repos
        .assets
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Media not found".to_string()))?;

    if !asset.is_public && asset.owner_id != viewer_id {
        return Err(Error::NotFound("Media not found".to_string()));
    }

    Ok(asset)
}

/// View asset details
///
/// **GET /v1/media/{id}**
pub async fn get_media(
    AuthUser(ctx): AuthUser,
    State(state): State<MediaState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MediaDetailResponse>> {
    let asset = load_visible(&state, id, ctx.user.id).await?;

    let details = match asset.file_type {
        FileType::Image => state
            .repos
            .details
            .find_image(asset.id)
            .await?
            .map(DetailPayload::Image),
        FileType::Video => state
            .repos
            .details
            .find_video(asset.id)
            .await?
            .map(DetailPayload::Video),
        FileType::Audio => state
            .repos
            .details
            .find_audio(asset.id)
            .await?
            .map(DetailPayload::Audio),
        FileType::Document => state
            .repos
            .details
            .find_document(asset.id)
            .await?
            .map(DetailPayload::Document),
        FileType::Other => None,
    };

    let projects = state.repos.assets.list_projects_using(asset.id).await?;
    let can_edit = asset.owner_id == ctx.user.id;

    Ok(Json(MediaDetailResponse {
        media: asset.into(),
        details,
        projects,
        can_edit,
    }))
}

/// Update asset metadata
///
/// **PATCH /v1/media/{id}**
pub async fn update_media(
    AuthUser(ctx): AuthUser,
    State(state): State<MediaState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateMediaRequest>,
) -> Result<Json<MediaAssetResponse>> {
    let mut asset = state
        .repos
        .assets
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Media not found".to_string()))?;

    if asset.owner_id != ctx.user.id {
        return Err(Error::Authorization(
            "You do not have permission to edit this media".to_string(),
        ));
    }

    if let Some(title) = request.title {
        asset.title = title;
    }
    if let Some(description) = request.description {
        asset.description = Some(description);
    }
    if let Some(is_public) = request.is_public {
        asset.is_public = is_public;
    }

    asset.validate()?;

    let updated = state.repos.assets.update(&asset).await?;
    Ok(Json(updated.into()))
}

/// Delete an asset
///
/// **DELETE /v1/media/{id}**
///
/// Removes the stored file first, then the database row.
pub async fn delete_media(
    AuthUser(ctx): AuthUser,
    State(state): State<MediaState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let asset = state
        .repos
        .assets
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Media not found".to_string()))?;

    if asset.owner_id != ctx.user.id {
        return Err(Error::Authorization(
            "You do not have permission to delete this media".to_string(),
        ));
    }

    state.storage.remove(&asset.file_path).await?;
    state.repos.assets.delete(asset.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_media_request_validation() {
        let valid = UpdateMediaRequest {
            title: Some("New Title".to_string()),
            description: Some("desc".to_string()),
            is_public: Some(true),
        };
        assert!(valid.validate().is_ok());

        let empty_title = UpdateMediaRequest {
            title: Some(String::new()),
            description: None,
            is_public: None,
        };
        assert!(empty_title.validate().is_err());

        let long_description = UpdateMediaRequest {
            title: None,
            description: Some("a".repeat(501)),
            is_public: None,
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_media_response_includes_filename() {
        let asset = MediaAsset::new(
            "Reel".to_string(),
            None,
            "2025/08/07/abc-reel.mp4".to_string(),
            FileType::Video,
            10,
            Some("video/mp4".to_string()),
            Uuid::new_v4(),
            true,
        )
        .unwrap();

        let response: MediaAssetResponse = asset.into();
        assert_eq!(response.filename, "abc-reel.mp4");
        assert_eq!(response.file_type, FileType::Video);
    }

    #[test]
    fn test_library_query_type_param() {
        let query: LibraryQuery =
            serde_json::from_str(r#"{"type": "image", "search": "logo"}"#).unwrap();
        assert_eq!(query.file_type, Some(FileType::Image));
        assert_eq!(query.search.as_deref(), Some("logo"));
    }
}
