//! Media tag handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use showcase_auth::AuthUser;
use showcase_common::{validate_slug, Error, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::handlers::assets::MediaAssetResponse;
use crate::api::middleware::MediaState;
use crate::domain::entities::MediaTag;

/// Request for creating a tag
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(custom(function = "validate_slug_format", message = "Invalid slug format"))]
    pub slug: Option<String>,

    pub description: Option<String>,
}

/// Custom validation function for slug format
fn validate_slug_format(slug: &str) -> std::result::Result<(), validator::ValidationError> {
    validate_slug(slug).map_err(|_| validator::ValidationError::new("invalid_format"))
}

/// Request for tagging an asset
#[derive(Debug, Deserialize)]
pub struct TagMediaRequest {
    pub tag_id: Uuid,
}

/// Tag page payload: tag + its public ready assets
#[derive(Debug, Serialize)]
pub struct TagDetailResponse {
    #[serde(flatten)]
    pub tag: MediaTag,
    pub media: Vec<MediaAssetResponse>,
}

/// List all tags
///
/// **GET /v1/media/tags**
pub async fn list_tags(State(state): State<MediaState>) -> Result<Json<Vec<MediaTag>>> {
    let tags = state.repos.tags.list_all().await?;
    Ok(Json(tags))
}

/// Create a tag
///
/// **POST /v1/media/tags**
pub async fn create_tag(
    AuthUser(_ctx): AuthUser,
    State(state): State<MediaState>,
    ValidatedJson(request): ValidatedJson<CreateTagRequest>,
) -> Result<(StatusCode, Json<MediaTag>)> {
    let tag = MediaTag::new(request.name, request.slug, request.description)?;

    if state
        .repos
        .tags
        .name_or_slug_exists(&tag.name, &tag.slug)
        .await?
    {
        return Err(Error::Conflict("Tag already exists".to_string()));
    }

    let created = state.repos.tags.create(&tag).await.map_err(|e| match e {
        Error::Database(ref db) if showcase_common::is_unique_violation(db) => {
            Error::Conflict("Tag already exists".to_string())
        }
        other => other,
    })?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// View public ready assets under a tag
///
/// **GET /v1/media/tags/{slug}**
pub async fn get_tag(
    State(state): State<MediaState>,
    Path(slug): Path<String>,
) -> Result<Json<TagDetailResponse>> {
    let tag = state
        .repos
        .tags
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| Error::NotFound("Tag not found".to_string()))?;

    let media = state.repos.tags.list_public_assets(tag.id).await?;

    Ok(Json(TagDetailResponse {
        tag,
        media: media.into_iter().map(Into::into).collect(),
    }))
}

/// Tag one of the caller's assets
///
/// **POST /v1/media/{id}/tags**
pub async fn tag_media(
    AuthUser(ctx): AuthUser,
    State(state): State<MediaState>,
    Path(media_id): Path<Uuid>,
    Json(request): Json<TagMediaRequest>,
) -> Result<StatusCode> {
    let asset = state
        .repos
        .assets
        .find(media_id)
        .await?
        .ok_or_else(|| Error::NotFound("Media not found".to_string()))?;

    if asset.owner_id != ctx.user.id {
        return Err(Error::Authorization(
            "You can only tag your own media".to_string(),
        ));
    }

    if state.repos.tags.is_attached(request.tag_id, asset.id).await? {
        return Err(Error::Conflict("Media already carries this tag".to_string()));
    }

    state
        .repos
        .tags
        .attach(request.tag_id, asset.id)
        .await
        .map_err(|e| match e {
            Error::Database(ref db) if showcase_common::is_unique_violation(db) => {
                Error::Conflict("Media already carries this tag".to_string())
            }
            other => other,
        })?;

    Ok(StatusCode::CREATED)
}
