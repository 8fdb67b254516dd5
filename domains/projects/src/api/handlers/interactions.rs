//! Comment and like handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use showcase_auth::AuthUser;
use showcase_common::{Error, Result, ValidatedJson};
use validator::Validate;

use crate::api::middleware::ProjectsState;
use crate::domain::entities::{Project, ProjectComment, ProjectLike};
use crate::repository::{adjust_like_count_tx, delete_like_tx, insert_like_tx};

/// Request for adding a comment
#[derive(Debug, Deserialize, Validate)]
pub struct AddCommentRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// Result of a like toggle
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub like_count: i32,
}

/// Resolve a project by slug, hiding ones the caller cannot see
async fn load_visible(
    state: &ProjectsState,
    slug: &str,
    ctx: &showcase_auth::AuthContext,
) -> Result<Project> {
    let project = state
        .repos
        .projects
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

    if !project.can_view(Some(ctx)) {
        return Err(Error::NotFound("Project not found".to_string()));
    }

    Ok(project)
}

/// Comment on a project
///
/// **POST /v1/projects/{slug}/comments**
///
/// The caller must be allowed to comment: any authenticated user on
/// public projects, the creator, or a team member whose role allows it.
pub async fn add_comment(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(slug): Path<String>,
    ValidatedJson(request): ValidatedJson<AddCommentRequest>,
) -> Result<(StatusCode, Json<ProjectComment>)> {
    let project = load_visible(&state, &slug, &ctx).await?;

    if !project.can_comment(Some(&ctx)) {
        return Err(Error::Authorization(
            "You do not have permission to comment on this project".to_string(),
        ));
    }

    let comment = ProjectComment::new(project.id, ctx.user.id, &request.content)?;
    let created = state.repos.comments.create(&comment).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Like or unlike a project
///
/// **POST /v1/projects/{slug}/like**
///
/// Toggles: a second call removes the like. The like row and the
/// denormalized counter move together in one transaction.
pub async fn toggle_like(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(slug): Path<String>,
) -> Result<Json<LikeResponse>> {
    let project = load_visible(&state, &slug, &ctx).await?;

    let mut tx = state
        .repos
        .begin()
        .await
        .map_err(|e| Error::Internal(format!("Failed to begin transaction: {}", e)))?;

    let removed = delete_like_tx(&mut tx, project.id, ctx.user.id)
        .await
        .map_err(|e| Error::Internal(format!("Failed to toggle like: {}", e)))?;

    let (liked, like_count) = if removed {
        let count = adjust_like_count_tx(&mut tx, project.id, -1)
            .await
            .map_err(|e| Error::Internal(format!("Failed to update like count: {}", e)))?;
        (false, count)
    } else {
        let like = ProjectLike::new(project.id, ctx.user.id);
        insert_like_tx(&mut tx, &like)
            .await
            .map_err(|e| Error::Internal(format!("Failed to record like: {}", e)))?;
        let count = adjust_like_count_tx(&mut tx, project.id, 1)
            .await
            .map_err(|e| Error::Internal(format!("Failed to update like count: {}", e)))?;
        (true, count)
    };

    tx.commit()
        .await
        .map_err(|e| Error::Internal(format!("Failed to commit transaction: {}", e)))?;

    Ok(Json(LikeResponse { liked, like_count }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_comment_request_validation() {
        let valid = AddCommentRequest {
            content: "great work".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty = AddCommentRequest {
            content: String::new(),
        };
        assert!(empty.validate().is_err());

        let too_long = AddCommentRequest {
            content: "a".repeat(2001),
        };
        assert!(too_long.validate().is_err());
    }
}
