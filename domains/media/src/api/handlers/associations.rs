//! Project-media attachment handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use showcase_auth::{AuthContext, AuthUser};
use showcase_common::{Error, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::MediaState;
use crate::domain::entities::ProjectMediaAssociation;
use crate::repository::ProjectRef;

/// Request for attaching media to a project
#[derive(Debug, Deserialize, Validate)]
pub struct AttachMediaRequest {
    pub media_id: Uuid,

    #[validate(length(max = 500))]
    pub caption: Option<String>,

    #[serde(default)]
    pub is_cover: bool,
}

/// Edit check mirroring the projects domain: the creator, or a team
/// member whose role carries edit rights
fn can_edit_project(project: &ProjectRef, ctx: &AuthContext) -> bool {
    if project.creator_id == ctx.user.id {
        return true;
    }
    project
        .team_id
        .map_or(false, |team_id| ctx.can_edit_team_projects(team_id))
}

/// Attach a media asset to a project
///
/// **POST /v1/projects/{slug}/media**
///
/// The caller must be able to edit the project and must own the asset.
/// New attachments land at the end of the display order.
pub async fn attach_media(
    AuthUser(ctx): AuthUser,
    State(state): State<MediaState>,
    Path(slug): Path<String>,
    ValidatedJson(request): ValidatedJson<AttachMediaRequest>,
) -> Result<(StatusCode, Json<ProjectMediaAssociation>)> {
    let project = state
        .repos
        .associations
        .find_project_by_slug(&slug)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

    if !can_edit_project(&project, &ctx) {
        return Err(Error::Authorization(
            "You do not have permission to edit this project".to_string(),
        ));
    }

    let media = state
        .repos
        .assets
        .find(request.media_id)
        .await?
        .ok_or_else(|| Error::NotFound("Media not found".to_string()))?;

    if media.owner_id != ctx.user.id {
        return Err(Error::NotFound("Media not found".to_string()));
    }

    if state
        .repos
        .associations
        .exists(project.id, media.id)
        .await?
    {
        return Err(Error::Conflict(
            "Media is already attached to this project".to_string(),
        ));
    }

    let next_order = state
        .repos
        .associations
        .count_for_project(project.id)
        .await? as i32;

    let association = ProjectMediaAssociation::new(
        project.id,
        media.id,
        next_order,
        request.caption,
        request.is_cover,
    )?;

    let created = state
        .repos
        .associations
        .create(&association)
        .await
        .map_err(|e| match e {
            Error::Database(ref db) if showcase_common::is_unique_violation(db) => {
                Error::Conflict("Media is already attached to this project".to_string())
            }
            other => other,
        })?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Detach a media asset from a project
///
/// **DELETE /v1/media/associations/{id}**
pub async fn detach_media(
    AuthUser(ctx): AuthUser,
    State(state): State<MediaState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let association = state
        .repos
        .associations
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Association not found".to_string()))?;

    let project = state
        .repos
        .associations
        .find_project(association.project_id)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

    if !can_edit_project(&project, &ctx) {
        return Err(Error::Authorization(
            "You do not have permission to edit this project".to_string(),
        ));
    }

    state.repos.associations.delete(association.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use showcase_auth::{AuthIdentity, AuthMembership, AuthRole};

    fn ctx(user_id: Uuid, memberships: Vec<AuthMembership>) -> AuthContext {
        AuthContext::new(
            AuthIdentity {
                id: user_id,
                username: "casey".to_string(),
                email: "casey@example.com".to_string(),
                display_name: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            memberships,
        )
    }

    #[test]
    fn test_creator_can_edit() {
        let user_id = Uuid::new_v4();
        let project = ProjectRef {
            id: Uuid::new_v4(),
            slug: "reel".to_string(),
            creator_id: user_id,
            team_id: None,
        };

        assert!(can_edit_project(&project, &ctx(user_id, vec![])));
        assert!(!can_edit_project(&project, &ctx(Uuid::new_v4(), vec![])));
    }

    #[test]
    fn test_team_editor_can_edit() {
        let team_id = Uuid::new_v4();
        let member_id = Uuid::new_v4();
        let project = ProjectRef {
            id: Uuid::new_v4(),
            slug: "reel".to_string(),
            creator_id: Uuid::new_v4(),
            team_id: Some(team_id),
        };

        let editor = ctx(
            member_id,
            vec![AuthMembership {
                team_id,
                team_name: "Team".to_string(),
                role: AuthRole::Editor,
            }],
        );
        assert!(can_edit_project(&project, &editor));

        let viewer = ctx(
            member_id,
            vec![AuthMembership {
                team_id,
                team_name: "Team".to_string(),
                role: AuthRole::Viewer,
            }],
        );
        assert!(!can_edit_project(&project, &viewer));
    }

    #[test]
    fn test_attach_request_caption_boundary() {
        let ok = AttachMediaRequest {
            media_id: Uuid::new_v4(),
            caption: Some("a".repeat(500)),
            is_cover: false,
        };
        assert!(ok.validate().is_ok());

        let too_long = AttachMediaRequest {
            media_id: Uuid::new_v4(),
            caption: Some("a".repeat(501)),
            is_cover: false,
        };
        assert!(too_long.validate().is_err());
    }
}
