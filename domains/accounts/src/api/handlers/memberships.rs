//! Team membership handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use showcase_auth::AuthUser;
use showcase_common::{Error, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::AccountsState;
use crate::domain::entities::{MembershipRole, TeamMembership};
use crate::repository::MembershipWithUser;

/// Request for adding a member to a team
#[derive(Debug, Deserialize, Validate)]
pub struct AddMemberRequest {
    #[validate(length(min = 3, max = 30))]
    pub username: String,

    /// Role granted to the new member
    #[serde(default)]
    pub role: MembershipRole,
}

/// Add a member to a team
///
/// **POST /v1/teams/{team_id}/members**
///
/// Only the team owner can add members. A user can hold at most one
/// membership per team.
pub async fn add_member(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
    Path(team_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<AddMemberRequest>,
) -> Result<(StatusCode, Json<MembershipWithUser>)> {
    let team = state
        .repos
        .teams
        .find(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if team.owner_id != ctx.user.id {
        return Err(Error::Authorization(
            "Only the team owner can add members".to_string(),
        ));
    }

    // Owner role is reserved for the creating user
    if request.role.is_owner() {
        return Err(Error::Validation(
            "Cannot grant the owner role to added members".to_string(),
        ));
    }

    let user = state
        .repos
        .users
        .find_by_username(&request.username)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if state
        .repos
        .memberships
        .get_by_team_and_user(team_id, user.id)
        .await?
        .is_some()
    {
        return Err(Error::Conflict(
            "User is already a team member".to_string(),
        ));
    }

    let membership = TeamMembership::new(team_id, user.id, request.role);
    let created = state
        .repos
        .memberships
        .create(&membership)
        .await
        .map_err(|e| match e {
            Error::Database(ref db) if showcase_common::is_unique_violation(db) => {
                Error::Conflict("User is already a team member".to_string())
            }
            other => other,
        })?;

    let response = MembershipWithUser {
        id: created.id,
        team_id: created.team_id,
        user_id: created.user_id,
        role: created.role,
        joined_at: created.joined_at,
        username: user.username,
        display_name: user.display_name,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Remove a member from a team
///
/// **DELETE /v1/teams/{team_id}/members/{user_id}**
///
/// Only the team owner can remove members, and cannot remove themselves.
pub async fn remove_member(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
    Path((team_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    let team = state
        .repos
        .teams
        .find(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if team.owner_id != ctx.user.id {
        return Err(Error::Authorization(
            "Only the team owner can remove members".to_string(),
        ));
    }

    if user_id == team.owner_id {
        return Err(Error::Validation(
            "The team owner cannot be removed".to_string(),
        ));
    }

    let removed = state.repos.memberships.delete(team_id, user_id).await?;
    if !removed {
        return Err(Error::NotFound("Membership not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_member_request_validation() {
        let valid = AddMemberRequest {
            username: "casey".to_string(),
            role: MembershipRole::Editor,
        };
        assert!(valid.validate().is_ok());

        let short = AddMemberRequest {
            username: "ab".to_string(),
            role: MembershipRole::Viewer,
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_add_member_request_defaults_to_viewer() {
        let request: AddMemberRequest =
            serde_json::from_str(r#"{"username": "casey"}"#).unwrap();
        assert_eq!(request.role, MembershipRole::Viewer);
    }
}
