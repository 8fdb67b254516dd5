//! Team management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showcase_auth::{AuthUser, MaybeAuthUser};
use showcase_common::{Error, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::AccountsState;
use crate::domain::entities::{MembershipRole, Team, TeamMembership};
use crate::repository::{create_membership_tx, create_team_tx, MembershipWithUser, TeamProjectCard};

/// Request for creating a team
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[serde(default)]
    pub is_public: bool,
}

/// Team payload for API operations
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub logo_url: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Caller's role in this team, if they are a member
    pub user_role: Option<MembershipRole>,
}

impl TeamResponse {
    fn from_team(team: Team, user_role: Option<MembershipRole>) -> Self {
        Self {
            id: team.id,
            name: team.name,
            description: team.description,
            owner_id: team.owner_id,
            logo_url: team.logo_url,
            is_public: team.is_public,
            created_at: team.created_at,
            updated_at: team.updated_at,
            user_role,
        }
    }
}

/// Teams overview for the current user
#[derive(Debug, Serialize)]
pub struct TeamListResponse {
    pub teams: Vec<TeamResponse>,
    pub owned_teams: Vec<TeamResponse>,
}

/// Team detail payload: team + members + its projects
#[derive(Debug, Serialize)]
pub struct TeamDetailResponse {
    #[serde(flatten)]
    pub team: TeamResponse,
    pub members: Vec<MembershipWithUser>,
    pub projects: Vec<TeamProjectCard>,
    pub is_owner: bool,
}

/// List the caller's teams
///
/// **GET /v1/teams**
///
/// Returns teams the caller is a member of (with role) plus the subset
/// they own.
pub async fn list_teams(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
) -> Result<Json<TeamListResponse>> {
    let member_teams = state.repos.teams.list_for_user(ctx.user.id).await?;
    let owned = state.repos.teams.list_owned(ctx.user.id).await?;

    let teams = member_teams
        .into_iter()
        .map(|(team, role)| TeamResponse::from_team(team, Some(role)))
        .collect();

    let owned_teams = owned
        .into_iter()
        .map(|team| TeamResponse::from_team(team, Some(MembershipRole::Owner)))
        .collect();

    Ok(Json(TeamListResponse { teams, owned_teams }))
}

/// Create a new team
///
/// **POST /v1/teams**
///
/// The creator becomes the team owner; team row and owner membership are
/// written in one transaction.
pub async fn create_team(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>)> {
    if state.repos.teams.name_exists(&request.name).await? {
        return Err(Error::Conflict(format!(
            "Team name '{}' already exists",
            request.name
        )));
    }

    let team = Team::new(
        request.name,
        request.description,
        ctx.user.id,
        request.is_public,
    )?;

    let mut tx = state
        .repos
        .begin()
        .await
        .map_err(|e| Error::Internal(format!("Failed to begin transaction: {}", e)))?;

    let created_team = create_team_tx(&mut tx, &team).await.map_err(|e| {
        if showcase_common::is_unique_violation(&e) {
            Error::Conflict("Team name already exists".to_string())
        } else {
            Error::Internal(format!("Failed to create team: {}", e))
        }
    })?;

    let membership = TeamMembership::new(created_team.id, ctx.user.id, MembershipRole::Owner);

    create_membership_tx(&mut tx, &membership)
        .await
        .map_err(|e| Error::Internal(format!("Failed to create membership: {}", e)))?;

    tx.commit()
        .await
        .map_err(|e| Error::Internal(format!("Failed to commit transaction: {}", e)))?;

    let response = TeamResponse::from_team(created_team, Some(MembershipRole::Owner));
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get team details
///
/// **GET /v1/teams/{id}**
///
/// Public teams are visible to anyone; private teams only to members.
pub async fn get_team(
    viewer: MaybeAuthUser,
    State(state): State<AccountsState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<TeamDetailResponse>> {
    let team = state
        .repos
        .teams
        .find(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    let user_role = match viewer.context() {
        Some(ctx) => {
            state
                .repos
                .memberships
                .get_by_team_and_user(team_id, ctx.user.id)
                .await?
                .map(|m| m.role)
        }
        None => None,
    };

    if !team.is_public && user_role.is_none() {
        return Err(Error::Authorization(
            "You do not have access to this team".to_string(),
        ));
    }

    let members = state.repos.memberships.list_for_team(team_id).await?;
    let projects = state.repos.teams.list_projects(team_id).await?;

    let is_owner = viewer.context().map(|c| c.user.id) == Some(team.owner_id);

    Ok(Json(TeamDetailResponse {
        team: TeamResponse::from_team(team, user_role),
        members,
        projects,
        is_owner,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_team_request_validation() {
        let valid = CreateTeamRequest {
            name: "Design Collective".to_string(),
            description: Some("Shared workspace".to_string()),
            is_public: true,
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateTeamRequest {
            name: String::new(),
            description: None,
            is_public: false,
        };
        assert!(empty_name.validate().is_err());

        let long_name = CreateTeamRequest {
            name: "a".repeat(201),
            description: None,
            is_public: false,
        };
        assert!(long_name.validate().is_err());

        let long_description = CreateTeamRequest {
            name: "Team".to_string(),
            description: Some("a".repeat(501)),
            is_public: false,
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_team_response_serialization() {
        let team = Team::new("Design Collective".to_string(), None, Uuid::new_v4(), true).unwrap();
        let response = TeamResponse::from_team(team, Some(MembershipRole::Owner));

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("Design Collective"));
        assert!(json.contains("\"user_role\":\"owner\""));
    }
}
