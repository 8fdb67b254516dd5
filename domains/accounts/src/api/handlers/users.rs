//! Account and public portfolio handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use showcase_auth::{AuthUser, MaybeAuthUser};
use showcase_common::{Error, Result, ValidatedJson};
use validator::Validate;

use crate::api::handlers::auth::UserResponse;
use crate::api::middleware::AccountsState;
use crate::domain::entities::{PortfolioTheme, ProfileRole, UserProfile};
use crate::repository::ProjectCard;
use validator::ValidateEmail;

/// Profile payload returned by account and portfolio endpoints
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: ProfileRole,
    pub website: Option<String>,
    pub location: Option<String>,
    pub is_public_portfolio: bool,
    pub portfolio_theme: PortfolioTheme,
    pub total_projects: i32,
    pub total_views: i32,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            bio: profile.bio,
            avatar_url: profile.avatar_url,
            role: profile.role,
            website: profile.website,
            location: profile.location,
            is_public_portfolio: profile.is_public_portfolio,
            portfolio_theme: profile.portfolio_theme,
            total_projects: profile.total_projects,
            total_views: profile.total_views,
        }
    }
}

/// Combined account payload (user + profile)
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user: UserResponse,
    pub profile: ProfileResponse,
}

/// Request for updating the account and its profile
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 500))]
    pub bio: Option<String>,

    pub role: Option<ProfileRole>,

    #[validate(url)]
    pub website: Option<String>,

    #[validate(length(max = 100))]
    pub location: Option<String>,

    pub is_public_portfolio: Option<bool>,

    pub portfolio_theme: Option<PortfolioTheme>,

    #[validate(url)]
    pub avatar_url: Option<String>,
}

/// Public portfolio page payload
#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub username: String,
    pub display_name: Option<String>,
    pub profile: ProfileResponse,
    pub projects: Vec<ProjectCard>,
    pub project_count: usize,
}

/// Get the current account
///
/// **GET /v1/account**
pub async fn get_account(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
) -> Result<Json<AccountResponse>> {
    let user = state
        .repos
        .users
        .find(ctx.user.id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    let profile = state
        .repos
        .profiles
        .find_by_user(ctx.user.id)
        .await?
        .ok_or_else(|| Error::Internal("Profile missing for user".to_string()))?;

    Ok(Json(AccountResponse {
        user: user.into(),
        profile: profile.into(),
    }))
}

/// Update the current account
///
/// **PATCH /v1/account**
///
/// Applies user-level fields (display name, email) and profile fields in
/// one request, mirroring a single settings form.
pub async fn update_account(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>> {
    let mut user = state
        .repos
        .users
        .find(ctx.user.id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    let mut profile = state
        .repos
        .profiles
        .find_by_user(ctx.user.id)
        .await?
        .ok_or_else(|| Error::Internal("Profile missing for user".to_string()))?;

    if let Some(display_name) = request.display_name {
        user.display_name = Some(display_name);
    }

    if let Some(email) = request.email {
        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }
        if email != user.email && state.repos.users.email_exists(&email).await? {
            return Err(Error::Conflict("Email already exists".to_string()));
        }
        user.email = email;
    }

    if let Some(bio) = request.bio {
        profile.bio = Some(bio);
    }
    if let Some(role) = request.role {
        profile.role = role;
    }
    if let Some(website) = request.website {
        profile.website = Some(website);
    }
    if let Some(location) = request.location {
        profile.location = Some(location);
    }
    if let Some(is_public) = request.is_public_portfolio {
        profile.is_public_portfolio = is_public;
    }
    if let Some(theme) = request.portfolio_theme {
        profile.portfolio_theme = theme;
    }
    if let Some(avatar_url) = request.avatar_url {
        profile.avatar_url = Some(avatar_url);
    }

    profile.validate()?;

    let updated_user = state.repos.users.update(&user).await?;
    let updated_profile = state.repos.profiles.update(&profile).await?;

    Ok(Json(AccountResponse {
        user: updated_user.into(),
        profile: updated_profile.into(),
    }))
}

/// View a user's public portfolio
///
/// **GET /v1/users/{username}/portfolio**
///
/// Private portfolios are only served to their owner. Viewing someone
/// else's portfolio bumps its view counter.
pub async fn portfolio(
    viewer: MaybeAuthUser,
    State(state): State<AccountsState>,
    Path(username): Path<String>,
) -> Result<Json<PortfolioResponse>> {
    let user = state
        .repos
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    let mut profile = state
        .repos
        .profiles
        .find_by_user(user.id)
        .await?
        .ok_or_else(|| Error::NotFound("Portfolio not found".to_string()))?;

    let is_owner = viewer.context().map(|c| c.user.id) == Some(user.id);

    if !profile.is_public_portfolio && !is_owner {
        return Err(Error::Authorization("This portfolio is private".to_string()));
    }

    if !is_owner {
        state.repos.profiles.increment_total_views(user.id).await?;
        profile.total_views += 1;
    }

    let projects = state.repos.profiles.list_public_projects(user.id).await?;
    let project_count = projects.len();

    Ok(Json(PortfolioResponse {
        username: user.username,
        display_name: user.display_name,
        profile: profile.into(),
        projects,
        project_count,
    }))
}
