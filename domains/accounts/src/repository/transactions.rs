//! Transactional free functions for the accounts domain
//!
//! Registration creates the user and their profile atomically; team
//! creation creates the team and the owner membership atomically.

use crate::domain::entities::{Team, TeamMembership, User, UserProfile};
use sqlx::{Postgres, Transaction};

/// Create a user within an existing transaction.
pub async fn create_user_tx(
    transaction: &mut Transaction<'_, Postgres>,
    user: &User,
) -> std::result::Result<User, sqlx::Error> {
    let created = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, username, email, password_hash, display_name, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING id, username, email, password_hash, display_name, created_at, updated_at",
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.display_name)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(&mut **transaction)
    .await?;

    Ok(created)
}

/// Create a user profile within an existing transaction.
pub async fn create_profile_tx(
    transaction: &mut Transaction<'_, Postgres>,
    profile: &UserProfile,
) -> std::result::Result<UserProfile, sqlx::Error> {
    let created = sqlx::query_as::<_, UserProfile>(
        "INSERT INTO user_profiles \
         (id, user_id, bio, avatar_url, role, website, location, is_public_portfolio, \
          portfolio_theme, total_projects, total_views, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         RETURNING id, user_id, bio, avatar_url, role, website, location, \
                   is_public_portfolio, portfolio_theme, total_projects, total_views, \
                   created_at, updated_at",
    )
    .bind(profile.id)
    .bind(profile.user_id)
    .bind(&profile.bio)
    .bind(&profile.avatar_url)
    .bind(profile.role)
    .bind(&profile.website)
    .bind(&profile.location)
    .bind(profile.is_public_portfolio)
    .bind(profile.portfolio_theme)
    .bind(profile.total_projects)
    .bind(profile.total_views)
    .bind(profile.created_at)
    .bind(profile.updated_at)
    .fetch_one(&mut **transaction)
    .await?;

    Ok(created)
}

/// Create a team within an existing transaction.
pub async fn create_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team: &Team,
) -> std::result::Result<Team, sqlx::Error> {
    let created = sqlx::query_as::<_, Team>(
        "INSERT INTO teams (id, name, description, owner_id, logo_url, is_public, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING id, name, description, owner_id, logo_url, is_public, created_at, updated_at",
    )
    .bind(team.id)
    .bind(&team.name)
    .bind(&team.description)
    .bind(team.owner_id)
    .bind(&team.logo_url)
    .bind(team.is_public)
    .bind(team.created_at)
    .bind(team.updated_at)
    .fetch_one(&mut **transaction)
    .await?;

    Ok(created)
}

/// Create a membership within an existing transaction.
pub async fn create_membership_tx(
    transaction: &mut Transaction<'_, Postgres>,
    membership: &TeamMembership,
) -> std::result::Result<TeamMembership, sqlx::Error> {
    let created = sqlx::query_as::<_, TeamMembership>(
        "INSERT INTO team_memberships (id, team_id, user_id, role, joined_at) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, team_id, user_id, role, joined_at",
    )
    .bind(membership.id)
    .bind(membership.team_id)
    .bind(membership.user_id)
    .bind(membership.role)
    .bind(membership.joined_at)
    .fetch_one(&mut **transaction)
    .await?;

    Ok(created)
}
