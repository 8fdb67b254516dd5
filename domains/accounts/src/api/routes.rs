//! Route definitions for the accounts domain API

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{auth, memberships, teams, users};
use super::middleware::AccountsState;

/// Create authentication routes
fn auth_routes() -> Router<AccountsState> {
    Router::new()
        .route("/v1/auth/register", post(auth::register))
        .route("/v1/auth/login", post(auth::login))
        .route("/v1/auth/whoami", get(auth::whoami))
}

/// Create account and portfolio routes
fn account_routes() -> Router<AccountsState> {
    Router::new()
        .route(
            "/v1/account",
            get(users::get_account).patch(users::update_account),
        )
        .route("/v1/users/{username}/portfolio", get(users::portfolio))
}

/// Create team management routes
fn team_routes() -> Router<AccountsState> {
    Router::new()
        .route("/v1/teams", get(teams::list_teams).post(teams::create_team))
        .route("/v1/teams/{id}", get(teams::get_team))
        .route(
            "/v1/teams/{team_id}/members",
            post(memberships::add_member),
        )
        .route(
            "/v1/teams/{team_id}/members/{user_id}",
            delete(memberships::remove_member),
        )
}

/// Create all accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(team_routes())
}
