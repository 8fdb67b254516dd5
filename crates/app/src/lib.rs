//! Showcase application composition root
//!
//! Composes all domain routers into a single application.

use axum::Router;
use showcase_accounts::{AccountsRepositories, AccountsState};
use showcase_auth::{AuthBackend, AuthConfig};
use showcase_common::Config;
use showcase_media::{MediaRepositories, MediaState, MediaStorage};
use showcase_projects::{ProjectsRepositories, ProjectsState};
use sqlx::PgPool;

/// Create the main application router with all routes and middleware
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    // One shared auth backend; every domain state exposes it via FromRef
    let auth = AuthBackend::new(pool.clone(), AuthConfig::new(config.jwt_secret.clone()));

    let accounts_state = AccountsState {
        repos: AccountsRepositories::new(pool.clone()),
        auth: auth.clone(),
    };

    let projects_state = ProjectsState {
        repos: ProjectsRepositories::new(pool.clone()),
        auth: auth.clone(),
    };

    let media_state = MediaState {
        repos: MediaRepositories::new(pool),
        auth,
        storage: MediaStorage::new(config.media_root.clone()),
        max_upload_size: config.max_upload_size,
    };

    // Build router — compose domain routers with shared infrastructure routes
    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Showcase API v0.1.0" }))
        .merge(showcase_accounts::routes().with_state(accounts_state))
        .merge(showcase_projects::routes().with_state(projects_state))
        .merge(showcase_media::routes(config.max_upload_size).with_state(media_state));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
