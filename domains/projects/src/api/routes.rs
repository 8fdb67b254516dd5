//! Route definitions for the projects domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{categories, collections, interactions, projects};
use super::middleware::ProjectsState;

/// Create dashboard and project CRUD routes
fn project_routes() -> Router<ProjectsState> {
    Router::new()
        .route("/v1/dashboard", get(projects::dashboard))
        .route(
            "/v1/projects",
            get(projects::browse_projects).post(projects::create_project),
        )
        .route(
            "/v1/projects/{slug}",
            get(projects::get_project)
                .patch(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/v1/projects/{slug}/publish", post(projects::publish_project))
}

/// Create comment and like routes
fn interaction_routes() -> Router<ProjectsState> {
    Router::new()
        .route(
            "/v1/projects/{slug}/comments",
            post(interactions::add_comment),
        )
        .route("/v1/projects/{slug}/like", post(interactions::toggle_like))
}

/// Create category browsing routes
fn category_routes() -> Router<ProjectsState> {
    Router::new()
        .route("/v1/categories", get(categories::list_categories))
        .route("/v1/categories/{slug}", get(categories::category_detail))
}

/// Create collection routes
fn collection_routes() -> Router<ProjectsState> {
    Router::new()
        .route(
            "/v1/collections",
            get(collections::list_collections).post(collections::create_collection),
        )
        .route(
            "/v1/collections/{id}/projects",
            post(collections::add_project),
        )
        .route(
            "/v1/users/{username}/collections/{slug}",
            get(collections::get_collection),
        )
}

/// Create all projects domain API routes
pub fn routes() -> Router<ProjectsState> {
    Router::new()
        .merge(project_routes())
        .merge(interaction_routes())
        .merge(category_routes())
        .merge(collection_routes())
}
