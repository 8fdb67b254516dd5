//! Route definitions for the media domain API

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use super::handlers::{assets, associations, tags};
use super::middleware::MediaState;

/// Headroom above the configured file ceiling for multipart framing and
/// the metadata parts
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Create media library and asset routes
fn asset_routes() -> Router<MediaState> {
    Router::new()
        .route("/v1/media", get(assets::library).post(assets::upload_media))
        .route(
            "/v1/media/{id}",
            get(assets::get_media)
                .patch(assets::update_media)
                .delete(assets::delete_media),
        )
}

/// Create project attachment routes
fn association_routes() -> Router<MediaState> {
    Router::new()
        .route("/v1/projects/{slug}/media", post(associations::attach_media))
        .route(
            "/v1/media/associations/{id}",
            delete(associations::detach_media),
        )
}

/// Create tag routes
fn tag_routes() -> Router<MediaState> {
    Router::new()
        .route("/v1/media/tags", get(tags::list_tags).post(tags::create_tag))
        .route("/v1/media/tags/{slug}", get(tags::get_tag))
        .route("/v1/media/{id}/tags", post(tags::tag_media))
}

/// Create all media domain API routes.
///
/// The body limit is raised above the framework default so uploads up to
/// the configured ceiling reach the handler's own size check.
pub fn routes(max_upload_size: u64) -> Router<MediaState> {
    let body_limit = (max_upload_size as usize).saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .merge(asset_routes())
        .merge(association_routes())
        .merge(tag_routes())
        .layer(DefaultBodyLimit::max(body_limit))
}
