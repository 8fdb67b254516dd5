//! Media domain: asset uploads, per-type details, project associations, tags

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::storage::MediaStorage;
// Re-export repository types
pub use repository::{
    AssociationRepository, MediaAssetRepository, MediaDetailRepository, MediaRepositories,
    ProjectRef, ProjectUsage, TagRepository,
};

// Re-export API types
pub use api::routes;
pub use api::MediaState;
