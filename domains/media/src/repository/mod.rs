//! Repository implementations for the media domain

pub mod assets;
pub mod associations;
pub mod details;
pub mod tags;

use sqlx::PgPool;

pub use assets::{MediaAssetRepository, ProjectUsage};
pub use associations::{AssociationRepository, ProjectRef};
pub use details::MediaDetailRepository;
pub use tags::TagRepository;

/// Combined repository access for the media domain
#[derive(Clone)]
pub struct MediaRepositories {
    pub assets: MediaAssetRepository,
    pub details: MediaDetailRepository,
    pub associations: AssociationRepository,
    pub tags: TagRepository,
}

impl MediaRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            assets: MediaAssetRepository::new(pool.clone()),
            details: MediaDetailRepository::new(pool.clone()),
            associations: AssociationRepository::new(pool.clone()),
            tags: TagRepository::new(pool),
        }
    }
}
