//! Projects domain: projects, categories, collections, comments, likes

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
// Re-export repository types
pub use repository::{
    adjust_like_count_tx, delete_like_tx, insert_like_tx, BrowseFilter, CategoryRepository,
    CollectionRepository, CommentRepository, CommentWithAuthor, LikeRepository, MediaEntry,
    ProjectRepository, ProjectsRepositories,
};

// Re-export API types
pub use api::routes;
pub use api::ProjectsState;
