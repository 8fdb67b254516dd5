//! Repository implementations for the projects domain

pub mod categories;
pub mod collections;
pub mod comments;
pub mod likes;
pub mod projects;
pub mod transactions;

use sqlx::{PgPool, Postgres, Transaction};

pub use categories::CategoryRepository;
pub use collections::CollectionRepository;
pub use comments::{CommentRepository, CommentWithAuthor};
pub use likes::LikeRepository;
pub use projects::{BrowseFilter, MediaEntry, ProjectRepository};
pub use transactions::{adjust_like_count_tx, delete_like_tx, insert_like_tx};

/// Combined repository access for the projects domain
#[derive(Clone)]
pub struct ProjectsRepositories {
    pool: PgPool,
    pub projects: ProjectRepository,
    pub categories: CategoryRepository,
    pub collections: CollectionRepository,
    pub comments: CommentRepository,
    pub likes: LikeRepository,
}

impl ProjectsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            projects: ProjectRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            collections: CollectionRepository::new(pool.clone()),
            comments: CommentRepository::new(pool.clone()),
            likes: LikeRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
