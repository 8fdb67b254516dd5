//! Project category repository

use crate::domain::entities::ProjectCategory;
use showcase_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// All columns in the project_categories table.
const CATEGORY_COLUMNS: &str = "id, name, slug, description, icon";

#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find category by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<ProjectCategory>> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM project_categories WHERE id = $1");
        let category = sqlx::query_as::<_, ProjectCategory>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    /// Find category by slug
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<ProjectCategory>> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM project_categories WHERE slug = $1");
        let category = sqlx::query_as::<_, ProjectCategory>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    /// All categories, ordered by name
    pub async fn list_all(&self) -> Result<Vec<ProjectCategory>> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM project_categories ORDER BY name ASC");
        let categories = sqlx::query_as::<_, ProjectCategory>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }
}
