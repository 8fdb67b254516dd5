//! Project repository

use crate::domain::entities::{Project, ProjectStatus};
use chrono::{DateTime, Utc};
use showcase_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// All columns in the projects table, used for SELECT and RETURNING clauses.
const PROJECT_COLUMNS: &str = "\
    id, title, slug, description, thumbnail_url, \
    creator_id, team_id, category_id, tags, \
    status, is_public, is_featured, \
    view_count, like_count, created_at, updated_at, published_at";

/// Browse filters for the public project listing
#[derive(Debug, Default, Clone)]
pub struct BrowseFilter {
    pub category_slug: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl BrowseFilter {
    /// Map the requested sort key onto a whitelisted ORDER BY clause.
    /// Unknown keys fall back to newest-first.
    fn order_clause(&self) -> &'static str {
        match self.sort.as_deref() {
            Some("created_at") => "created_at ASC",
            Some("title") => "title ASC",
            Some("-title") => "title DESC",
            Some("view_count") => "view_count ASC",
            Some("-view_count") => "view_count DESC",
            Some("like_count") => "like_count ASC",
            Some("-like_count") => "like_count DESC",
            _ => "created_at DESC",
        }
    }

    /// Build the WHERE clause and return it with the number of binds used
    fn conditions(&self) -> (String, usize) {
        let mut conditions = String::from("is_public = TRUE AND status = 'published'");
        let mut binds = 0;

        if self.category_slug.is_some() {
            binds += 1;
            conditions.push_str(&format!(
                " AND category_id = (SELECT id FROM project_categories WHERE slug = ${binds})"
            ));
        }

        if self.search.is_some() {
            binds += 1;
            conditions.push_str(&format!(
                " AND (title ILIKE ${b} OR description ILIKE ${b} OR tags ILIKE ${b})",
                b = binds
            ));
        }

        (conditions, binds)
    }
}

/// Media attached to a project, in display order (cross-domain read of
/// the media tables).
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct MediaEntry {
    pub association_id: Uuid,
    pub media_id: Uuid,
    pub title: String,
    pub file_type: String,
    pub file_path: String,
    pub caption: Option<String>,
    pub is_cover: bool,
    pub display_order: i32,
    pub added_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find project by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Project>> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    /// Find project by slug
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    /// Check whether a slug is already taken
    pub async fn slug_exists(&self, slug: &str) -> Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM projects WHERE slug = $1)")
                .bind(slug)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Create a new project
    pub async fn create(&self, project: &Project) -> Result<Project> {
        let query = format!(
            "INSERT INTO projects ({PROJECT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING {PROJECT_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Project>(&query)
            .bind(project.id)
            .bind(&project.title)
            .bind(&project.slug)
            .bind(&project.description)
            .bind(&project.thumbnail_url)
            .bind(project.creator_id)
            .bind(project.team_id)
            .bind(project.category_id)
            .bind(&project.tags)
            .bind(project.status)
            .bind(project.is_public)
            .bind(project.is_featured)
            .bind(project.view_count)
            .bind(project.like_count)
            .bind(project.created_at)
            .bind(project.updated_at)
            .bind(project.published_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Update an existing project
    pub async fn update(&self, project: &Project) -> Result<Project> {
        let query = format!(
            "UPDATE projects SET \
                title = $2, description = $3, thumbnail_url = $4, team_id = $5, \
                category_id = $6, tags = $7, status = $8, is_public = $9, \
                is_featured = $10, published_at = $11, updated_at = NOW() \
             WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Project>(&query)
            .bind(project.id)
            .bind(&project.title)
            .bind(&project.description)
            .bind(&project.thumbnail_url)
            .bind(project.team_id)
            .bind(project.category_id)
            .bind(&project.tags)
            .bind(project.status)
            .bind(project.is_public)
            .bind(project.is_featured)
            .bind(project.published_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Delete a project
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All projects created by a user, newest first
    pub async fn list_for_creator(&self, creator_id: Uuid) -> Result<Vec<Project>> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE creator_id = $1 ORDER BY created_at DESC"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(creator_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    /// Most recent projects for the dashboard
    pub async fn recent_for_creator(&self, creator_id: Uuid, limit: i64) -> Result<Vec<Project>> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE creator_id = $1 ORDER BY created_at DESC LIMIT $2"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(creator_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    /// Count a creator's projects, optionally restricted to one status
    pub async fn count_for_creator(
        &self,
        creator_id: Uuid,
        status: Option<ProjectStatus>,
    ) -> Result<i64> {
        let (count,): (i64,) = match status {
            Some(status) => {
                sqlx::query_as(
                    "SELECT COUNT(*) FROM projects WHERE creator_id = $1 AND status = $2",
                )
                .bind(creator_id)
                .bind(status)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM projects WHERE creator_id = $1")
                    .bind(creator_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count)
    }

    /// Browse public published projects with optional filters
    pub async fn browse(
        &self,
        filter: &BrowseFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>> {
        let (conditions, binds) = filter.conditions();
        let order = filter.order_clause();
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE {conditions} \
             ORDER BY {order} LIMIT ${} OFFSET ${}",
            binds + 1,
            binds + 2
        );

        let mut q = sqlx::query_as::<_, Project>(&query);
        if let Some(ref category_slug) = filter.category_slug {
            q = q.bind(category_slug);
        }
        if let Some(ref search) = filter.search {
            q = q.bind(format!("%{}%", search));
        }
        let projects = q.bind(limit).bind(offset).fetch_all(&self.pool).await?;

        Ok(projects)
    }

    /// Total matches for a browse query
    pub async fn count_browse(&self, filter: &BrowseFilter) -> Result<i64> {
        let (conditions, _) = filter.conditions();
        let query = format!("SELECT COUNT(*) FROM projects WHERE {conditions}");

        let mut q = sqlx::query_as::<_, (i64,)>(&query);
        if let Some(ref category_slug) = filter.category_slug {
            q = q.bind(category_slug);
        }
        if let Some(ref search) = filter.search {
            q = q.bind(format!("%{}%", search));
        }
        let (count,) = q.fetch_one(&self.pool).await?;

        Ok(count)
    }

    /// Public published projects in a category, newest first
    pub async fn list_by_category(
        &self,
        category_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE category_id = $1 AND is_public = TRUE AND status = 'published' \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(category_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    /// Total public published projects in a category
    pub async fn count_by_category(&self, category_id: Uuid) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM projects \
             WHERE category_id = $1 AND is_public = TRUE AND status = 'published'",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Bump the view counter and return the new value
    pub async fn increment_view_count(&self, id: Uuid) -> Result<i32> {
        let (view_count,): (i32,) = sqlx::query_as(
            "UPDATE projects SET view_count = view_count + 1 WHERE id = $1 RETURNING view_count",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(view_count)
    }

    /// Media attached to a project, in display order
    pub async fn list_media(&self, project_id: Uuid) -> Result<Vec<MediaEntry>> {
        let entries = sqlx::query_as::<_, MediaEntry>(
            "SELECT a.id AS association_id, a.media_id, m.title, \
                    m.file_type::text AS file_type, m.file_path, \
                    a.caption, a.is_cover, a.display_order, a.added_at \
             FROM project_media a \
             INNER JOIN media_assets m ON m.id = a.media_id \
             WHERE a.project_id = $1 \
             ORDER BY a.display_order ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause_whitelist() {
        let mut filter = BrowseFilter::default();
        assert_eq!(filter.order_clause(), "created_at DESC");

        filter.sort = Some("-like_count".to_string());
        assert_eq!(filter.order_clause(), "like_count DESC");

        filter.sort = Some("title".to_string());
        assert_eq!(filter.order_clause(), "title ASC");

        // Arbitrary input cannot reach the SQL string
        filter.sort = Some("created_at; DROP TABLE projects".to_string());
        assert_eq!(filter.order_clause(), "created_at DESC");
    }

    #[test]
    fn test_conditions_bind_counting() {
        let none = BrowseFilter::default();
        assert_eq!(none.conditions().1, 0);

        let category_only = BrowseFilter {
            category_slug: Some("motion".to_string()),
            ..Default::default()
        };
        assert_eq!(category_only.conditions().1, 1);

        let both = BrowseFilter {
            category_slug: Some("motion".to_string()),
            search: Some("reel".to_string()),
            sort: None,
        };
        let (sql, binds) = both.conditions();
        assert_eq!(binds, 2);
        assert!(sql.contains("$1"));
        assert!(sql.contains("$2"));
        assert!(sql.contains("is_public = TRUE"));
        assert!(sql.contains("status = 'published'"));
    }
}
