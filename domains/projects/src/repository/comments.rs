//! Project comment repository

use crate::domain::entities::ProjectComment;
use chrono::{DateTime, Utc};
use showcase_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// All columns in the project_comments table.
const COMMENT_COLUMNS: &str = "id, project_id, author_id, content, created_at, updated_at";

/// Comment joined with its author's public identity
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub project_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    pub display_name: Option<String>,
}

#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Comments on a project, newest first
    pub async fn list_for_project(&self, project_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.project_id, c.author_id, c.content, c.created_at, c.updated_at, \
                    u.username, u.display_name \
             FROM project_comments c \
             INNER JOIN users u ON u.id = c.author_id \
             WHERE c.project_id = $1 \
             ORDER BY c.created_at DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// Create a new comment
    pub async fn create(&self, comment: &ProjectComment) -> Result<ProjectComment> {
        let query = format!(
            "INSERT INTO project_comments ({COMMENT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COMMENT_COLUMNS}"
        );
        let created = sqlx::query_as::<_, ProjectComment>(&query)
            .bind(comment.id)
            .bind(comment.project_id)
            .bind(comment.author_id)
            .bind(&comment.content)
            .bind(comment.created_at)
            .bind(comment.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }
}
