//! Transactional free functions for the projects domain
//!
//! The like toggle mutates two rows (the like itself and the denormalized
//! counter on the project); both run under one transaction.

use crate::domain::entities::ProjectLike;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Insert a like within an existing transaction.
pub async fn insert_like_tx(
    transaction: &mut Transaction<'_, Postgres>,
    like: &ProjectLike,
) -> std::result::Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO project_likes (id, project_id, user_id, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(like.id)
    .bind(like.project_id)
    .bind(like.user_id)
    .bind(like.created_at)
    .execute(&mut **transaction)
    .await?;

    Ok(())
}

/// Delete a like within an existing transaction; returns whether a row
/// was removed.
pub async fn delete_like_tx(
    transaction: &mut Transaction<'_, Postgres>,
    project_id: Uuid,
    user_id: Uuid,
) -> std::result::Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM project_likes WHERE project_id = $1 AND user_id = $2")
        .bind(project_id)
        .bind(user_id)
        .execute(&mut **transaction)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Adjust the denormalized like counter, floored at zero. Returns the
/// new value.
pub async fn adjust_like_count_tx(
    transaction: &mut Transaction<'_, Postgres>,
    project_id: Uuid,
    delta: i32,
) -> std::result::Result<i32, sqlx::Error> {
    let (like_count,): (i32,) = sqlx::query_as(
        "UPDATE projects SET like_count = GREATEST(0, like_count + $2) \
         WHERE id = $1 RETURNING like_count",
    )
    .bind(project_id)
    .bind(delta)
    .fetch_one(&mut **transaction)
    .await?;

    Ok(like_count)
}
