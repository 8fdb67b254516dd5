//! Category browsing handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use showcase_common::{Error, Pagination, Result};

use crate::api::handlers::projects::ProjectResponse;
use crate::api::middleware::ProjectsState;
use crate::domain::entities::ProjectCategory;

/// Category page payload
#[derive(Debug, Serialize)]
pub struct CategoryDetailResponse {
    #[serde(flatten)]
    pub category: ProjectCategory,
    pub projects: Vec<ProjectResponse>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

/// List all categories
///
/// **GET /v1/categories**
pub async fn list_categories(
    State(state): State<ProjectsState>,
) -> Result<Json<Vec<ProjectCategory>>> {
    let categories = state.repos.categories.list_all().await?;
    Ok(Json(categories))
}

/// View public published projects in a category
///
/// **GET /v1/categories/{slug}**
pub async fn category_detail(
    State(state): State<ProjectsState>,
    Path(slug): Path<String>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<CategoryDetailResponse>> {
    let category = state
        .repos
        .categories
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| Error::NotFound("Category not found".to_string()))?;

    let limit = pagination.limit();
    let offset = pagination.offset();

    let projects = state
        .repos
        .projects
        .list_by_category(category.id, limit, offset)
        .await?;
    let total = state.repos.projects.count_by_category(category.id).await?;

    Ok(Json(CategoryDetailResponse {
        category,
        projects: projects.into_iter().map(Into::into).collect(),
        total,
        offset,
        limit,
    }))
}
