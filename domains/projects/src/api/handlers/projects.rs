//! Project management and browsing handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showcase_auth::{AuthUser, MaybeAuthUser};
use showcase_common::{Error, Pagination, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::ProjectsState;
use crate::domain::entities::{validate_slug, Project, ProjectCategory, ProjectStatus};
use crate::repository::{BrowseFilter, CommentWithAuthor, MediaEntry};

/// Number of recent projects shown on the dashboard
const DASHBOARD_RECENT_LIMIT: i64 = 6;

/// Request for creating a project
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub description: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(length(max = 500))]
    pub tags: Option<String>,

    #[validate(custom(function = "validate_slug_format", message = "Invalid slug format"))]
    pub slug: Option<String>,

    /// Assign the project to a team the caller can edit in
    pub team_id: Option<Uuid>,
}

/// Custom validation function for slug format
fn validate_slug_format(slug: &str) -> std::result::Result<(), validator::ValidationError> {
    validate_slug(slug).map_err(|_| validator::ValidationError::new("invalid_format"))
}

/// Request for updating a project
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 500))]
    pub tags: Option<String>,

    pub category_id: Option<Uuid>,

    pub team_id: Option<Uuid>,

    pub is_public: Option<bool>,

    pub is_featured: Option<bool>,

    #[validate(url)]
    pub thumbnail_url: Option<String>,
}

/// Browse query parameters
#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// Project payload for API operations
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub creator_id: Uuid,
    pub team_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub status: ProjectStatus,
    pub is_public: bool,
    pub is_featured: bool,
    pub view_count: i32,
    pub like_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        let tags = project.tags_list();
        Self {
            id: project.id,
            title: project.title,
            slug: project.slug,
            description: project.description,
            thumbnail_url: project.thumbnail_url,
            creator_id: project.creator_id,
            team_id: project.team_id,
            category_id: project.category_id,
            tags,
            status: project.status,
            is_public: project.is_public,
            is_featured: project.is_featured,
            view_count: project.view_count,
            like_count: project.like_count,
            created_at: project.created_at,
            updated_at: project.updated_at,
            published_at: project.published_at,
        }
    }
}

/// Dashboard payload for the current user
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub project_count: i64,
    pub draft_count: i64,
    pub published_count: i64,
    pub recent_projects: Vec<ProjectResponse>,
}

/// Project detail payload: project + media + comments + caller context
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: ProjectResponse,
    pub media: Vec<MediaEntry>,
    pub comments: Vec<CommentWithAuthor>,
    pub comment_count: usize,
    pub user_liked: bool,
    pub can_edit: bool,
}

/// Browse result page
#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    pub projects: Vec<ProjectResponse>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
    pub categories: Vec<ProjectCategory>,
}

/// Resolve a project by slug or report 404
async fn load_by_slug(state: &ProjectsState, slug: &str) -> Result<Project> {
    state
        .repos
        .projects
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))
}

/// Check that an optional team assignment is one the caller can edit in
fn check_team_assignment(
    ctx: &showcase_auth::AuthContext,
    team_id: Option<Uuid>,
) -> Result<()> {
    if let Some(team_id) = team_id {
        if !ctx.can_edit_team_projects(team_id) {
            return Err(Error::Authorization(
                "You cannot assign projects to this team".to_string(),
            ));
        }
    }
    Ok(())
}

/// User dashboard
///
/// **GET /v1/dashboard**
///
/// Shows the caller's projects with per-status counts and the most
/// recent six.
pub async fn dashboard(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
) -> Result<Json<DashboardResponse>> {
    let project_count = state
        .repos
        .projects
        .count_for_creator(ctx.user.id, None)
        .await?;
    let draft_count = state
        .repos
        .projects
        .count_for_creator(ctx.user.id, Some(ProjectStatus::Draft))
        .await?;
    let published_count = state
        .repos
        .projects
        .count_for_creator(ctx.user.id, Some(ProjectStatus::Published))
        .await?;
    let recent = state
        .repos
        .projects
        .recent_for_creator(ctx.user.id, DASHBOARD_RECENT_LIMIT)
        .await?;

    Ok(Json(DashboardResponse {
        project_count,
        draft_count,
        published_count,
        recent_projects: recent.into_iter().map(Into::into).collect(),
    }))
}

/// Create a new project
///
/// **POST /v1/projects**
///
/// Projects start as private drafts.
pub async fn create_project(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    ValidatedJson(request): ValidatedJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>)> {
    if let Some(category_id) = request.category_id {
        if state.repos.categories.find(category_id).await?.is_none() {
            return Err(Error::Validation("Unknown category".to_string()));
        }
    }

    check_team_assignment(&ctx, request.team_id)?;

    let mut project = Project::new(
        request.title,
        request.description,
        ctx.user.id,
        request.category_id,
        request.tags,
        request.slug,
    )?;
    project.team_id = request.team_id;

    if state.repos.projects.slug_exists(&project.slug).await? {
        return Err(Error::Conflict(format!(
            "Project slug '{}' already exists",
            project.slug
        )));
    }

    let created = state
        .repos
        .projects
        .create(&project)
        .await
        .map_err(|e| match e {
            Error::Database(ref db) if showcase_common::is_unique_violation(db) => {
                Error::Conflict("Project slug already exists".to_string())
            }
            other => other,
        })?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// View project details
///
/// **GET /v1/projects/{slug}**
///
/// Private projects are indistinguishable from absent ones. Each
/// successful view bumps the view counter.
pub async fn get_project(
    viewer: MaybeAuthUser,
    State(state): State<ProjectsState>,
    Path(slug): Path<String>,
) -> Result<Json<ProjectDetailResponse>> {
    let mut project = load_by_slug(&state, &slug).await?;

    if !project.can_view(viewer.context()) {
        return Err(Error::NotFound("Project not found".to_string()));
    }

    project.view_count = state.repos.projects.increment_view_count(project.id).await?;

    let media = state.repos.projects.list_media(project.id).await?;
    let comments = state.repos.comments.list_for_project(project.id).await?;

    let user_liked = match viewer.context() {
        Some(ctx) => state.repos.likes.exists(project.id, ctx.user.id).await?,
        None => false,
    };
    let can_edit = project.can_edit(viewer.context());
    let comment_count = comments.len();

    Ok(Json(ProjectDetailResponse {
        project: project.into(),
        media,
        comments,
        comment_count,
        user_liked,
        can_edit,
    }))
}

/// Update project details
///
/// **PATCH /v1/projects/{slug}**
pub async fn update_project(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(slug): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    let mut project = load_by_slug(&state, &slug).await?;

    if !project.can_edit(Some(&ctx)) {
        return Err(Error::Authorization(
            "You do not have permission to edit this project".to_string(),
        ));
    }

    if let Some(title) = request.title {
        project.title = title;
    }
    if let Some(description) = request.description {
        project.description = Some(description);
    }
    if let Some(tags) = request.tags {
        project.tags = tags;
    }
    if let Some(category_id) = request.category_id {
        if state.repos.categories.find(category_id).await?.is_none() {
            return Err(Error::Validation("Unknown category".to_string()));
        }
        project.category_id = Some(category_id);
    }
    if let Some(team_id) = request.team_id {
        check_team_assignment(&ctx, Some(team_id))?;
        project.team_id = Some(team_id);
    }
    if let Some(is_public) = request.is_public {
        project.is_public = is_public;
    }
    if let Some(is_featured) = request.is_featured {
        project.is_featured = is_featured;
    }
    if let Some(thumbnail_url) = request.thumbnail_url {
        project.thumbnail_url = Some(thumbnail_url);
    }

    project.validate()?;

    let updated = state.repos.projects.update(&project).await?;
    Ok(Json(updated.into()))
}

/// Publish a project
///
/// **POST /v1/projects/{slug}/publish**
pub async fn publish_project(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(slug): Path<String>,
) -> Result<Json<ProjectResponse>> {
    let mut project = load_by_slug(&state, &slug).await?;

    if !project.can_edit(Some(&ctx)) {
        return Err(Error::Authorization(
            "You do not have permission to edit this project".to_string(),
        ));
    }

    project.publish();
    let updated = state.repos.projects.update(&project).await?;

    Ok(Json(updated.into()))
}

/// Delete a project
///
/// **DELETE /v1/projects/{slug}**
pub async fn delete_project(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(slug): Path<String>,
) -> Result<StatusCode> {
    let project = load_by_slug(&state, &slug).await?;

    if !project.can_edit(Some(&ctx)) {
        return Err(Error::Authorization(
            "You do not have permission to delete this project".to_string(),
        ));
    }

    state.repos.projects.delete(project.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Browse public published projects
///
/// **GET /v1/projects**
///
/// Supports category, search, and sort filters with pagination.
pub async fn browse_projects(
    State(state): State<ProjectsState>,
    Query(query): Query<BrowseQuery>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<BrowseResponse>> {
    let filter = BrowseFilter {
        category_slug: query.category,
        search: query.search,
        sort: query.sort,
    };

    let limit = pagination.limit();
    let offset = pagination.offset();

    let projects = state.repos.projects.browse(&filter, limit, offset).await?;
    let total = state.repos.projects.count_browse(&filter).await?;
    let categories = state.repos.categories.list_all().await?;

    Ok(Json(BrowseResponse {
        projects: projects.into_iter().map(Into::into).collect(),
        total,
        offset,
        limit,
        categories,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_request_validation() {
        let valid = CreateProjectRequest {
            title: "Showreel 2025".to_string(),
            description: None,
            category_id: None,
            tags: Some("motion, 3d".to_string()),
            slug: Some("showreel-2025".to_string()),
            team_id: None,
        };
        assert!(valid.validate().is_ok());

        let empty_title = CreateProjectRequest {
            title: String::new(),
            description: None,
            category_id: None,
            tags: None,
            slug: None,
            team_id: None,
        };
        assert!(empty_title.validate().is_err());

        let bad_slug = CreateProjectRequest {
            title: "Showreel".to_string(),
            description: None,
            category_id: None,
            tags: None,
            slug: Some("Bad Slug".to_string()),
            team_id: None,
        };
        assert!(bad_slug.validate().is_err());

        let long_tags = CreateProjectRequest {
            title: "Showreel".to_string(),
            description: None,
            category_id: None,
            tags: Some("a".repeat(501)),
            slug: None,
            team_id: None,
        };
        assert!(long_tags.validate().is_err());
    }

    #[test]
    fn test_update_project_request_validation() {
        let valid = UpdateProjectRequest {
            title: Some("New Title".to_string()),
            description: None,
            tags: None,
            category_id: None,
            team_id: None,
            is_public: Some(true),
            is_featured: None,
            thumbnail_url: Some("https://example.com/thumb.png".to_string()),
        };
        assert!(valid.validate().is_ok());

        let bad_thumbnail = UpdateProjectRequest {
            title: None,
            description: None,
            tags: None,
            category_id: None,
            team_id: None,
            is_public: None,
            is_featured: None,
            thumbnail_url: Some("not a url".to_string()),
        };
        assert!(bad_thumbnail.validate().is_err());
    }

    #[test]
    fn test_project_response_splits_tags() {
        let project = Project::new(
            "Showreel".to_string(),
            None,
            Uuid::new_v4(),
            None,
            Some("motion, 3d".to_string()),
            None,
        )
        .unwrap();

        let response: ProjectResponse = project.into();
        assert_eq!(response.tags, vec!["motion", "3d"]);
    }
}
