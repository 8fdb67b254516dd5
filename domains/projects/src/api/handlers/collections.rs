//! Project collection handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use showcase_auth::{AuthUser, MaybeAuthUser};
use showcase_common::{Error, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::handlers::projects::ProjectResponse;
use crate::api::middleware::ProjectsState;
use crate::domain::entities::{validate_slug, ProjectCollection};

/// Request for creating a collection
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCollectionRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_slug_format", message = "Invalid slug format"))]
    pub slug: Option<String>,

    #[serde(default)]
    pub is_public: bool,
}

/// Custom validation function for slug format
fn validate_slug_format(slug: &str) -> std::result::Result<(), validator::ValidationError> {
    validate_slug(slug).map_err(|_| validator::ValidationError::new("invalid_format"))
}

/// Request for adding a project to a collection
#[derive(Debug, Deserialize)]
pub struct AddProjectRequest {
    pub project_id: Uuid,
}

/// Collection payload with its projects
#[derive(Debug, Serialize)]
pub struct CollectionDetailResponse {
    #[serde(flatten)]
    pub collection: ProjectCollection,
    pub projects: Vec<ProjectResponse>,
}

/// List the caller's collections
///
/// **GET /v1/collections**
pub async fn list_collections(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
) -> Result<Json<Vec<ProjectCollection>>> {
    let collections = state.repos.collections.list_for_owner(ctx.user.id).await?;
    Ok(Json(collections))
}

/// Create a collection
///
/// **POST /v1/collections**
pub async fn create_collection(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    ValidatedJson(request): ValidatedJson<CreateCollectionRequest>,
) -> Result<(StatusCode, Json<ProjectCollection>)> {
    let collection = ProjectCollection::new(
        request.name,
        request.slug,
        request.description,
        ctx.user.id,
        request.is_public,
    )?;

    if state
        .repos
        .collections
        .slug_exists_for_owner(ctx.user.id, &collection.slug)
        .await?
    {
        return Err(Error::Conflict(format!(
            "Collection slug '{}' already exists",
            collection.slug
        )));
    }

    let created = state.repos.collections.create(&collection).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// View a user's collection
///
/// **GET /v1/users/{username}/collections/{slug}**
///
/// Private collections are only served to their owner; non-owners see
/// only public published projects inside.
pub async fn get_collection(
    viewer: MaybeAuthUser,
    State(state): State<ProjectsState>,
    Path((username, slug)): Path<(String, String)>,
) -> Result<Json<CollectionDetailResponse>> {
    let owner_id = state
        .repos
        .collections
        .owner_id_by_username(&username)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    let collection = state
        .repos
        .collections
        .find_by_owner_and_slug(owner_id, &slug)
        .await?
        .ok_or_else(|| Error::NotFound("Collection not found".to_string()))?;

    let is_owner = viewer.context().map(|c| c.user.id) == Some(owner_id);

    if !collection.is_public && !is_owner {
        return Err(Error::NotFound("Collection not found".to_string()));
    }

    let projects = state
        .repos
        .collections
        .list_projects(collection.id, !is_owner)
        .await?;

    Ok(Json(CollectionDetailResponse {
        collection,
        projects: projects.into_iter().map(Into::into).collect(),
    }))
}

/// Add a project to a collection
///
/// **POST /v1/collections/{id}/projects**
///
/// Only the collection owner can add projects, and only projects they
/// can edit.
pub async fn add_project(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(collection_id): Path<Uuid>,
    Json(request): Json<AddProjectRequest>,
) -> Result<StatusCode> {
    let collection = state
        .repos
        .collections
        .find(collection_id)
        .await?
        .ok_or_else(|| Error::NotFound("Collection not found".to_string()))?;

    if collection.owner_id != ctx.user.id {
        return Err(Error::Authorization(
            "Only the collection owner can add projects".to_string(),
        ));
    }

    let project = state
        .repos
        .projects
        .find(request.project_id)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

    if !project.can_edit(Some(&ctx)) {
        return Err(Error::Authorization(
            "You can only collect projects you can edit".to_string(),
        ));
    }

    if state
        .repos
        .collections
        .contains_project(collection_id, project.id)
        .await?
    {
        return Err(Error::Conflict(
            "Project is already in this collection".to_string(),
        ));
    }

    state
        .repos
        .collections
        .add_project(collection_id, project.id)
        .await
        .map_err(|e| match e {
            Error::Database(ref db) if showcase_common::is_unique_violation(db) => {
                Error::Conflict("Project is already in this collection".to_string())
            }
            other => other,
        })?;

    Ok(StatusCode::CREATED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_collection_request_validation() {
        let valid = CreateCollectionRequest {
            name: "Client Work".to_string(),
            description: None,
            slug: Some("client-work".to_string()),
            is_public: true,
        };
        assert!(valid.validate().is_ok());

        let bad_slug = CreateCollectionRequest {
            name: "Client Work".to_string(),
            description: None,
            slug: Some("Client Work".to_string()),
            is_public: false,
        };
        assert!(bad_slug.validate().is_err());

        let empty_name = CreateCollectionRequest {
            name: String::new(),
            description: None,
            slug: None,
            is_public: false,
        };
        assert!(empty_name.validate().is_err());
    }
}
