//! Domain entities for the Showcase projects domain
//!
//! A project belongs to its creator and optionally to a team; visibility
//! and editability derive from those two relationships plus the
//! public/published flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use showcase_auth::AuthContext;
use showcase_common::{Error, Result};

pub use showcase_common::slug::{slugify, validate_slug, MAX_SLUG_LENGTH};

/// Maximum length of the comma-separated tags field
pub const MAX_TAGS_LENGTH: usize = 500;

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "project_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Draft => write!(f, "draft"),
            ProjectStatus::Published => write!(f, "published"),
            ProjectStatus::Archived => write!(f, "archived"),
        }
    }
}

/// Category for organizing projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectCategory {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl ProjectCategory {
    /// Create a new category with validation
    pub fn new(name: String, slug: Option<String>, description: Option<String>) -> Result<Self> {
        if name.is_empty() || name.len() > 100 {
            return Err(Error::Validation(
                "Category name must be 1-100 characters".to_string(),
            ));
        }

        let slug = match slug {
            Some(s) => {
                validate_slug(&s)?;
                s
            }
            None => slugify(&name)?,
        };

        Ok(ProjectCategory {
            id: Uuid::new_v4(),
            name,
            slug,
            description,
            icon: None,
        })
    }
}

/// Main project entity containing multimedia content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub creator_id: Uuid,
    pub team_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    /// Comma-separated tags
    pub tags: String,
    pub status: ProjectStatus,
    pub is_public: bool,
    pub is_featured: bool,
    pub view_count: i32,
    pub like_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Create a new draft project with validation.
    ///
    /// When no slug is supplied one is derived from the title.
    pub fn new(
        title: String,
        description: Option<String>,
        creator_id: Uuid,
        category_id: Option<Uuid>,
        tags: Option<String>,
        slug: Option<String>,
    ) -> Result<Self> {
        if title.is_empty() || title.len() > 255 {
            return Err(Error::Validation(
                "Project title must be 1-255 characters".to_string(),
            ));
        }

        let tags = tags.unwrap_or_default();
        if tags.len() > MAX_TAGS_LENGTH {
            return Err(Error::Validation(format!(
                "Tags must be at most {} characters",
                MAX_TAGS_LENGTH
            )));
        }

        let slug = match slug {
            Some(s) => {
                validate_slug(&s)?;
                s
            }
            None => slugify(&title)?,
        };

        let now = Utc::now();
        Ok(Project {
            id: Uuid::new_v4(),
            title,
            slug,
            description,
            thumbnail_url: None,
            creator_id,
            team_id: None,
            category_id,
            tags,
            status: ProjectStatus::Draft,
            is_public: false,
            is_featured: false,
            view_count: 0,
            like_count: 0,
            created_at: now,
            updated_at: now,
            published_at: None,
        })
    }

    /// Publish the project
    pub fn publish(&mut self) {
        self.status = ProjectStatus::Published;
        self.published_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Tags as a trimmed list
    pub fn tags_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    }

    /// Check if the given caller may edit this project: the creator, or a
    /// team member whose role carries edit rights
    pub fn can_edit(&self, ctx: Option<&AuthContext>) -> bool {
        let Some(ctx) = ctx else {
            return false;
        };

        if self.creator_id == ctx.user.id {
            return true;
        }

        match self.team_id {
            Some(team_id) => ctx.can_edit_team_projects(team_id),
            None => false,
        }
    }

    /// Check if the given caller may view this project: anyone for public
    /// projects, else the creator or any team member
    pub fn can_view(&self, ctx: Option<&AuthContext>) -> bool {
        if self.is_public {
            return true;
        }

        let Some(ctx) = ctx else {
            return false;
        };

        if self.creator_id == ctx.user.id {
            return true;
        }

        match self.team_id {
            Some(team_id) => ctx.is_team_member(team_id),
            None => false,
        }
    }

    /// Check if the given caller may comment: any authenticated viewer of
    /// a public project, the creator, or a team member whose role allows
    /// commenting
    pub fn can_comment(&self, ctx: Option<&AuthContext>) -> bool {
        let Some(ctx) = ctx else {
            return false;
        };

        if self.is_public || self.creator_id == ctx.user.id {
            return true;
        }

        match self.team_id {
            Some(team_id) => ctx.can_comment_team_projects(team_id),
            None => false,
        }
    }

    /// Validate invariants
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() || self.title.len() > 255 {
            return Err(Error::Validation(
                "Project title must be 1-255 characters".to_string(),
            ));
        }

        validate_slug(&self.slug)?;

        if self.tags.len() > MAX_TAGS_LENGTH {
            return Err(Error::Validation(format!(
                "Tags must be at most {} characters",
                MAX_TAGS_LENGTH
            )));
        }

        if self.view_count < 0 {
            return Err(Error::Validation(
                "View count cannot be negative".to_string(),
            ));
        }

        if self.like_count < 0 {
            return Err(Error::Validation(
                "Like count cannot be negative".to_string(),
            ));
        }

        // Published projects carry their publication timestamp
        if self.status == ProjectStatus::Published && self.published_at.is_none() {
            return Err(Error::Validation(
                "Published projects must have a publication timestamp".to_string(),
            ));
        }

        Ok(())
    }
}

/// Collection of related projects owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectCollection {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub is_public: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectCollection {
    /// Create a new collection with validation
    pub fn new(
        name: String,
        slug: Option<String>,
        description: Option<String>,
        owner_id: Uuid,
        is_public: bool,
    ) -> Result<Self> {
        if name.is_empty() || name.len() > 255 {
            return Err(Error::Validation(
                "Collection name must be 1-255 characters".to_string(),
            ));
        }

        let slug = match slug {
            Some(s) => {
                validate_slug(&s)?;
                s
            }
            None => slugify(&name)?,
        };

        let now = Utc::now();
        Ok(ProjectCollection {
            id: Uuid::new_v4(),
            name,
            slug,
            description,
            owner_id,
            is_public,
            display_order: 0,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Comment on a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectComment {
    pub id: Uuid,
    pub project_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectComment {
    /// Create a new comment; content is trimmed and must be non-empty
    pub fn new(project_id: Uuid, author_id: Uuid, content: &str) -> Result<Self> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::Validation("Comment cannot be empty".to_string()));
        }

        let now = Utc::now();
        Ok(ProjectComment {
            id: Uuid::new_v4(),
            project_id,
            author_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// A user's like on a project; unique per (project, user)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectLike {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ProjectLike {
    pub fn new(project_id: Uuid, user_id: Uuid) -> Self {
        ProjectLike {
            id: Uuid::new_v4(),
            project_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use showcase_auth::{AuthIdentity, AuthMembership, AuthRole};

    fn identity(id: Uuid) -> AuthIdentity {
        AuthIdentity {
            id,
            username: "casey".to_string(),
            email: "casey@example.com".to_string(),
            display_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn ctx_with_role(user_id: Uuid, team_id: Uuid, role: AuthRole) -> AuthContext {
        AuthContext::new(
            identity(user_id),
            vec![AuthMembership {
                team_id,
                team_name: "Design Team".to_string(),
                role,
            }],
        )
    }

    fn draft_project(creator_id: Uuid) -> Project {
        Project::new(
            "Showreel 2025".to_string(),
            Some("A year of work".to_string()),
            creator_id,
            None,
            Some("motion, 3d".to_string()),
            None,
        )
        .unwrap()
    }

    // ========================================================================
    // Project lifecycle
    // ========================================================================

    #[test]
    fn test_project_slug_derived_from_title() {
        let project = Project::new(
            "My  Awesome   Project!".to_string(),
            None,
            Uuid::new_v4(),
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(project.slug, "my-awesome-project");
    }

    #[test]
    fn test_project_creation_defaults() {
        let creator = Uuid::new_v4();
        let project = draft_project(creator);

        assert_eq!(project.slug, "showreel-2025");
        assert_eq!(project.status, ProjectStatus::Draft);
        assert!(!project.is_public);
        assert!(!project.is_featured);
        assert_eq!(project.view_count, 0);
        assert_eq!(project.like_count, 0);
        assert!(project.published_at.is_none());
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_project_title_boundaries() {
        let creator = Uuid::new_v4();
        assert!(Project::new("a".repeat(255), None, creator, None, None, None).is_ok());
        assert!(Project::new("a".repeat(256), None, creator, None, None, None).is_err());
        assert!(Project::new(String::new(), None, creator, None, None, None).is_err());
    }

    #[test]
    fn test_project_tags_boundary() {
        let creator = Uuid::new_v4();
        assert!(Project::new(
            "Title".to_string(),
            None,
            creator,
            None,
            Some("a".repeat(MAX_TAGS_LENGTH)),
            None
        )
        .is_ok());
        assert!(Project::new(
            "Title".to_string(),
            None,
            creator,
            None,
            Some("a".repeat(MAX_TAGS_LENGTH + 1)),
            None
        )
        .is_err());
    }

    #[test]
    fn test_project_explicit_slug_is_validated() {
        let creator = Uuid::new_v4();
        let ok = Project::new(
            "Title".to_string(),
            None,
            creator,
            None,
            None,
            Some("custom-slug".to_string()),
        );
        assert!(ok.is_ok());
        assert_eq!(ok.unwrap().slug, "custom-slug");

        let bad = Project::new(
            "Title".to_string(),
            None,
            creator,
            None,
            None,
            Some("Bad Slug!".to_string()),
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_publish_sets_status_and_timestamp() {
        let mut project = draft_project(Uuid::new_v4());
        project.publish();

        assert_eq!(project.status, ProjectStatus::Published);
        assert!(project.published_at.is_some());
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_published_without_timestamp_is_invalid() {
        let mut project = draft_project(Uuid::new_v4());
        project.status = ProjectStatus::Published;
        assert!(project.validate().is_err());

        project.published_at = Some(Utc::now());
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_negative_counters_are_invalid() {
        let mut project = draft_project(Uuid::new_v4());
        project.view_count = -1;
        assert!(project.validate().is_err());

        project.view_count = 0;
        project.like_count = -1;
        assert!(project.validate().is_err());
    }

    #[test]
    fn test_tags_list_splits_and_trims() {
        let mut project = draft_project(Uuid::new_v4());
        project.tags = " motion , 3d,, animation ,".to_string();

        assert_eq!(project.tags_list(), vec!["motion", "3d", "animation"]);
    }

    #[test]
    fn test_tags_list_empty_field() {
        let mut project = draft_project(Uuid::new_v4());
        project.tags = String::new();
        assert!(project.tags_list().is_empty());
    }

    // ========================================================================
    // Permission predicates
    // ========================================================================

    #[test]
    fn test_anonymous_cannot_edit() {
        let project = draft_project(Uuid::new_v4());
        assert!(!project.can_edit(None));
    }

    #[test]
    fn test_creator_can_edit_and_view() {
        let creator = Uuid::new_v4();
        let project = draft_project(creator);
        let ctx = AuthContext::new(identity(creator), vec![]);

        assert!(project.can_edit(Some(&ctx)));
        assert!(project.can_view(Some(&ctx)));
        assert!(project.can_comment(Some(&ctx)));
    }

    #[test]
    fn test_team_editor_can_edit_team_project() {
        let team_id = Uuid::new_v4();
        let member_id = Uuid::new_v4();
        let mut project = draft_project(Uuid::new_v4());
        project.team_id = Some(team_id);

        let editor = ctx_with_role(member_id, team_id, AuthRole::Editor);
        assert!(project.can_edit(Some(&editor)));

        let viewer = ctx_with_role(member_id, team_id, AuthRole::Viewer);
        assert!(!project.can_edit(Some(&viewer)));
        assert!(viewer.is_team_member(team_id));
        assert!(project.can_view(Some(&viewer)));
    }

    #[test]
    fn test_non_member_cannot_view_private_project() {
        let mut project = draft_project(Uuid::new_v4());
        project.team_id = Some(Uuid::new_v4());

        let outsider = AuthContext::new(identity(Uuid::new_v4()), vec![]);
        assert!(!project.can_view(Some(&outsider)));
        assert!(!project.can_view(None));
    }

    #[test]
    fn test_public_project_viewable_by_anyone() {
        let mut project = draft_project(Uuid::new_v4());
        project.is_public = true;

        assert!(project.can_view(None));
        let stranger = AuthContext::new(identity(Uuid::new_v4()), vec![]);
        assert!(project.can_view(Some(&stranger)));
        // Public still does not mean editable
        assert!(!project.can_edit(Some(&stranger)));
    }

    #[test]
    fn test_commenter_role_can_comment_but_not_edit() {
        let team_id = Uuid::new_v4();
        let member_id = Uuid::new_v4();
        let mut project = draft_project(Uuid::new_v4());
        project.team_id = Some(team_id);

        let commenter = ctx_with_role(member_id, team_id, AuthRole::Commenter);
        assert!(project.can_comment(Some(&commenter)));
        assert!(!project.can_edit(Some(&commenter)));

        let viewer = ctx_with_role(member_id, team_id, AuthRole::Viewer);
        assert!(!project.can_comment(Some(&viewer)));
    }

    #[test]
    fn test_anonymous_cannot_comment_even_on_public() {
        let mut project = draft_project(Uuid::new_v4());
        project.is_public = true;
        assert!(!project.can_comment(None));
    }

    // ========================================================================
    // Categories, collections, comments, likes
    // ========================================================================

    #[test]
    fn test_category_creation() {
        let category = ProjectCategory::new(
            "Motion Design".to_string(),
            None,
            Some("Animated work".to_string()),
        )
        .unwrap();

        assert_eq!(category.slug, "motion-design");
    }

    #[test]
    fn test_category_name_boundaries() {
        assert!(ProjectCategory::new("a".repeat(100), None, None).is_ok());
        assert!(ProjectCategory::new("a".repeat(101), None, None).is_err());
        assert!(ProjectCategory::new(String::new(), None, None).is_err());
    }

    #[test]
    fn test_collection_creation() {
        let owner = Uuid::new_v4();
        let collection = ProjectCollection::new(
            "Client Work".to_string(),
            None,
            None,
            owner,
            true,
        )
        .unwrap();

        assert_eq!(collection.slug, "client-work");
        assert_eq!(collection.owner_id, owner);
        assert_eq!(collection.display_order, 0);
    }

    #[test]
    fn test_collection_name_boundaries() {
        let owner = Uuid::new_v4();
        assert!(ProjectCollection::new("a".repeat(255), None, None, owner, false).is_ok());
        assert!(ProjectCollection::new("a".repeat(256), None, None, owner, false).is_err());
    }

    #[test]
    fn test_comment_content_trimmed() {
        let comment =
            ProjectComment::new(Uuid::new_v4(), Uuid::new_v4(), "  great work  ").unwrap();
        assert_eq!(comment.content, "great work");
    }

    #[test]
    fn test_empty_comment_rejected() {
        assert!(ProjectComment::new(Uuid::new_v4(), Uuid::new_v4(), "").is_err());
        assert!(ProjectComment::new(Uuid::new_v4(), Uuid::new_v4(), "   ").is_err());
    }

    #[test]
    fn test_like_creation() {
        let project_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let like = ProjectLike::new(project_id, user_id);

        assert_eq!(like.project_id, project_id);
        assert_eq!(like.user_id, user_id);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::Published).unwrap(),
            "\"published\""
        );
        let status: ProjectStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, ProjectStatus::Archived);
    }
}
