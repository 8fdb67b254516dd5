//! Auth CQRS read-model types
//!
//! Lightweight views of the same DB rows owned by the accounts domain.
//! These types carry only the fields needed for authentication and authorization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lightweight identity for authenticated users.
///
/// Contains the fields needed by auth middleware and most handlers.
/// Handlers needing full profile data (bio, portfolio settings) should
/// load from the accounts repository.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Team membership info for authorization checks
#[derive(Debug, Clone)]
pub struct AuthMembership {
    pub team_id: Uuid,
    pub team_name: String,
    pub role: AuthRole,
}

/// Membership role for auth decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "membership_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuthRole {
    Owner,
    Editor,
    Viewer,
    Commenter,
}

impl AuthRole {
    /// Check if this role can edit team projects
    pub fn can_edit(&self) -> bool {
        matches!(self, AuthRole::Owner | AuthRole::Editor)
    }

    /// Check if this role can view team projects
    pub fn can_view(&self) -> bool {
        matches!(
            self,
            AuthRole::Owner | AuthRole::Editor | AuthRole::Viewer | AuthRole::Commenter
        )
    }

    /// Check if this role can comment on team projects
    pub fn can_comment(&self) -> bool {
        matches!(self, AuthRole::Owner | AuthRole::Editor | AuthRole::Commenter)
    }

    /// Check if this role is owner
    pub fn is_owner(&self) -> bool {
        matches!(self, AuthRole::Owner)
    }
}

impl std::fmt::Display for AuthRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthRole::Owner => write!(f, "owner"),
            AuthRole::Editor => write!(f, "editor"),
            AuthRole::Viewer => write!(f, "viewer"),
            AuthRole::Commenter => write!(f, "commenter"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_edit_permissions() {
        assert!(AuthRole::Owner.can_edit());
        assert!(AuthRole::Editor.can_edit());
        assert!(!AuthRole::Viewer.can_edit());
        assert!(!AuthRole::Commenter.can_edit());
    }

    #[test]
    fn test_role_view_permissions() {
        assert!(AuthRole::Owner.can_view());
        assert!(AuthRole::Editor.can_view());
        assert!(AuthRole::Viewer.can_view());
        assert!(AuthRole::Commenter.can_view());
    }

    #[test]
    fn test_role_comment_permissions() {
        assert!(AuthRole::Owner.can_comment());
        assert!(AuthRole::Editor.can_comment());
        assert!(AuthRole::Commenter.can_comment());
        assert!(!AuthRole::Viewer.can_comment());
    }

    #[test]
    fn test_only_owner_is_owner() {
        assert!(AuthRole::Owner.is_owner());
        assert!(!AuthRole::Editor.is_owner());
        assert!(!AuthRole::Viewer.is_owner());
        assert!(!AuthRole::Commenter.is_owner());
    }

    #[test]
    fn test_role_serde_wire_format() {
        assert_eq!(
            serde_json::to_string(&AuthRole::Commenter).unwrap(),
            "\"commenter\""
        );
        let role: AuthRole = serde_json::from_str("\"editor\"").unwrap();
        assert_eq!(role, AuthRole::Editor);
    }
}
