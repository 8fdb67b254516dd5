//! Authorization context for authenticated users

use crate::types::{AuthIdentity, AuthMembership, AuthRole};
use uuid::Uuid;

/// Represents an authenticated user context
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
    pub memberships: Vec<AuthMembership>,
}

impl AuthContext {
    /// Create new auth context for a user
    pub fn new(user: AuthIdentity, memberships: Vec<AuthMembership>) -> Self {
        Self { user, memberships }
    }

    /// Get membership role for a specific team
    pub fn team_role(&self, team_id: Uuid) -> Option<AuthRole> {
        self.memberships
            .iter()
            .find(|m| m.team_id == team_id)
            .map(|m| m.role)
    }

    /// Check if user is a member of a team (any role)
    pub fn is_team_member(&self, team_id: Uuid) -> bool {
        self.team_role(team_id).is_some()
    }

    /// Check if user can edit projects belonging to a team
    pub fn can_edit_team_projects(&self, team_id: Uuid) -> bool {
        self.team_role(team_id).map_or(false, |r| r.can_edit())
    }

    /// Check if user can comment on projects belonging to a team
    pub fn can_comment_team_projects(&self, team_id: Uuid) -> bool {
        self.team_role(team_id).map_or(false, |r| r.can_comment())
    }
}
