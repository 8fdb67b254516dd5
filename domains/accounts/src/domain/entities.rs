//! Domain entities for the Showcase accounts domain
//!
//! Users carry their credentials and identity; profiles hold the public
//! portfolio settings; teams and memberships model collaboration with a
//! fixed role set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use showcase_common::{hash_password, Error, Result};
use validator::ValidateEmail;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// User account role choices for profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "profile_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    #[default]
    Creator,
    Agency,
    Educator,
    Student,
    Other,
}

impl std::fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileRole::Creator => write!(f, "creator"),
            ProfileRole::Agency => write!(f, "agency"),
            ProfileRole::Educator => write!(f, "educator"),
            ProfileRole::Student => write!(f, "student"),
            ProfileRole::Other => write!(f, "other"),
        }
    }
}

/// Theme applied to a user's public portfolio page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "portfolio_theme", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PortfolioTheme {
    #[default]
    Light,
    Dark,
    Minimal,
}

/// User entity
#[derive(Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("display_name", &self.display_name)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl User {
    /// Create a new user with validation; hashes the password
    pub fn new(
        username: String,
        email: String,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Self> {
        Self::validate_username(&username)?;

        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(Error::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        if let Some(ref name) = display_name {
            if name.is_empty() || name.len() > 100 {
                return Err(Error::Validation(
                    "Display name must be 1-100 characters".to_string(),
                ));
            }
        }

        let now = Utc::now();
        Ok(User {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash: hash_password(password),
            display_name,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate username format: 3-30 chars, lowercase alphanumeric plus
    /// hyphens/underscores, no leading/trailing separator
    pub fn validate_username(username: &str) -> Result<()> {
        if username.len() < 3 || username.len() > 30 {
            return Err(Error::Validation(
                "Username must be 3-30 characters".to_string(),
            ));
        }

        if !username
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(Error::Validation(
                "Username must contain only lowercase letters, numbers, hyphens, and underscores"
                    .to_string(),
            ));
        }

        if username.starts_with(['-', '_']) || username.ends_with(['-', '_']) {
            return Err(Error::Validation(
                "Username cannot start or end with a separator".to_string(),
            ));
        }

        Ok(())
    }

    /// Name shown on public pages: display name when set, else username
    pub fn public_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    /// Validate invariants
    pub fn validate(&self) -> Result<()> {
        Self::validate_username(&self.username)?;

        if !self.email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        if self.password_hash.is_empty() {
            return Err(Error::Validation(
                "Password hash cannot be empty".to_string(),
            ));
        }

        if let Some(ref name) = self.display_name {
            if name.is_empty() || name.len() > 100 {
                return Err(Error::Validation(
                    "Display name must be 1-100 characters".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// User profile entity - portfolio settings and stats, one per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: ProfileRole,
    pub website: Option<String>,
    pub location: Option<String>,
    pub is_public_portfolio: bool,
    pub portfolio_theme: PortfolioTheme,
    pub total_projects: i32,
    pub total_views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create the default profile for a new user
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        UserProfile {
            id: Uuid::new_v4(),
            user_id,
            bio: None,
            avatar_url: None,
            role: ProfileRole::default(),
            website: None,
            location: None,
            is_public_portfolio: true,
            portfolio_theme: PortfolioTheme::default(),
            total_projects: 0,
            total_views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate invariants
    pub fn validate(&self) -> Result<()> {
        if let Some(ref bio) = self.bio {
            if bio.len() > 500 {
                return Err(Error::Validation("Bio must be at most 500 characters".to_string()));
            }
        }

        if let Some(ref location) = self.location {
            if location.len() > 100 {
                return Err(Error::Validation(
                    "Location must be at most 100 characters".to_string(),
                ));
            }
        }

        if self.total_projects < 0 {
            return Err(Error::Validation(
                "Project count cannot be negative".to_string(),
            ));
        }

        if self.total_views < 0 {
            return Err(Error::Validation(
                "View count cannot be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub logo_url: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with validation
    pub fn new(
        name: String,
        description: Option<String>,
        owner_id: Uuid,
        is_public: bool,
    ) -> Result<Self> {
        if name.is_empty() || name.len() > 200 {
            return Err(Error::Validation(
                "Team name must be 1-200 characters".to_string(),
            ));
        }

        if let Some(ref description) = description {
            if description.len() > 500 {
                return Err(Error::Validation(
                    "Team description must be at most 500 characters".to_string(),
                ));
            }
        }

        let now = Utc::now();
        Ok(Team {
            id: Uuid::new_v4(),
            name,
            description,
            owner_id,
            logo_url: None,
            is_public,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate invariants
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.name.len() > 200 {
            return Err(Error::Validation(
                "Team name must be 1-200 characters".to_string(),
            ));
        }

        if let Some(ref description) = self.description {
            if description.len() > 500 {
                return Err(Error::Validation(
                    "Team description must be at most 500 characters".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Membership roles within a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "membership_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    Owner,
    Editor,
    #[default]
    Viewer,
    Commenter,
}

impl std::fmt::Display for MembershipRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipRole::Owner => write!(f, "owner"),
            MembershipRole::Editor => write!(f, "editor"),
            MembershipRole::Viewer => write!(f, "viewer"),
            MembershipRole::Commenter => write!(f, "commenter"),
        }
    }
}

impl MembershipRole {
    /// Check if this role can edit team projects
    pub fn can_edit(&self) -> bool {
        matches!(self, MembershipRole::Owner | MembershipRole::Editor)
    }

    /// Check if this role can view team projects
    pub fn can_view(&self) -> bool {
        matches!(
            self,
            MembershipRole::Owner
                | MembershipRole::Editor
                | MembershipRole::Viewer
                | MembershipRole::Commenter
        )
    }

    /// Check if this role can comment on team projects
    pub fn can_comment(&self) -> bool {
        matches!(
            self,
            MembershipRole::Owner | MembershipRole::Editor | MembershipRole::Commenter
        )
    }

    /// Check if this role is owner
    pub fn is_owner(&self) -> bool {
        matches!(self, MembershipRole::Owner)
    }
}

/// Membership entity - association between User and Team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeamMembership {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: MembershipRole,
    pub joined_at: DateTime<Utc>,
}

impl TeamMembership {
    /// Create a new membership
    pub fn new(team_id: Uuid, user_id: Uuid, role: MembershipRole) -> Self {
        TeamMembership {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_common::verify_password;

    #[test]
    fn test_user_creation() {
        let user = User::new(
            "casey".to_string(),
            "casey@example.com".to_string(),
            "hunter2hunter2",
            Some("Casey".to_string()),
        )
        .unwrap();

        assert_eq!(user.username, "casey");
        assert_eq!(user.email, "casey@example.com");
        assert_eq!(user.display_name, Some("Casey".to_string()));
        assert!(verify_password("hunter2hunter2", &user.password_hash));
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_user_rejects_invalid_email() {
        let result = User::new(
            "casey".to_string(),
            "not-an-email".to_string(),
            "hunter2hunter2",
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_user_rejects_short_password() {
        let result = User::new(
            "casey".to_string(),
            "casey@example.com".to_string(),
            "short",
            None,
        );
        assert!(result.is_err());

        // Exactly the minimum is accepted
        let result = User::new(
            "casey".to_string(),
            "casey@example.com".to_string(),
            &"a".repeat(MIN_PASSWORD_LENGTH),
            None,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_username_validation() {
        // Valid usernames
        assert!(User::validate_username("casey").is_ok());
        assert!(User::validate_username("casey-42").is_ok());
        assert!(User::validate_username("a_b_c").is_ok());
        assert!(User::validate_username("abc").is_ok());

        // Invalid usernames
        assert!(User::validate_username("ab").is_err());
        assert!(User::validate_username(&"a".repeat(31)).is_err());
        assert!(User::validate_username("Casey").is_err());
        assert!(User::validate_username("casey!").is_err());
        assert!(User::validate_username("-casey").is_err());
        assert!(User::validate_username("casey_").is_err());
        assert!(User::validate_username("with space").is_err());
    }

    #[test]
    fn test_username_length_boundaries() {
        assert!(User::validate_username(&"a".repeat(3)).is_ok());
        assert!(User::validate_username(&"a".repeat(30)).is_ok());
        assert!(User::validate_username(&"a".repeat(2)).is_err());
        assert!(User::validate_username(&"a".repeat(31)).is_err());
    }

    #[test]
    fn test_user_display_name_boundaries() {
        let make = |name: Option<String>| {
            User::new(
                "casey".to_string(),
                "casey@example.com".to_string(),
                "hunter2hunter2",
                name,
            )
        };

        assert!(make(Some("a".repeat(100))).is_ok());
        assert!(make(Some("a".repeat(101))).is_err());
        assert!(make(Some(String::new())).is_err());
        assert!(make(None).is_ok());
    }

    #[test]
    fn test_user_public_name_falls_back_to_username() {
        let named = User::new(
            "casey".to_string(),
            "casey@example.com".to_string(),
            "hunter2hunter2",
            Some("Casey Q".to_string()),
        )
        .unwrap();
        assert_eq!(named.public_name(), "Casey Q");

        let anonymous = User::new(
            "casey".to_string(),
            "casey@example.com".to_string(),
            "hunter2hunter2",
            None,
        )
        .unwrap();
        assert_eq!(anonymous.public_name(), "casey");
    }

    #[test]
    fn test_user_debug_redacts_password_hash() {
        let user = User::new(
            "casey".to_string(),
            "casey@example.com".to_string(),
            "hunter2hunter2",
            None,
        )
        .unwrap();

        let debug = format!("{:?}", user);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(&user.password_hash));
    }

    #[test]
    fn test_profile_defaults() {
        let user_id = Uuid::new_v4();
        let profile = UserProfile::new(user_id);

        assert_eq!(profile.user_id, user_id);
        assert_eq!(profile.role, ProfileRole::Creator);
        assert_eq!(profile.portfolio_theme, PortfolioTheme::Light);
        assert!(profile.is_public_portfolio);
        assert_eq!(profile.total_projects, 0);
        assert_eq!(profile.total_views, 0);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_profile_bio_boundary() {
        let mut profile = UserProfile::new(Uuid::new_v4());

        profile.bio = Some("a".repeat(500));
        assert!(profile.validate().is_ok());

        profile.bio = Some("a".repeat(501));
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_profile_location_boundary() {
        let mut profile = UserProfile::new(Uuid::new_v4());

        profile.location = Some("a".repeat(100));
        assert!(profile.validate().is_ok());

        profile.location = Some("a".repeat(101));
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_profile_counters_cannot_go_negative() {
        let mut profile = UserProfile::new(Uuid::new_v4());

        profile.total_views = -1;
        assert!(profile.validate().is_err());

        profile.total_views = 0;
        profile.total_projects = -1;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_team_creation() {
        let owner_id = Uuid::new_v4();
        let team = Team::new(
            "Design Collective".to_string(),
            Some("A shared workspace".to_string()),
            owner_id,
            false,
        )
        .unwrap();

        assert_eq!(team.name, "Design Collective");
        assert_eq!(team.owner_id, owner_id);
        assert!(!team.is_public);
        assert!(team.validate().is_ok());
    }

    #[test]
    fn test_team_name_boundaries() {
        let owner = Uuid::new_v4();
        assert!(Team::new("a".repeat(200), None, owner, false).is_ok());
        assert!(Team::new("a".repeat(201), None, owner, false).is_err());
        assert!(Team::new(String::new(), None, owner, false).is_err());
    }

    #[test]
    fn test_team_description_boundary() {
        let owner = Uuid::new_v4();
        assert!(Team::new("Team".to_string(), Some("a".repeat(500)), owner, false).is_ok());
        assert!(Team::new("Team".to_string(), Some("a".repeat(501)), owner, false).is_err());
    }

    #[test]
    fn test_membership_roles() {
        assert!(MembershipRole::Owner.is_owner());
        assert!(!MembershipRole::Editor.is_owner());

        assert!(MembershipRole::Owner.can_edit());
        assert!(MembershipRole::Editor.can_edit());
        assert!(!MembershipRole::Viewer.can_edit());
        assert!(!MembershipRole::Commenter.can_edit());

        assert!(MembershipRole::Viewer.can_view());
        assert!(MembershipRole::Commenter.can_view());

        assert!(MembershipRole::Commenter.can_comment());
        assert!(!MembershipRole::Viewer.can_comment());
    }

    #[test]
    fn test_membership_default_role_is_viewer() {
        assert_eq!(MembershipRole::default(), MembershipRole::Viewer);
    }

    #[test]
    fn test_membership_creation() {
        let team_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let membership = TeamMembership::new(team_id, user_id, MembershipRole::Editor);

        assert_eq!(membership.team_id, team_id);
        assert_eq!(membership.user_id, user_id);
        assert_eq!(membership.role, MembershipRole::Editor);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&MembershipRole::Commenter).unwrap(),
            "\"commenter\""
        );
        assert_eq!(
            serde_json::to_string(&ProfileRole::Agency).unwrap(),
            "\"agency\""
        );
        assert_eq!(
            serde_json::to_string(&PortfolioTheme::Minimal).unwrap(),
            "\"minimal\""
        );
    }
}
