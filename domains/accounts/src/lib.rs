//! Accounts domain: users, profiles, teams, memberships

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
// Re-export repository types
pub use repository::{
    create_membership_tx, create_profile_tx, create_team_tx, create_user_tx,
    AccountsRepositories, MembershipRepository, MembershipWithUser, ProfileRepository,
    ProjectCard, TeamProjectCard, TeamRepository, UserRepository,
};

// Re-export API types
pub use api::routes;
pub use api::AccountsState;
