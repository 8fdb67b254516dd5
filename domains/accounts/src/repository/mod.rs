//! Repository implementations for the accounts domain

pub mod memberships;
pub mod profiles;
pub mod teams;
pub mod transactions;
pub mod users;

use sqlx::{PgPool, Postgres, Transaction};

pub use memberships::{MembershipRepository, MembershipWithUser};
pub use profiles::{ProfileRepository, ProjectCard};
pub use teams::{TeamProjectCard, TeamRepository};
pub use transactions::{create_membership_tx, create_profile_tx, create_team_tx, create_user_tx};
pub use users::UserRepository;

/// Combined repository access for the accounts domain
#[derive(Clone)]
pub struct AccountsRepositories {
    pool: PgPool,
    pub users: UserRepository,
    pub profiles: ProfileRepository,
    pub teams: TeamRepository,
    pub memberships: MembershipRepository,
}

impl AccountsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            profiles: ProfileRepository::new(pool.clone()),
            teams: TeamRepository::new(pool.clone()),
            memberships: MembershipRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
