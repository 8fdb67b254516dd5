//! Concrete authentication backend
//!
//! Wraps `PgPool` + `AuthConfig` and owns auth-specific SQL queries.
//! Uses runtime `sqlx::query_as` (not macros) consistent with the
//! cross-domain read pattern used by the domain repositories.

use showcase_common::verify_password;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt;
use crate::types::{AuthIdentity, AuthMembership, AuthRole};

/// Row type for credential lookup (includes password_hash for verification)
#[derive(sqlx::FromRow)]
struct CredentialsRow {
    id: Uuid,
    password_hash: String,
}

/// Row type for membership lookup
#[derive(sqlx::FromRow)]
struct MembershipRow {
    team_id: Uuid,
    team_name: String,
    role: AuthRole,
}

/// Concrete authentication backend.
///
/// Wraps a database pool and auth configuration. Provides methods to
/// verify login credentials, issue tokens, and load the authenticated
/// context used by the extractors.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    pool: PgPool,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(pool: PgPool, config: AuthConfig) -> Self {
        Self { pool, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Find user identity by ID (CQRS read model, lightweight subset of User)
    pub(crate) async fn find_user(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError> {
        let user: Option<AuthIdentity> = sqlx::query_as(
            r#"
            SELECT id, username, email, display_name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to load user");
            AuthError::UserLoadError
        })?;

        Ok(user)
    }

    /// Find memberships for a user (CQRS read model, team id + name + role)
    pub(crate) async fn find_memberships(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AuthMembership>, AuthError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(
            r#"
            SELECT t.id as team_id, t.name as team_name, m.role
            FROM teams t
            INNER JOIN team_memberships m ON t.id = m.team_id
            WHERE m.user_id = $1
            ORDER BY t.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "Failed to load memberships");
            AuthError::MembershipsLoadError
        })?;

        Ok(rows
            .into_iter()
            .map(|r| AuthMembership {
                team_id: r.team_id,
                team_name: r.team_name,
                role: r.role,
            })
            .collect())
    }

    /// Load the full auth context for a known user ID
    pub async fn load_context(&self, user_id: Uuid) -> Result<AuthContext, AuthError> {
        let user = self
            .find_user(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let memberships = self.find_memberships(user_id).await?;
        Ok(AuthContext::new(user, memberships))
    }

    /// Authenticate a bearer token and load the caller's context
    pub async fn authenticate_token(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = jwt::validate_token(token, &self.config)?;
        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AuthError::InvalidUserId)?;
        self.load_context(user_id).await
    }

    /// Verify a username/password pair and load the caller's context.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn authenticate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthContext, AuthError> {
        let row: Option<CredentialsRow> =
            sqlx::query_as("SELECT id, password_hash FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Failed to load credentials");
                    AuthError::UserLoadError
                })?;

        let row = row.ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &row.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        self.load_context(row.id).await
    }

    /// Issue a signed access token for an authenticated identity
    pub fn issue_token(&self, user: &AuthIdentity) -> Result<String, AuthError> {
        jwt::issue_token(user.id, &user.username, &self.config)
    }
}
