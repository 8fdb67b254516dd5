//! Registration, login, and token introspection handlers

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showcase_auth::{AuthError, AuthRole, AuthUser};
use showcase_common::{Error, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::AccountsState;
use crate::domain::entities::{User, UserProfile};
use crate::repository::{create_profile_tx, create_user_tx};

/// Request for creating an account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 30),
        custom(function = "validate_username_format", message = "Invalid username format")
    )]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// Must match `password`
    pub password_confirm: String,

    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
}

/// Custom validation function for username format
fn validate_username_format(username: &str) -> std::result::Result<(), validator::ValidationError> {
    User::validate_username(username)
        .map_err(|_| validator::ValidationError::new("invalid_format"))
}

/// Request for logging in
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// User payload returned by account endpoints
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&showcase_auth::AuthIdentity> for UserResponse {
    fn from(user: &showcase_auth::AuthIdentity) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response for successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Membership entry in the whoami response
#[derive(Debug, Serialize)]
pub struct WhoamiMembership {
    pub team_id: Uuid,
    pub team_name: String,
    pub role: AuthRole,
}

/// Response for the whoami endpoint
#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub user: UserResponse,
    pub memberships: Vec<WhoamiMembership>,
}

/// Map backend auth failures onto the application error type.
///
/// Credential failures stay 401; everything else is an internal fault.
fn login_error(err: AuthError) -> Error {
    match err {
        AuthError::InvalidCredentials | AuthError::UserNotFound => {
            Error::Authentication("Invalid username or password".to_string())
        }
        other => Error::Internal(format!("Authentication backend failure: {:?}", other)),
    }
}

/// Register a new account
///
/// **POST /v1/auth/register**
///
/// Creates the user and their profile in one transaction. Duplicate
/// usernames and emails are rejected before insert; the unique indexes
/// backstop concurrent registrations.
pub async fn register(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    if request.password != request.password_confirm {
        return Err(Error::Validation("Passwords do not match".to_string()));
    }

    if state.repos.users.username_exists(&request.username).await? {
        return Err(Error::Conflict("Username already exists".to_string()));
    }

    if state.repos.users.email_exists(&request.email).await? {
        return Err(Error::Conflict("Email already exists".to_string()));
    }

    let user = User::new(
        request.username,
        request.email,
        &request.password,
        request.display_name,
    )?;
    let profile = UserProfile::new(user.id);

    let mut tx = state
        .repos
        .begin()
        .await
        .map_err(|e| Error::Internal(format!("Failed to begin transaction: {}", e)))?;

    let created = create_user_tx(&mut tx, &user).await.map_err(|e| {
        if showcase_common::is_unique_violation(&e) {
            Error::Conflict("Username or email already exists".to_string())
        } else {
            Error::Internal(format!("Failed to create user: {}", e))
        }
    })?;

    create_profile_tx(&mut tx, &profile)
        .await
        .map_err(|e| Error::Internal(format!("Failed to create profile: {}", e)))?;

    tx.commit()
        .await
        .map_err(|e| Error::Internal(format!("Failed to commit transaction: {}", e)))?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Log in with username and password
///
/// **POST /v1/auth/login**
///
/// Returns a bearer access token and the user payload.
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let ctx = state
        .auth
        .authenticate_credentials(&request.username, &request.password)
        .await
        .map_err(login_error)?;

    let access_token = state.auth.issue_token(&ctx.user).map_err(login_error)?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.auth.config().token_ttl_seconds,
        user: UserResponse::from(&ctx.user),
    }))
}

/// Introspect the current token
///
/// **GET /v1/auth/whoami**
pub async fn whoami(AuthUser(ctx): AuthUser) -> Json<WhoamiResponse> {
    let memberships = ctx
        .memberships
        .iter()
        .map(|m| WhoamiMembership {
            team_id: m.team_id,
            team_name: m.team_name.clone(),
            role: m.role,
        })
        .collect();

    Json(WhoamiResponse {
        user: UserResponse::from(&ctx.user),
        memberships,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register_request() -> RegisterRequest {
        RegisterRequest {
            username: "casey".to_string(),
            email: "casey@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            password_confirm: "hunter2hunter2".to_string(),
            display_name: Some("Casey".to_string()),
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(valid_register_request().validate().is_ok());

        let mut bad_username = valid_register_request();
        bad_username.username = "Casey!".to_string();
        assert!(bad_username.validate().is_err());

        let mut short_username = valid_register_request();
        short_username.username = "ab".to_string();
        assert!(short_username.validate().is_err());

        let mut bad_email = valid_register_request();
        bad_email.email = "nope".to_string();
        assert!(bad_email.validate().is_err());

        let mut short_password = valid_register_request();
        short_password.password = "short".to_string();
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            username: "casey".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty = LoginRequest {
            username: String::new(),
            password: "x".to_string(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_login_error_mapping() {
        use axum::http::StatusCode;

        assert_eq!(
            login_error(AuthError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            login_error(AuthError::UserLoadError).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_user_response_hides_password_hash() {
        let user = User::new(
            "casey".to_string(),
            "casey@example.com".to_string(),
            "hunter2hunter2",
            None,
        )
        .unwrap();
        let hash = user.password_hash.clone();

        let response: UserResponse = user.into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains(&hash));
        assert!(json.contains("casey"));
    }
}
