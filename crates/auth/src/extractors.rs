//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::AuthBackend;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::extract_bearer_token;

/// Authenticated user extractor; rejects requests without a valid token
#[derive(Debug)]
pub struct AuthUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let token = extract_bearer_token(auth_header)?;
        let auth_context = backend.authenticate_token(&token).await?;

        Ok(AuthUser(auth_context))
    }
}

/// Optional-auth extractor for public endpoints.
///
/// Browse, portfolio, project detail, and team detail serve anonymous
/// viewers; when an Authorization header IS present it must be valid —
/// a bad token is rejected rather than silently treated as anonymous.
#[derive(Debug)]
pub struct MaybeAuthUser(pub Option<AuthContext>);

impl MaybeAuthUser {
    /// The authenticated context, if any
    pub fn context(&self) -> Option<&AuthContext> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let Some(auth_header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(MaybeAuthUser(None));
        };

        let backend = AuthBackend::from_ref(state);
        let token = extract_bearer_token(auth_header)?;
        let auth_context = backend.authenticate_token(&token).await?;

        Ok(MaybeAuthUser(Some(auth_context)))
    }
}
