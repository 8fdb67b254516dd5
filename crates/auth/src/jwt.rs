//! Access token issuance, validation, and header extraction helpers

use axum::http::HeaderValue;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::claims::AccessClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Issue a signed access token for a user
pub(crate) fn issue_token(
    user_id: Uuid,
    username: &str,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = chrono::Utc::now().timestamp();
    let claims = AccessClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat: now as u64,
        exp: (now + config.token_ttl_seconds) as u64,
    };

    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());
    encode(&header, &claims, &encoding_key).map_err(|e| {
        tracing::error!(error = %e, "Failed to encode access token");
        AuthError::TokenIssueError
    })
}

/// Validate an access token and return its claims
pub(crate) fn validate_token(token: &str, config: &AuthConfig) -> Result<AccessClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<AccessClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "Token validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    if let Some(token) = header_str.strip_prefix("Bearer ") {
        Ok(token.to_string())
    } else {
        Err(AuthError::InvalidAuthorizationFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig::new("unit-test-secret")
    }

    #[test]
    fn test_issue_then_validate_roundtrip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id, "casey", &config).unwrap();
        let claims = validate_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "casey");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let config = test_config();
        assert!(validate_token("not-a-token", &config).is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let config = test_config();
        let token = issue_token(Uuid::new_v4(), "casey", &config).unwrap();

        let other = AuthConfig::new("a-different-secret");
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn test_validate_rejects_expired_token() {
        let mut config = test_config();
        config.token_ttl_seconds = -3600;

        let token = issue_token(Uuid::new_v4(), "casey", &config).unwrap();
        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        // Valid bearer token
        let header = HeaderValue::from_static("Bearer abc123");
        let result = extract_bearer_token(&header);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "abc123");

        // Missing scheme
        let header = HeaderValue::from_static("abc123");
        assert!(extract_bearer_token(&header).is_err());

        // Basic auth (wrong type)
        let header = HeaderValue::from_static("Basic abc123");
        assert!(extract_bearer_token(&header).is_err());
    }
}
