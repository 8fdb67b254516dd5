//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default ceiling for a single uploaded file: 100 MB.
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 104_857_600;

/// File extensions accepted by the upload endpoint.
pub const ALLOWED_UPLOAD_EXTENSIONS: [&str; 10] = [
    "jpg", "jpeg", "png", "gif", "pdf", "mp4", "mp3", "webm", "doc", "docx",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Secret used to sign and verify access tokens
    pub jwt_secret: String,

    /// Root directory for uploaded media files
    pub media_root: PathBuf,

    /// Maximum accepted upload size in bytes
    pub max_upload_size: u64,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,

            media_root: env::var("MEDIA_ROOT")
                .unwrap_or_else(|_| "media".to_string())
                .into(),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE),

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "showcase=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions_cover_source_media_types() {
        // One representative per media family
        for ext in ["jpg", "mp4", "mp3", "pdf"] {
            assert!(ALLOWED_UPLOAD_EXTENSIONS.contains(&ext));
        }
        assert!(!ALLOWED_UPLOAD_EXTENSIONS.contains(&"exe"));
    }

    #[test]
    fn test_default_upload_ceiling_is_100_mb() {
        assert_eq!(DEFAULT_MAX_UPLOAD_SIZE, 100 * 1024 * 1024);
    }
}
