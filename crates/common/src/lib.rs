//! Shared utilities, configuration, and error handling for Showcase
//!
//! This crate provides common functionality used across the Showcase application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Axum extractors shared by the domain crates
//! - Password hashing utilities

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod extractors;
pub mod slug;

pub use config::Config;
pub use crypto::{hash_password, verify_password};
pub use db::{is_unique_violation, RepositoryError};
pub use error::{Error, Result};
pub use extractors::{Pagination, ValidatedJson};
pub use slug::{slugify, validate_slug};
