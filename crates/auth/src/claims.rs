//! JWT claims types

use serde::{Deserialize, Serialize};

/// Claims carried by a Showcase access token
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Username at issuance time
    pub username: String,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
}
