//! Media domain state and auth backend integration

use crate::domain::storage::MediaStorage;
use crate::MediaRepositories;
use axum::extract::FromRef;
use showcase_auth::AuthBackend;

/// Application state for the media domain
#[derive(Clone)]
pub struct MediaState {
    pub repos: MediaRepositories,
    pub auth: AuthBackend,
    pub storage: MediaStorage,
    /// Per-file upload ceiling in bytes
    pub max_upload_size: u64,
}

impl FromRef<MediaState> for AuthBackend {
    fn from_ref(state: &MediaState) -> Self {
        state.auth.clone()
    }
}
