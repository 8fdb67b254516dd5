//! Upload validation and disk storage for media files
//!
//! Files land in a date-sharded layout under the configured media root;
//! the database stores the root-relative path.

use chrono::{Datelike, Utc};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use showcase_common::config::ALLOWED_UPLOAD_EXTENSIONS;
use showcase_common::{Error, Result};

/// Check an extension (lowercase, without the dot) against the allowlist
pub fn extension_allowed(extension: &str) -> bool {
    ALLOWED_UPLOAD_EXTENSIONS.contains(&extension)
}

/// Extract the lowercase extension from a filename
pub fn extract_extension(filename: &str) -> Option<String> {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    basename
        .rsplit_once('.')
        .map(|(stem, ext)| (stem, ext.to_ascii_lowercase()))
        .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
        .map(|(_, ext)| ext)
}

/// Best-effort MIME type for the allowlisted extensions
pub fn guess_mime(extension: &str) -> Option<&'static str> {
    match extension {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "pdf" => Some("application/pdf"),
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "mp3" => Some("audio/mpeg"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    }
}

/// Strip directories and neutralize unusual characters in a filename
fn sanitize_filename(filename: &str) -> String {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let sanitized: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(['.', '_']).is_empty() {
        "upload".to_string()
    } else {
        sanitized
    }
}

/// Disk-backed media storage rooted at a configured directory
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist uploaded bytes and return the root-relative path.
    ///
    /// Layout: `YYYY/MM/DD/{uuid}-{filename}`, so concurrent uploads of
    /// the same filename never collide.
    pub async fn store(&self, original_filename: &str, data: &[u8]) -> Result<String> {
        let now = Utc::now();
        let filename = sanitize_filename(original_filename);
        let relative = format!(
            "{:04}/{:02}/{:02}/{}-{}",
            now.year(),
            now.month(),
            now.day(),
            Uuid::new_v4(),
            filename
        );

        let dest = self.root.join(&relative);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Internal(format!("Failed to create media directory: {}", e)))?;
        }

        tokio::fs::write(&dest, data)
            .await
            .map_err(|e| Error::Internal(format!("Failed to write media file: {}", e)))?;

        Ok(relative)
    }

    /// Remove a stored file. Missing files are not an error; a row whose
    /// file is already gone should still be deletable.
    pub async fn remove(&self, relative_path: &str) -> Result<()> {
        if relative_path.contains("..") {
            return Err(Error::Validation("Invalid media path".to_string()));
        }

        let target = self.root.join(relative_path);
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Internal(format!(
                "Failed to remove media file: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_allowlist() {
        assert!(extension_allowed("jpg"));
        assert!(extension_allowed("webm"));
        assert!(extension_allowed("docx"));
        assert!(!extension_allowed("exe"));
        assert!(!extension_allowed("svg"));
        assert!(!extension_allowed(""));
    }

    #[test]
    fn test_extract_extension() {
        assert_eq!(extract_extension("reel.MP4"), Some("mp4".to_string()));
        assert_eq!(extract_extension("a/b/c.png"), Some("png".to_string()));
        assert_eq!(extract_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(extract_extension("noext"), None);
        assert_eq!(extract_extension(".hidden"), None);
        assert_eq!(extract_extension("trailingdot."), None);
    }

    #[test]
    fn test_guess_mime_covers_allowlist() {
        for ext in showcase_common::config::ALLOWED_UPLOAD_EXTENSIONS {
            assert!(guess_mime(ext).is_some(), "no MIME for {ext}");
        }
        assert_eq!(guess_mime("exe"), None);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("reel final.mp4"), "reel_final.mp4");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\cv.pdf"), "cv.pdf");
        assert_eq!(sanitize_filename("???"), "upload");
    }

    #[tokio::test]
    async fn test_store_writes_and_returns_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());

        let relative = storage.store("reel.mp4", b"fake bytes").await.unwrap();
        assert!(relative.ends_with("-reel.mp4"));
        assert!(!relative.starts_with('/'));

        let stored = tokio::fs::read(dir.path().join(&relative)).await.unwrap();
        assert_eq!(stored, b"fake bytes");
    }

    #[tokio::test]
    async fn test_store_same_name_twice_never_collides() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());

        let first = storage.store("reel.mp4", b"one").await.unwrap();
        let second = storage.store("reel.mp4", b"two").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());

        let relative = storage.store("reel.mp4", b"bytes").await.unwrap();
        storage.remove(&relative).await.unwrap();
        assert!(!dir.path().join(&relative).exists());

        // Second removal of a missing file succeeds
        storage.remove(&relative).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());

        assert!(storage.remove("../outside.txt").await.is_err());
    }
}
