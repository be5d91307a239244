//! Per-user workspace layout
//!
//! `<root>/users/<id>/` holds the downloaded source audio file and,
//! transiently, a staged cover image. `<root>/outbox/<id>/` receives the
//! finished file on commit for the transport to deliver. Cleanup deletes
//! are best-effort; a file already gone is not an error.

use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::EditError;

/// Workspace root wrapper
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the top-level layout. Called once at startup; failure here
    /// is fatal to the process (unwritable workspace root).
    pub fn ensure_layout(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.root.join("users"))?;
        std::fs::create_dir_all(self.root.join("outbox"))?;
        Ok(())
    }

    /// Working directory for a user, created on first use
    pub async fn user_dir(&self, user_id: i64) -> Result<PathBuf, EditError> {
        let dir = self.root.join("users").join(user_id.to_string());
        tokio::fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    /// Outbox directory for a user, created on first use
    pub async fn outbox_dir(&self, user_id: i64) -> Result<PathBuf, EditError> {
        let dir = self.root.join("outbox").join(user_id.to_string());
        tokio::fs::create_dir_all(&dir).await?;
        Ok(dir)
    }
}

/// Delete a workspace file, swallowing "already gone".
pub async fn remove_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(file = ?path, error = %e, "Failed to remove workspace file"),
    }
}

/// Reduce an externally supplied file name to a safe single path segment.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        "audio".to_string()
    } else {
        trimmed.to_string()
    }
}
