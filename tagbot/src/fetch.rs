//! Asset retrieval from the chat transport
//!
//! The transport hands the gateway opaque file references; this module
//! turns them into local bytes. `AssetSource` is the seam the edit
//! workflow depends on, so tests can substitute a local source.

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::EditError;

/// A remote file reference as delivered by the chat transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRef {
    /// Absolute URL, or a path relative to the configured transport base
    pub url: String,
    /// Original file name, when the transport knows it
    #[serde(default)]
    pub file_name: Option<String>,
    /// Declared size in bytes, when the transport knows it
    #[serde(default)]
    pub size: Option<u64>,
}

/// Source of remote file bytes
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Retrieve the referenced file and persist it at `dest`
    async fn fetch_to_path(&self, file: &FileRef, dest: &Path) -> Result<(), EditError>;

    /// Retrieve the referenced file fully into memory (cover images)
    async fn fetch_bytes(&self, file: &FileRef) -> Result<Vec<u8>, EditError>;
}

/// HTTP-backed asset source
///
/// The client timeout doubles as the stall policy for in-flight fetches:
/// a hung transfer resolves to `EditError::Fetch` instead of pinning the
/// session forever.
pub struct HttpAssetSource {
    client: reqwest::Client,
    api_base: Option<String>,
    token: Option<String>,
}

impl HttpAssetSource {
    pub fn new(
        api_base: Option<String>,
        token: Option<String>,
        timeout_secs: u64,
    ) -> tagbot_common::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                tagbot_common::Error::Internal(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_base,
            token,
        })
    }

    fn resolve_url(&self, file: &FileRef) -> String {
        if file.url.starts_with("http://") || file.url.starts_with("https://") {
            return file.url.clone();
        }
        match &self.api_base {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), file.url.trim_start_matches('/')),
            None => file.url.clone(),
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, EditError> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EditError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| EditError::Fetch(e.to_string()))?;

        Ok(response)
    }
}

#[async_trait]
impl AssetSource for HttpAssetSource {
    async fn fetch_to_path(&self, file: &FileRef, dest: &Path) -> Result<(), EditError> {
        let url = self.resolve_url(file);
        debug!(url = %url, dest = ?dest, "Fetching audio file");

        let response = self.get(&url).await?;

        let mut output = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| EditError::Fetch(e.to_string()))?;
            output.write_all(&chunk).await?;
        }
        output.flush().await?;

        Ok(())
    }

    async fn fetch_bytes(&self, file: &FileRef) -> Result<Vec<u8>, EditError> {
        let url = self.resolve_url(file);
        debug!(url = %url, "Fetching file into memory");

        let response = self.get(&url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| EditError::Fetch(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
