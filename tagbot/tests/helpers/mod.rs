//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tagbot::editor::Editor;
use tagbot::error::EditError;
use tagbot::fetch::{AssetSource, FileRef};
use tagbot::workspace::Workspace;

/// Asset source that serves local files; `FileRef.url` is a filesystem path.
pub struct LocalAssetSource;

#[async_trait]
impl AssetSource for LocalAssetSource {
    async fn fetch_to_path(&self, file: &FileRef, dest: &Path) -> Result<(), EditError> {
        tokio::fs::copy(&file.url, dest)
            .await
            .map_err(|e| EditError::Fetch(e.to_string()))?;
        Ok(())
    }

    async fn fetch_bytes(&self, file: &FileRef) -> Result<Vec<u8>, EditError> {
        tokio::fs::read(&file.url)
            .await
            .map_err(|e| EditError::Fetch(e.to_string()))
    }
}

/// Editor over a temp workspace, an in-memory database and local assets
pub async fn test_editor(root: &Path) -> (Arc<Editor>, SqlitePool) {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    tagbot::db::init_tables(&pool)
        .await
        .expect("Failed to initialize database schema");

    let workspace = Workspace::new(root.to_path_buf());
    workspace.ensure_layout().expect("Failed to create workspace");

    let editor = Arc::new(Editor::new(
        pool.clone(),
        Arc::new(LocalAssetSource),
        workspace,
        48_000_000,
    ));

    (editor, pool)
}

/// Write a small mono WAV file usable as an audio fixture
pub fn write_wav(path: &Path) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV");
    for i in 0..800 {
        let sample = ((i as f32 * 0.05).sin() * 10_000.0) as i16;
        writer.write_sample(sample).expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize WAV");
}

/// FileRef pointing at a local fixture
pub fn file_ref(path: &Path, name: &str) -> FileRef {
    FileRef {
        url: path.display().to_string(),
        file_name: Some(name.to_string()),
        size: None,
    }
}

/// Minimal but well-formed PNG bytes (magic + IHDR prefix is enough for sniffing)
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(b"\x00\x00\x00\x0dIHDR\x00\x00\x00\x01\x00\x00\x00\x01\x08\x02\x00\x00\x00");
    bytes.extend_from_slice(&[0u8; 32]);
    bytes
}

/// Bytes that are not any image format
pub fn not_an_image() -> Vec<u8> {
    b"just some text, definitely not pixels".to_vec()
}
