//! Per-user edit session state

pub mod store;

pub use store::SessionStore;

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::tags::{TagField, Tags};

/// One in-progress edit, at most one per user identity.
///
/// Created when an audio upload is accepted (replacing any prior session
/// wholesale), mutated by field-selection and free-text events, destroyed
/// on commit or reset. Stats counters live in the database, not here, so
/// they survive the session.
#[derive(Debug, Clone)]
pub struct EditSession {
    /// Downloaded, not-yet-mutated audio file in the user workspace
    pub source_path: PathBuf,
    /// Name the finished file is delivered under
    pub file_name: String,
    /// Working copy of the tags, seeded from the file's existing values
    pub pending: Tags,
    /// Field the next free-text message will populate
    pub active_field: Option<TagField>,
    pub created_at: DateTime<Utc>,
}

impl EditSession {
    pub fn new(source_path: PathBuf, file_name: String, pending: Tags) -> Self {
        Self {
            source_path,
            file_name,
            pending,
            active_field: None,
            created_at: Utc::now(),
        }
    }
}
