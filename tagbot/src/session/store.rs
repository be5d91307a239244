//! Keyed session store with per-user serialization
//!
//! The store owns one slot per user identity. An event handler locks the
//! user's slot for its whole read-modify-write, so no two events for the
//! same user interleave, while events for different users run in
//! parallel. Replacing the slot's contents discards the previous session
//! without persisting it (last write wins).

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::session::EditSession;

/// Slot holding a user's session, lockable across await points
pub type SessionSlot = Arc<Mutex<Option<EditSession>>>;

/// Session store keyed by user identity
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<i64, SessionSlot>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the slot for a user. Callers lock the returned
    /// mutex for the duration of one event.
    pub async fn slot(&self, user_id: i64) -> SessionSlot {
        if let Some(slot) = self.inner.read().await.get(&user_id) {
            return slot.clone();
        }

        let mut map = self.inner.write().await;
        map.entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone()
    }
}
