//! Edit session state machine
//!
//! One handler per inbound chat event. Each handler locks the user's
//! session slot for its whole read-modify-write, so events for a user are
//! strictly sequential while different users proceed in parallel. Every
//! error is resolved to a user-facing reply at this boundary; nothing
//! propagates as a process fault.
//!
//! States, implicitly: no session (idle), session without an active field
//! (awaiting field selection), session with an active field (awaiting the
//! field's value). A new audio upload replaces any prior session
//! wholesale, discarding its in-memory state.

pub mod reply;

pub use reply::Reply;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::db;
use crate::error::EditError;
use crate::fetch::{AssetSource, FileRef};
use crate::image;
use crate::session::{EditSession, SessionStore};
use crate::tags::model::StagedCover;
use crate::tags::render::{field_keyboard, render_preview};
use crate::tags::{TagCodec, TagField};
use crate::workspace::{self, Workspace};

/// Slash commands understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Start,
    Help,
    About,
    New,
    Preview,
    Done,
}

/// The per-user edit workflow
pub struct Editor {
    db: SqlitePool,
    sessions: SessionStore,
    source: Arc<dyn AssetSource>,
    codec: TagCodec,
    workspace: Workspace,
    max_audio_bytes: u64,
}

impl Editor {
    pub fn new(
        db: SqlitePool,
        source: Arc<dyn AssetSource>,
        workspace: Workspace,
        max_audio_bytes: u64,
    ) -> Self {
        Self {
            db,
            sessions: SessionStore::new(),
            source,
            codec: TagCodec::new(),
            workspace,
            max_audio_bytes,
        }
    }

    /// Clone of the user's current session, if any (diagnostics and tests)
    pub async fn current_session(&self, user_id: i64) -> Option<EditSession> {
        let slot = self.sessions.slot(user_id).await;
        let session = slot.lock().await;
        session.clone()
    }

    // ------------------------------------------------------------------
    // Event handlers
    // ------------------------------------------------------------------

    /// An audio attachment arrived: start a fresh session around it.
    pub async fn handle_audio(
        &self,
        user_id: i64,
        username: Option<&str>,
        file: &FileRef,
    ) -> Reply {
        match self.receive_audio(user_id, username, file).await {
            Ok(reply) => reply,
            Err(err) => self.error_reply("audio", user_id, &err),
        }
    }

    /// A photo arrived: only meaningful while the cover art field is active.
    pub async fn handle_photo(&self, user_id: i64, file: &FileRef) -> Reply {
        match self.receive_cover(user_id, file).await {
            Ok(reply) => reply,
            Err(err) => self.error_reply("photo", user_id, &err),
        }
    }

    /// Free text: populates the active field, or nudges the user to pick one.
    pub async fn handle_text(&self, user_id: i64, text: &str) -> Reply {
        let slot = self.sessions.slot(user_id).await;
        let mut session = slot.lock().await;

        let Some(sess) = session.as_mut() else {
            return Reply::text(reply::DEFAULT_MESSAGE);
        };

        match sess.active_field {
            None => Reply::with_keyboard(reply::SELECT_FIELD_FIRST, field_keyboard()),
            Some(TagField::CoverArt) => Reply::text(TagField::CoverArt.prompt()),
            Some(field) => {
                sess.pending.set(field, text.to_string());
                debug!(user_id, field = field.label(), "Pending tag updated");

                let text_ok = text.trim().parse::<i64>().is_ok();
                if field.is_numeric_advisory() && !text_ok {
                    Reply::with_keyboard(
                        format!("{}\n{}", reply::VALUE_SAVED, reply::NUMERIC_ADVISORY),
                        field_keyboard(),
                    )
                } else {
                    Reply::with_keyboard(reply::VALUE_SAVED, field_keyboard())
                }
            }
        }
    }

    /// A field-selection button was pressed.
    pub async fn handle_button(&self, user_id: i64, label: &str) -> Reply {
        if let Some(field) = TagField::from_label(label) {
            return self.select_field(user_id, field).await;
        }

        match label {
            "Preview" => self.handle_command(user_id, Command::Preview).await,
            "Done" => self.handle_command(user_id, Command::Done).await,
            // The selector surface only offers valid labels; anything else
            // gets guidance rather than an error.
            _ => {
                let slot = self.sessions.slot(user_id).await;
                let session = slot.lock().await;
                if session.is_some() {
                    Reply::with_keyboard(reply::ASK_WHICH_TAG, field_keyboard())
                } else {
                    Reply::text(reply::DEFAULT_MESSAGE)
                }
            }
        }
    }

    /// A slash command arrived.
    pub async fn handle_command(&self, user_id: i64, command: Command) -> Reply {
        match command {
            Command::Start => {
                self.reset(user_id).await;
                Reply::text(reply::GREETING)
            }
            Command::New => {
                self.reset(user_id).await;
                Reply::text(reply::START_OVER)
            }
            Command::Help => Reply::text(reply::HELP_MESSAGE),
            Command::About => Reply::text(reply::ABOUT_MESSAGE),
            Command::Preview => self.preview(user_id).await,
            Command::Done => match self.commit(user_id).await {
                Ok(reply) => reply,
                Err(err) => self.error_reply("done", user_id, &err),
            },
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    async fn receive_audio(
        &self,
        user_id: i64,
        username: Option<&str>,
        file: &FileRef,
    ) -> Result<Reply, EditError> {
        if let Some(size) = file.size {
            if size > self.max_audio_bytes {
                return Err(EditError::TooLarge {
                    size,
                    limit: self.max_audio_bytes,
                });
            }
        }

        let slot = self.sessions.slot(user_id).await;
        let mut session = slot.lock().await;

        // Last write wins: the previous session's state is discarded,
        // its workspace files removed.
        if let Some(old) = session.take() {
            self.discard_files(&old).await;
        }

        let dir = self.workspace.user_dir(user_id).await?;
        let name = workspace::sanitize_file_name(file.file_name.as_deref().unwrap_or("audio"));
        let dest = dir.join(&name);

        self.source.fetch_to_path(file, &dest).await?;

        let pending = match self.codec.read(&dest) {
            Ok(tags) => tags,
            Err(err) => {
                workspace::remove_file(&dest).await;
                return Err(err);
            }
        };

        info!(user_id, file = %name, "Edit session started");
        let preview = render_preview(&pending);
        *session = Some(EditSession::new(dest, name, pending));
        drop(session);

        // Stats are best-effort; a counter hiccup must not lose the session.
        if let Err(err) = self.record_upload(user_id, username).await {
            warn!(user_id, error = %err, "Failed to record upload stats");
        }

        Ok(Reply::with_keyboard(
            format!(
                "Here's what your file currently carries:\n\n{}\n\n{}",
                preview,
                reply::ASK_WHICH_TAG
            ),
            field_keyboard(),
        ))
    }

    async fn record_upload(&self, user_id: i64, username: Option<&str>) -> tagbot_common::Result<()> {
        db::users::ensure_user(&self.db, user_id, username).await?;
        db::users::increment_files_received(&self.db, user_id).await?;
        Ok(())
    }

    async fn select_field(&self, user_id: i64, field: TagField) -> Reply {
        let slot = self.sessions.slot(user_id).await;
        let mut session = slot.lock().await;

        match session.as_mut() {
            None => Reply::text(reply::DEFAULT_MESSAGE),
            Some(sess) => {
                sess.active_field = Some(field);
                debug!(user_id, field = field.label(), "Field selected");
                Reply::text(field.prompt())
            }
        }
    }

    async fn receive_cover(&self, user_id: i64, file: &FileRef) -> Result<Reply, EditError> {
        let slot = self.sessions.slot(user_id).await;
        let mut session = slot.lock().await;

        let Some(sess) = session.as_mut() else {
            return Ok(Reply::text(reply::DEFAULT_MESSAGE));
        };

        if sess.active_field != Some(TagField::CoverArt) {
            // Nothing downloaded unless the user asked to change the cover
            return Ok(Reply::with_keyboard(reply::ASK_WHICH_TAG, field_keyboard()));
        }

        let bytes = self.source.fetch_bytes(file).await?;

        let Some(kind) = image::classify(&bytes) else {
            // Pending tags untouched; the user may retry with another image
            return Err(EditError::UnsupportedFormat);
        };

        let dir = self.workspace.user_dir(user_id).await?;
        let staged = dir.join(format!("cover.{}", kind.extension()));
        tokio::fs::write(&staged, &bytes).await?;

        if let Some(prev) = sess.pending.cover.take() {
            if prev.path != staged {
                workspace::remove_file(&prev.path).await;
            }
        }
        sess.pending.cover = Some(StagedCover { path: staged });

        debug!(user_id, kind = ?kind, "Cover image staged");
        Ok(Reply::with_keyboard(reply::COVER_STAGED, field_keyboard()))
    }

    async fn preview(&self, user_id: i64) -> Reply {
        let slot = self.sessions.slot(user_id).await;
        let session = slot.lock().await;

        match session.as_ref() {
            None => Reply::text(reply::DEFAULT_MESSAGE),
            Some(sess) => Reply::text(format!(
                "{}\n\n{}",
                render_preview(&sess.pending),
                reply::PREVIEW_HINT
            )),
        }
    }

    async fn commit(&self, user_id: i64) -> Result<Reply, EditError> {
        let slot = self.sessions.slot(user_id).await;
        let mut session = slot.lock().await;

        let Some(sess) = session.as_ref() else {
            // Commit on a cleared session is the idle guidance, not an error
            return Ok(Reply::text(reply::DEFAULT_MESSAGE));
        };
        let source_path = sess.source_path.clone();
        let file_name = sess.file_name.clone();
        let pending = sess.pending.clone();

        let exists = tokio::fs::try_exists(&source_path).await.unwrap_or(false);
        if !exists {
            if let Some(old) = session.take() {
                if let Some(cover) = old.pending.cover {
                    workspace::remove_file(&cover.path).await;
                }
            }
            return Err(EditError::MissingFile);
        }

        // Write textual fields, then splice the staged image into the
        // container. Any failure up to the rename leaves the session
        // intact so the user can retry the commit.
        self.codec.write(&source_path, &pending)?;

        if let Some(cover) = &pending.cover {
            let bytes = tokio::fs::read(&cover.path).await?;
            let kind = image::classify(&bytes).ok_or_else(|| {
                EditError::Write("staged cover is not a supported image".to_string())
            })?;
            self.codec.update_cover_image(&source_path, bytes, kind)?;
        }

        let outbox = self.workspace.outbox_dir(user_id).await?;
        let delivered = outbox.join(&file_name);
        tokio::fs::rename(&source_path, &delivered).await?;

        // Point of no return: the working copy is gone from the user
        // directory; clear the session and count the edit.
        if let Some(finished) = session.take() {
            if let Some(cover) = finished.pending.cover {
                workspace::remove_file(&cover.path).await;
            }
        }
        drop(session);

        if let Err(err) = db::users::increment_tag_edits(&self.db, user_id).await {
            warn!(user_id, error = %err, "Failed to record tag edit stats");
        }

        info!(user_id, file = ?delivered, "Tag edit committed");
        Ok(Reply::with_document(
            reply::COMMIT_DONE,
            delivered.to_string_lossy().into_owned(),
        ))
    }

    async fn reset(&self, user_id: i64) {
        let slot = self.sessions.slot(user_id).await;
        let mut session = slot.lock().await;

        if let Some(old) = session.take() {
            self.discard_files(&old).await;
            debug!(user_id, "Session reset");
        }
    }

    async fn discard_files(&self, sess: &EditSession) {
        workspace::remove_file(&sess.source_path).await;
        if let Some(cover) = &sess.pending.cover {
            workspace::remove_file(&cover.path).await;
        }
    }

    fn error_reply(&self, event: &str, user_id: i64, err: &EditError) -> Reply {
        match err {
            EditError::Io(_) | EditError::Database(_) => {
                error!(user_id, event, error = %err, "Event handling failed")
            }
            _ => warn!(user_id, event, error = %err, "Event rejected"),
        }

        let text = match err {
            EditError::Fetch(_) => reply::ERR_FETCH,
            EditError::Decode(_) => reply::ERR_DECODE,
            EditError::UnsupportedFormat => reply::ERR_UNSUPPORTED_IMAGE,
            EditError::MissingFile => reply::ERR_MISSING_FILE,
            EditError::Write(_) => reply::ERR_COMMIT,
            EditError::TooLarge { .. } => reply::ERR_TOO_LARGE,
            EditError::Io(_) | EditError::Database(_) => reply::ERR_INTERNAL,
        };

        Reply::text(text)
    }
}
