//! Inbound chat event endpoints
//!
//! One POST route per event type, each returning the reply payload as
//! JSON. Malformed payloads are a 400; everything past deserialization
//! resolves to a 200 reply (errors become user-facing text).

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::editor::{Command, Reply};
use crate::error::{ApiError, ApiResult};
use crate::fetch::FileRef;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AudioEvent {
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    pub file: FileRef,
}

#[derive(Debug, Deserialize)]
pub struct PhotoEvent {
    pub user_id: i64,
    pub file: FileRef,
}

#[derive(Debug, Deserialize)]
pub struct TextEvent {
    pub user_id: i64,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CommandEvent {
    pub user_id: i64,
    pub command: Command,
}

#[derive(Debug, Deserialize)]
pub struct ButtonEvent {
    pub user_id: i64,
    pub label: String,
}

/// POST /event/audio
pub async fn audio_event(
    State(state): State<AppState>,
    payload: Result<Json<AudioEvent>, JsonRejection>,
) -> ApiResult<Json<Reply>> {
    let Json(event) = payload.map_err(bad_request)?;
    let reply = state
        .editor
        .handle_audio(event.user_id, event.username.as_deref(), &event.file)
        .await;
    Ok(Json(reply))
}

/// POST /event/photo
pub async fn photo_event(
    State(state): State<AppState>,
    payload: Result<Json<PhotoEvent>, JsonRejection>,
) -> ApiResult<Json<Reply>> {
    let Json(event) = payload.map_err(bad_request)?;
    let reply = state.editor.handle_photo(event.user_id, &event.file).await;
    Ok(Json(reply))
}

/// POST /event/text
pub async fn text_event(
    State(state): State<AppState>,
    payload: Result<Json<TextEvent>, JsonRejection>,
) -> ApiResult<Json<Reply>> {
    let Json(event) = payload.map_err(bad_request)?;
    let reply = state.editor.handle_text(event.user_id, &event.text).await;
    Ok(Json(reply))
}

/// POST /event/command
pub async fn command_event(
    State(state): State<AppState>,
    payload: Result<Json<CommandEvent>, JsonRejection>,
) -> ApiResult<Json<Reply>> {
    let Json(event) = payload.map_err(bad_request)?;
    let reply = state
        .editor
        .handle_command(event.user_id, event.command)
        .await;
    Ok(Json(reply))
}

/// POST /event/button
pub async fn button_event(
    State(state): State<AppState>,
    payload: Result<Json<ButtonEvent>, JsonRejection>,
) -> ApiResult<Json<Reply>> {
    let Json(event) = payload.map_err(bad_request)?;
    let reply = state.editor.handle_button(event.user_id, &event.label).await;
    Ok(Json(reply))
}

fn bad_request(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

/// Build event gateway routes
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/event/audio", post(audio_event))
        .route("/event/photo", post(photo_event))
        .route("/event/text", post(text_event))
        .route("/event/command", post(command_event))
        .route("/event/button", post(button_event))
}
