//! Integration tests for the event gateway endpoints

mod helpers;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use tagbot::editor::reply;
use tagbot::AppState;

/// Test helper: build the router over a temp workspace
async fn create_test_app(root: &std::path::Path) -> axum::Router {
    let (editor, pool) = helpers::test_editor(root).await;
    let state = AppState::new(pool, editor);
    tagbot::build_router(state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let tmp = tempfile::tempdir().unwrap();
    let app = create_test_app(tmp.path()).await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "tagbot");
}

#[tokio::test]
async fn text_event_while_idle_returns_guidance_reply() {
    let tmp = tempfile::tempdir().unwrap();
    let app = create_test_app(tmp.path()).await;

    let response = app
        .oneshot(post_json(
            "/event/text",
            json!({"user_id": 1, "text": "hello"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["text"], reply::DEFAULT_MESSAGE);
    assert!(body.get("keyboard").is_none());
}

#[tokio::test]
async fn command_event_runs_the_command() {
    let tmp = tempfile::tempdir().unwrap();
    let app = create_test_app(tmp.path()).await;

    let response = app
        .oneshot(post_json(
            "/event/command",
            json!({"user_id": 1, "command": "help"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["text"], reply::HELP_MESSAGE);
}

#[tokio::test]
async fn start_command_greets() {
    let tmp = tempfile::tempdir().unwrap();
    let app = create_test_app(tmp.path()).await;

    let response = app
        .oneshot(post_json(
            "/event/command",
            json!({"user_id": 1, "command": "start"}),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["text"], reply::GREETING);
}

#[tokio::test]
async fn malformed_payload_is_bad_request() {
    let tmp = tempfile::tempdir().unwrap();
    let app = create_test_app(tmp.path()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/event/text")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_command_is_bad_request() {
    let tmp = tempfile::tempdir().unwrap();
    let app = create_test_app(tmp.path()).await;

    let response = app
        .oneshot(post_json(
            "/event/command",
            json!({"user_id": 1, "command": "fly"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn button_event_maps_labels() {
    let tmp = tempfile::tempdir().unwrap();
    let app = create_test_app(tmp.path()).await;

    // No session: even a valid field label yields the idle guidance
    let response = app
        .oneshot(post_json(
            "/event/button",
            json!({"user_id": 1, "label": "Artist"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["text"], reply::DEFAULT_MESSAGE);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let app = create_test_app(tmp.path()).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/event/video")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn audio_event_drives_the_workflow_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let fixtures = tempfile::tempdir().unwrap();
    let app = create_test_app(tmp.path()).await;

    let fixture = fixtures.path().join("song.wav");
    helpers::write_wav(&fixture);

    let response = app
        .clone()
        .oneshot(post_json(
            "/event/audio",
            json!({
                "user_id": 9,
                "username": "bob",
                "file": {"url": fixture.display().to_string(), "file_name": "song.wav"}
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["keyboard"].is_array());
    assert!(body["text"].as_str().unwrap().contains(reply::ASK_WHICH_TAG));

    // Select a field through the gateway and commit
    let response = app
        .clone()
        .oneshot(post_json(
            "/event/button",
            json!({"user_id": 9, "label": "Artist"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json(
            "/event/text",
            json!({"user_id": 9, "text": "New Artist"}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["text"].as_str().unwrap().starts_with(reply::VALUE_SAVED));

    let response = app
        .oneshot(post_json(
            "/event/command",
            json!({"user_id": 9, "command": "done"}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["text"], reply::COMMIT_DONE);

    let delivered = std::path::PathBuf::from(body["document"].as_str().unwrap());
    let tags = tagbot::tags::TagCodec::new().read(&delivered).unwrap();
    assert_eq!(tags.artist.as_deref(), Some("New Artist"));
}
