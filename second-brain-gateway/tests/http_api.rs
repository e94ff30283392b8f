//! Router-level tests driven through `tower::ServiceExt::oneshot`.

mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use common::{ScriptedProvider, test_db};
use second_brain_db::NoteStore;
use second_brain_gateway::server::create_router;
use second_brain_gateway::{AppState, ClassifyMode, Ingestor, MetadataClassifier, QueryAnswerer};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app(provider: Option<ScriptedProvider>, public_key: Option<&str>) -> Router {
    let provider = provider.and_then(|p| p.shared());
    let store: Arc<dyn NoteStore> = Arc::new(test_db().await);
    let state = AppState::new(
        store,
        Ingestor::new(MetadataClassifier::new(provider.clone()), ClassifyMode::Full),
        QueryAnswerer::new(provider),
        public_key.map(str::to_string),
    );
    create_router(Arc::new(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app(None, None).await;
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_note_reports_classification() {
    let provider =
        ScriptedProvider::new(&[r#"{"summary":"Recipe link","tags":["cooking"],"type":"LINK"}"#]);
    let app = app(Some(provider), None).await;

    let (status, body) = send(
        &app,
        "POST",
        "/notes",
        Some(json!({"title": "Recipes", "content": "Check out https://example.com for recipes"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["classification"], "generated");
    assert_eq!(body["note"]["type"], "LINK");
    assert_eq!(body["note"]["tags"], json!(["cooking"]));
    assert!(body["note"]["id"].as_str().unwrap().starts_with("note_"));
}

#[tokio::test]
async fn test_create_without_model_falls_back() {
    let app = app(None, None).await;
    let (status, body) = send(&app, "POST", "/notes", Some(json!({"content": "raw idea"}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["classification"], "fallback");
    assert_eq!(body["note"]["summary"], "AI processing skipped.");
    assert_eq!(body["note"]["tags"], json!(["Manual"]));
    assert_eq!(body["note"]["type"], "NOTE");
}

#[tokio::test]
async fn test_create_rejects_blank_content() {
    let app = app(None, None).await;
    let (status, body) = send(&app, "POST", "/notes", Some(json!({"content": "   "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "content is required");
}

#[tokio::test]
async fn test_note_crud() {
    let app = app(None, None).await;
    let (_, created) = send(
        &app,
        "POST",
        "/notes",
        Some(json!({"title": "Standup", "content": "Discussed roadmap"})),
    )
    .await;
    let id = created["note"]["id"].as_str().unwrap().to_string();
    let uri = format!("/notes/{id}");

    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Standup");

    let (status, updated) = send(&app, "PATCH", &uri, Some(json!({"content": "X"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["content"], "X");
    assert_eq!(updated["title"], "Standup");

    let (status, _) = send(&app, "PATCH", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, listed) = send(&app, "GET", "/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&id));

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chat_answers_and_soft_fails() {
    let app = app(Some(ScriptedProvider::new(&["Nothing about rockets yet."])), None).await;
    let (status, body) = send(
        &app,
        "POST",
        "/chat",
        Some(json!({"message": "What do I know about rockets?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Nothing about rockets yet.");

    let app = app_without_model().await;
    let (status, body) = send(&app, "POST", "/chat", Some(json!({"message": "hi"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["reply"].as_str().unwrap().starts_with("Error: "));

    let (status, body) = send(&app, "POST", "/chat", Some(json!({}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["reply"], "Error: message is required");
}

async fn app_without_model() -> Router {
    app(None, None).await
}

#[tokio::test]
async fn test_public_listing_requires_key() {
    let app = app(None, Some("s3cret")).await;
    send(
        &app,
        "POST",
        "/notes",
        Some(json!({"title": "Public", "content": "shared thought"})),
    )
    .await;

    let (status, body) = send(&app, "GET", "/public/notes?key=wrong", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(&app, "GET", "/public/notes", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "GET", "/public/notes?key=s3cret", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    let entry = &body["data"][0];
    assert_eq!(entry["title"], "Public");
    assert_eq!(entry["type"], "NOTE");
    assert!(entry.get("content").is_none());
    assert!(body["generated_at"].is_string());
}
