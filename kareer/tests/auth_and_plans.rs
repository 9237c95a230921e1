mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use common::build_state;
use kareer::api::create_router;
use kareer::llm::LlmProvider;

async fn app_without_llm(dir: &TempDir) -> Router {
    create_router(build_state(dir.path(), LlmProvider::new(None)).await)
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn register_login_round_trip() {
    let dir = TempDir::new().unwrap();
    let app = app_without_llm(&dir).await;

    // First registration succeeds and returns a token.
    let (status, body) = request(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"contact": "a@b.com", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "registered");
    let user_id = body["user_id"].as_str().unwrap().to_string();
    assert!(!body["token"].as_str().unwrap().is_empty());

    // Re-registering the same contact conflicts.
    let (status, body) = request(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"contact": "a@b.com", "password": "other"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    // Correct password logs in as the same user.
    let (status, body) = request(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"contact": "a@b.com", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user_id.as_str());
    assert!(!body["token"].as_str().unwrap().is_empty());

    // Wrong password is an auth failure.
    let (status, _) = request(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"contact": "a@b.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Unknown contact is not found.
    let (status, _) = request(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"contact": "ghost@b.com", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn registration_requires_contact_and_password() {
    let dir = TempDir::new().unwrap();
    let app = app_without_llm(&dir).await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"contact": "a@b.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn phone_registration_round_trips() {
    let dir = TempDir::new().unwrap();
    let app = app_without_llm(&dir).await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"contact": "+15550100", "password": "x", "username": "phoney"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"contact": "+15550100", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn plans_round_trip_under_the_bearer_identity() {
    let dir = TempDir::new().unwrap();
    let app = app_without_llm(&dir).await;

    let (_, body) = request(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"contact": "planner@b.com", "password": "x"})),
    )
    .await;
    let token = body["token"].as_str().unwrap().to_string();

    let plan = json!({"goal": "staff engineer", "milestones": [{"title": "scope a project"}]});

    // Nothing saved yet for this account.
    let (status, _) = request(&app, "GET", "/api/load-plan", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = request(
        &app,
        "POST",
        "/api/save-plan",
        Some(&token),
        Some(json!({"plan": plan})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "saved");

    let (status, body) = request(&app, "GET", "/api/load-plan", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plan"], plan);

    // The anonymous identity sees nothing: plans are per user.
    let (status, _) = request(&app, "GET", "/api/load-plan", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn save_plan_requires_a_plan() {
    let dir = TempDir::new().unwrap();
    let app = app_without_llm(&dir).await;

    let (status, _) = request(&app, "POST", "/api/save-plan", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_is_public() {
    let dir = TempDir::new().unwrap();
    let app = app_without_llm(&dir).await;

    let (status, body) = request(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn chat_without_llm_still_reports_upload_first() {
    let dir = TempDir::new().unwrap();
    let app = app_without_llm(&dir).await;

    // The upload check fires before any LLM involvement.
    let (status, body) = request(
        &app,
        "POST",
        "/api/chat",
        None,
        Some(json!({"message": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please upload your resume first.");
}
