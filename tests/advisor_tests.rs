// tests/advisor_tests.rs

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use quizwhiz::{
    models::difficulty::DifficultyAdjustment,
    services::advisor::{AdvisorError, DifficultyAdvisor, LlmAdvisor},
};
use serde_json::{Value, json};
use url::Url;

/// What the fake completion endpoint answers, and what it saw.
#[derive(Clone)]
struct FakeLlm {
    status: StatusCode,
    body: Value,
    delay: Duration,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

impl FakeLlm {
    fn replying(content: &str) -> Self {
        Self::raw(
            StatusCode::OK,
            json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] }),
        )
    }

    fn raw(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn completions(
    State(fake): State<FakeLlm>,
    headers: HeaderMap,
    Json(req): Json<Value>,
) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    fake.seen.lock().unwrap().push((auth, req));

    tokio::time::sleep(fake.delay).await;
    (fake.status, Json(fake.body.clone()))
}

/// Serves `fake` on a random port and returns the completions URL.
async fn spawn_llm(fake: FakeLlm) -> Url {
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://127.0.0.1:{}/v1/chat/completions", port)).unwrap()
}

fn advisor(endpoint: Url, timeout: Duration) -> LlmAdvisor {
    let client = reqwest::Client::builder().timeout(timeout).build().unwrap();
    LlmAdvisor::new(
        client,
        endpoint,
        Some("test-key".to_string()),
        "test-model".to_string(),
    )
}

#[tokio::test]
async fn sends_rendered_prompt_and_parses_label() {
    let fake = FakeLlm::replying("INCREASE");
    let seen = fake.seen.clone();
    let url = spawn_llm(fake).await;

    let label = advisor(url, Duration::from_secs(5))
        .suggest("user_mock_001", 90.0)
        .await
        .unwrap();

    assert_eq!(label, DifficultyAdjustment::Increase);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(body["model"], "test-model");
    let prompt = body["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("User ID: user_mock_001"));
    assert!(prompt.contains("Previous Score: 90"));
}

#[tokio::test]
async fn tolerates_case_and_punctuation() {
    let url = spawn_llm(FakeLlm::replying("  Maintain.\n")).await;

    let label = advisor(url, Duration::from_secs(5)).suggest("u", 60.0).await.unwrap();

    assert_eq!(label, DifficultyAdjustment::Maintain);
}

#[tokio::test]
async fn off_schema_output_is_rejected() {
    let url = spawn_llm(FakeLlm::replying("Make it a bit harder next time")).await;

    let err = advisor(url, Duration::from_secs(5)).suggest("u", 95.0).await.unwrap_err();

    assert_eq!(
        err,
        AdvisorError::OffSchema("Make it a bit harder next time".to_string())
    );
}

#[tokio::test]
async fn error_status_is_reported() {
    let url = spawn_llm(FakeLlm::raw(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "boom" }),
    ))
    .await;

    let err = advisor(url, Duration::from_secs(5)).suggest("u", 10.0).await.unwrap_err();

    assert!(matches!(err, AdvisorError::Status { status: 500, .. }));
}

#[tokio::test]
async fn response_without_content_is_malformed() {
    let url = spawn_llm(FakeLlm::raw(StatusCode::OK, json!({ "choices": [] }))).await;

    let err = advisor(url, Duration::from_secs(5)).suggest("u", 10.0).await.unwrap_err();

    assert!(matches!(err, AdvisorError::MalformedResponse(_)));
}

#[tokio::test]
async fn slow_service_times_out() {
    let mut fake = FakeLlm::replying("DECREASE");
    fake.delay = Duration::from_secs(3);
    let url = spawn_llm(fake).await;

    let err = advisor(url, Duration::from_millis(100))
        .suggest("u", 10.0)
        .await
        .unwrap_err();

    assert_eq!(err, AdvisorError::Timeout);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let url = Url::parse(&format!("http://127.0.0.1:{}/v1/chat/completions", port)).unwrap();

    let err = advisor(url, Duration::from_secs(5)).suggest("u", 10.0).await.unwrap_err();

    assert!(matches!(err, AdvisorError::Transport(_)));
}
