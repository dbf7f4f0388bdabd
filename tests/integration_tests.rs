use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Days, Utc};
use tokio::sync::broadcast;
use tower::ServiceExt;

use huddle::config::AppConfig;
use huddle::db;
use huddle::handlers;
use huddle::services::ai::{LlmProvider, Message};
use huddle::services::analyzer::DelegatedAnalyzer;
use huddle::services::scheduler::MeetingScheduler;
use huddle::state::AppState;

// ── Mock Providers ──

struct MockLlm {
    reply: Option<String>,
}

#[async_trait]
impl LlmProvider for MockLlm {
    async fn chat(&self, _system_prompt: &str, messages: &[Message]) -> anyhow::Result<String> {
        assert!(messages[0].content.contains("Alice:"));
        self.reply
            .clone()
            .ok_or_else(|| anyhow::anyhow!("service unavailable"))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 5001,
        database_url: ":memory:".to_string(),
        admin_token: "test-token".to_string(),
        llm_provider: "none".to_string(),
        gemini_api_key: String::new(),
        gemini_model: "gemini-1.5-flash".to_string(),
        openai_api_key: String::new(),
        openai_model: "gpt-3.5-turbo".to_string(),
        openai_base_url: "https://api.openai.com/v1".to_string(),
        ollama_url: "http://localhost:11434".to_string(),
        ollama_model: "llama3.2".to_string(),
        analyzer_timeout: Duration::from_millis(200),
    }
}

fn test_state_with(scheduler: MeetingScheduler) -> Arc<AppState> {
    let conn = db::init_db(":memory:").unwrap();
    let (chat_tx, _) = broadcast::channel(16);
    Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: test_config(),
        scheduler,
        chat_tx,
    })
}

fn test_state() -> Arc<AppState> {
    test_state_with(MeetingScheduler::heuristic())
}

fn delegated_scheduler(reply: Option<&str>) -> MeetingScheduler {
    MeetingScheduler::with_delegate(Box::new(DelegatedAnalyzer::new(
        Box::new(MockLlm {
            reply: reply.map(|r| r.to_string()),
        }),
        Duration::from_millis(200),
    )))
}

fn tomorrow() -> String {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap()
        .format("%Y-%m-%d")
        .to_string()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn post_chat(app: &Router, name: &str, email: &str, message: &str) {
    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/api/chats",
            serde_json::json!({"user_name": name, "user_email": email, "message": message}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn seed_consensus_chat(app: &Router) {
    post_chat(app, "Alice", "alice@example.com", "is 9 am good?").await;
    post_chat(app, "Bob", "bob@example.com", "9 am works for me, let's meet").await;
}

// ── Tests ──

#[tokio::test]
async fn test_health() {
    let app = handlers::router(test_state());
    let (status, body) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_and_list_users() {
    let app = handlers::router(test_state());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            serde_json::json!({"name": "Alice", "email": "alice@example.com"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "alice@example.com");

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            serde_json::json!({"name": " ", "email": "x@example.com"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, users) = send(&app, empty_request("GET", "/api/users")).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_chat_messages_listed_in_order() {
    let app = handlers::router(test_state());
    seed_consensus_chat(&app).await;

    let (status, chats) = send(&app, empty_request("GET", "/api/chats")).await;
    assert_eq!(status, StatusCode::OK);
    let chats = chats.as_array().unwrap();
    assert_eq!(chats.len(), 2);
    assert_eq!(chats[0]["user_name"], "Alice");
    assert_eq!(chats[1]["message"], "9 am works for me, let's meet");
}

#[tokio::test]
async fn test_chat_message_broadcast() {
    let state = test_state();
    let mut rx = state.chat_tx.subscribe();
    let app = handlers::router(state);

    post_chat(&app, "Alice", "alice@example.com", "hello").await;

    let received = rx.recv().await.unwrap();
    assert_eq!(received.sender_contact, "alice@example.com");
    assert_eq!(received.body, "hello");
}

#[tokio::test]
async fn test_analyze_chat_heuristic() {
    let app = handlers::router(test_state());
    seed_consensus_chat(&app).await;

    let (status, analysis) = send(&app, empty_request("POST", "/api/analyze-chat")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analysis["has_meeting_intent"], true);
    assert_eq!(
        analysis["suggested_times"][0],
        format!("{} 09:00 AM", tomorrow())
    );
    assert_eq!(analysis["participants"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_analyze_empty_chat() {
    let app = handlers::router(test_state());

    let (status, analysis) = send(&app, empty_request("POST", "/api/analyze-chat")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analysis["has_meeting_intent"], false);
    assert_eq!(analysis["suggested_times"], serde_json::json!([]));
    assert_eq!(analysis["follow_up_questions"], serde_json::json!([]));
}

#[tokio::test]
async fn test_analyze_delegated() {
    let reply = format!(
        r#"```json
{{"has_meeting_intent": true, "suggested_times": ["{} 06:00 PM"]}}
```"#,
        tomorrow()
    );
    let app = handlers::router(test_state_with(delegated_scheduler(Some(&reply))));
    seed_consensus_chat(&app).await;

    let (_, analysis) = send(&app, empty_request("POST", "/api/analyze-chat")).await;
    assert_eq!(analysis["suggested_times"][0], format!("{} 06:00 PM", tomorrow()));
    assert_eq!(analysis["missing_info"], serde_json::json!([]));
    assert_eq!(analysis["participants"][1]["name"], "Bob");
}

#[tokio::test]
async fn test_analyze_delegated_failure_matches_heuristic() {
    let heuristic_app = handlers::router(test_state());
    seed_consensus_chat(&heuristic_app).await;
    let (_, expected) = send(&heuristic_app, empty_request("POST", "/api/analyze-chat")).await;

    for reply in [None, Some("definitely not json")] {
        let app = handlers::router(test_state_with(delegated_scheduler(reply)));
        seed_consensus_chat(&app).await;
        let (status, analysis) = send(&app, empty_request("POST", "/api/analyze-chat")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(analysis, expected);
    }
}

#[tokio::test]
async fn test_schedule_meeting_without_intent_rejected() {
    let app = handlers::router(test_state());
    post_chat(&app, "Alice", "alice@example.com", "nice weather today").await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/schedule-meeting", serde_json::json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No meeting intent detected");

    let (_, meetings) = send(&app, empty_request("GET", "/api/meetings")).await;
    assert!(meetings.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_schedule_and_confirm_meeting() {
    let app = handlers::router(test_state());
    seed_consensus_chat(&app).await;

    let (status, meeting) = send(
        &app,
        json_request("POST", "/api/schedule-meeting", serde_json::json!({"title": "Kickoff"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(meeting["title"], "Kickoff");
    assert_eq!(meeting["proposed_time"], format!("{} 09:00 AM", tomorrow()));
    assert_eq!(meeting["timezone"], "UTC");
    assert_eq!(meeting["duration_minutes"], 60);
    assert_eq!(meeting["participants"], serde_json::json!(["Alice", "Bob"]));
    assert_eq!(meeting["status"], "proposed");

    let id = meeting["id"].as_str().unwrap().to_string();
    let confirm = empty_request("POST", &format!("/api/confirm-meeting/{id}"));
    let (status, confirmed) = send(&app, confirm).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["id"], id.as_str());
    assert_eq!(confirmed["status"], "confirmed");
    assert_eq!(confirmed["title"], "Kickoff");

    let (_, meetings) = send(&app, empty_request("GET", "/api/meetings")).await;
    assert_eq!(meetings[0]["status"], "confirmed");

    let (status, _) = send(&app, empty_request("POST", "/api/confirm-meeting/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_schedule_meeting_default_title_and_fallback_times() {
    let app = handlers::router(test_state());
    post_chat(&app, "Alice", "alice@example.com", "we should schedule a call").await;

    let (status, meeting) = send(&app, empty_request("POST", "/api/schedule-meeting")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(meeting["title"], "Group Meeting");
    assert_eq!(meeting["proposed_time"], format!("{} 10:00 AM", tomorrow()));
}

#[tokio::test]
async fn test_clear_all_data_requires_auth() {
    let app = handlers::router(test_state());
    seed_consensus_chat(&app).await;

    let (status, _) = send(&app, empty_request("DELETE", "/api/clear-all-data")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .method("DELETE")
        .uri("/api/clear-all-data")
        .header("Authorization", "Bearer test-token")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let (_, chats) = send(&app, empty_request("GET", "/api/chats")).await;
    assert!(chats.as_array().unwrap().is_empty());
}
