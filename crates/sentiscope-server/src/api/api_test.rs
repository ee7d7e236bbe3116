use std::net::SocketAddr;

use axum::body::{to_bytes, Body};
use axum::extract::ConnectInfo;
use axum::http::Request;
use sentiscope_sentiment::Scorer;
use tower::ServiceExt;

use super::*;

fn test_app_with(rate_limit: RateLimitState) -> Router {
    let state = AppState::new(
        SentimentAnalyzer::local(Scorer::default()),
        HistoryStore::new(100),
    );
    build_app(state, rate_limit)
}

fn test_app() -> Router {
    test_app_with(default_rate_limit_state())
}

fn analyze_request(text: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/sentiment/analyze")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "text": text }).to_string()))
        .expect("request")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn stats_request_from(addr: &str) -> Request<Body> {
    let addr: SocketAddr = addr.parse().expect("socket addr");
    Request::builder()
        .uri("/api/sentiment/stats")
        .extension(ConnectInfo(addr))
        .body(Body::empty())
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

async fn analyze(app: &Router, text: &str) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(analyze_request(text))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

// -------------------------------------------------------------------------
// Error helpers
// -------------------------------------------------------------------------

#[test]
fn normalize_limit_applies_defaults_and_bounds() {
    assert_eq!(normalize_limit(None), 50);
    assert_eq!(normalize_limit(Some(0)), 1);
    assert_eq!(normalize_limit(Some(1_000)), 200);
    assert_eq!(normalize_limit(Some(25)), 25);
}

#[tokio::test]
async fn api_error_renders_status_and_error_string() {
    let response = ApiError::bad_request("invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json, serde_json::json!({ "error": "invalid input" }));
}

// -------------------------------------------------------------------------
// Health
// -------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_ok_and_echoes_request_id() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("x-request-id", "req-abc")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-abc")
    );
    let json = json_body(response).await;
    assert_eq!(json["status"], "OK");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn generated_request_id_is_set_when_missing() {
    let response = test_app()
        .oneshot(get_request("/api/health"))
        .await
        .expect("response");
    let id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("request id header");
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

// -------------------------------------------------------------------------
// Analyze
// -------------------------------------------------------------------------

#[tokio::test]
async fn analyze_returns_bare_stored_record() {
    let app = test_app();
    let json = analyze(&app, "I absolutely love this product").await;

    let object = json.as_object().expect("record object");
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "confidence",
            "id",
            "score",
            "sentiment",
            "source",
            "text",
            "timestamp"
        ]
    );
    assert_eq!(json["id"], 1);
    assert_eq!(json["text"], "I absolutely love this product");
    assert_eq!(json["sentiment"], "positive");
    assert_eq!(json["source"], "local");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn analyze_blank_text_is_rejected() {
    let response = test_app()
        .oneshot(analyze_request("   "))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Text is required");
}

#[tokio::test]
async fn analyze_malformed_json_is_bad_request() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/sentiment/analyze")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn analyze_oversized_body_is_rejected() {
    let text = "a".repeat(MAX_BODY_BYTES + 1);
    let response = test_app()
        .oneshot(analyze_request(&text))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = json_body(response).await;
    assert!(json["error"].is_string());
}

// -------------------------------------------------------------------------
// History
// -------------------------------------------------------------------------

#[tokio::test]
async fn history_is_newest_first_and_filterable() {
    let app = test_app();
    analyze(&app, "This is terrible and awful").await;
    analyze(&app, "good").await;
    analyze(&app, "great service").await;

    let response = app
        .clone()
        .oneshot(get_request("/api/sentiment/history"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let ids: Vec<i64> = json
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let response = app
        .clone()
        .oneshot(get_request(
            "/api/sentiment/history?filter=positive&limit=1",
        ))
        .await
        .expect("response");
    let json = json_body(response).await;
    let records = json.as_array().expect("array body");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], 3);

    let response = app
        .oneshot(get_request("/api/sentiment/history?limit=50&filter=negative"))
        .await
        .expect("response");
    let json = json_body(response).await;
    let records = json.as_array().expect("array body");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["text"], "This is terrible and awful");
}

#[tokio::test]
async fn history_unknown_filter_is_bad_request() {
    let response = test_app()
        .oneshot(get_request("/api/sentiment/history?filter=angry"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["error"].as_str().expect("error").contains("angry"));
}

#[tokio::test]
async fn history_non_numeric_limit_is_json_bad_request() {
    let response = test_app()
        .oneshot(get_request("/api/sentiment/history?limit=lots"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn delete_unknown_entry_returns_404() {
    let response = test_app()
        .oneshot(delete_request("/api/sentiment/history/99"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json, serde_json::json!({ "error": "Analysis not found" }));
}

#[tokio::test]
async fn delete_non_numeric_id_returns_json_404() {
    let response = test_app()
        .oneshot(delete_request("/api/sentiment/history/abc"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json, serde_json::json!({ "error": "Analysis not found" }));
}

#[tokio::test]
async fn delete_removes_entry_from_history() {
    let app = test_app();
    analyze(&app, "good").await;

    let response = app
        .clone()
        .oneshot(delete_request("/api/sentiment/history/1"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(
        json,
        serde_json::json!({ "message": "Analysis deleted successfully" })
    );

    let response = app
        .oneshot(get_request("/api/sentiment/history"))
        .await
        .expect("response");
    let json = json_body(response).await;
    assert!(json.as_array().expect("array body").is_empty());
}

// -------------------------------------------------------------------------
// Stats
// -------------------------------------------------------------------------

#[tokio::test]
async fn stats_count_labels() {
    let app = test_app();
    analyze(&app, "good").await;
    analyze(&app, "amazing").await;
    analyze(&app, "terrible").await;
    analyze(&app, "meh").await;

    let response = app
        .oneshot(get_request("/api/sentiment/stats"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["total"], 4);
    assert_eq!(json["positive"], 2);
    assert_eq!(json["negative"], 1);
    assert_eq!(json["neutral"], 1);
    let average = json["averageConfidence"]
        .as_f64()
        .expect("averageConfidence");
    assert!((0.3..=0.95).contains(&average));
}

#[tokio::test]
async fn stats_on_empty_history_are_zero() {
    let response = test_app()
        .oneshot(get_request("/api/sentiment/stats"))
        .await
        .expect("response");
    let json = json_body(response).await;
    assert_eq!(json["total"], 0);
    assert_eq!(json["averageConfidence"], 0.0);
}

// -------------------------------------------------------------------------
// Rate limiting
// -------------------------------------------------------------------------

#[tokio::test]
async fn each_client_has_its_own_rate_limit_window() {
    let app = test_app_with(RateLimitState::new(2, Duration::from_secs(60)));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(stats_request_from("10.0.0.1:4000"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(stats_request_from("10.0.0.1:4001"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().get("retry-after").is_some());
    let json = json_body(response).await;
    assert!(json["error"].is_string());

    // A different client is unaffected.
    let response = app
        .clone()
        .oneshot(stats_request_from("10.0.0.2:4000"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    // Health is not rate limited.
    let response = app
        .oneshot(get_request("/api/health"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}
