//! Router tests

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Html,
    routing::get,
    Router,
};
use darkscan_core::{fixtures, DetectionService, DetectorConfig, ResourceConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;

const SALES_PAGE: &str = r#"<html><head>
<script>var hurry = "Hurry, only a few left in stock today!";</script>
<style>.banner { color: red; }</style>
</head><body>
<p>Hurry, only a few left in stock today!</p>
<p>Read our privacy policy and contact the support team.</p>
<button>OK</button>
</body></html>"#;

const SCRIPT_ONLY_PAGE: &str = "<html><body><script>var x = 'Buy now before it is gone forever';</script></body></html>";

fn test_config() -> Config {
    Config {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        fetch_timeout_secs: 5,
        user_agent: "darkscan-test".to_string(),
        cors_allow_origin: None,
        environment: "test".to_string(),
        detector: DetectorConfig {
            model_dir: PathBuf::from("."),
            model_path: None,
            vectorizer_path: None,
            resources: ResourceConfig {
                data_dir: std::env::temp_dir(),
                remote_url: None,
                lemmatize: false,
            },
        },
    }
}

fn state_with(detector: DetectionService) -> AppState {
    state_with_config(detector, test_config())
}

fn state_with_config(detector: DetectionService, config: Config) -> AppState {
    AppState {
        detector: Arc::new(detector),
        fetcher: PageFetcher::new(Duration::from_secs(config.fetch_timeout_secs), &config.user_agent)
            .expect("fetcher"),
        config: Arc::new(config),
    }
}

fn app() -> Router {
    create_router(state_with(fixtures::service()))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Serves fixed pages on an ephemeral local port.
async fn spawn_page_server() -> SocketAddr {
    let pages = Router::new()
        .route("/sale", get(|| async { Html(SALES_PAGE) }))
        .route("/empty", get(|| async { Html(SCRIPT_ONLY_PAGE) }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, pages).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_analyze_flags_scarcity_text() {
    let (status, body) = send(
        app(),
        post_json("/analyze", json!({ "text": "Only 2 left in stock! Buy now before it's gone!!" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], 1);
    let confidence = body["confidence"].as_f64().unwrap();
    assert!(confidence > 0.5 && confidence <= 1.0);
}

#[tokio::test]
async fn test_analyze_empty_text_rejected() {
    let state = state_with(fixtures::service());
    let detector = state.detector.clone();

    let (status, body) = send(create_router(state), post_json("/analyze", json!({ "text": "   " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Text cannot be empty");
    assert_eq!(body["status"], 400);
    // Never reached the classifier
    assert_eq!(detector.stats().batches, 0);
}

#[tokio::test]
async fn test_analyze_decision_only_confidence() {
    let app = create_router(state_with(fixtures::decision_only_service()));
    let (status, body) = send(app, post_json("/analyze", json!({ "text": "Hurry, limited time offer" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], 1);
    assert_eq!(body["confidence"], 1.0);
}

#[tokio::test]
async fn test_detect_from_text_single_summary() {
    let (status, body) = send(
        app(),
        post_json("/detect-from-text", json!({ "text": "  Only 2 left in stock! Buy now before it's gone!!  " })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_contents_scanned"], 1);
    assert_eq!(body["total_dark_patterns_detected"], 1);
    assert_eq!(body["dark_ratio"], 100.0);
    assert_eq!(body["risk_level"], "High");
    assert_eq!(
        body["detected_texts"][0]["text"],
        "Only 2 left in stock! Buy now before it's gone!!"
    );
}

#[tokio::test]
async fn test_detect_from_text_benign() {
    let (status, body) = send(
        app(),
        post_json("/detect-from-text", json!({ "text": "Read our privacy policy and contact support" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_dark_patterns_detected"], 0);
    assert_eq!(body["risk_level"], "Low");
    assert_eq!(body["detected_texts"], json!([]));
}

#[tokio::test]
async fn test_detect_from_url_empty() {
    let (status, body) = send(app(), post_json("/detect-from-url", json!({ "url": " \t " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "URL cannot be empty");
}

#[tokio::test]
async fn test_detect_from_url_invalid() {
    for url in ["ftp://example.com/file", "example.com", "http://localhost/", "http://exämple.com/"] {
        let (status, body) = send(app(), post_json("/detect-from-url", json!({ "url": url }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", url);
        assert_eq!(body["detail"], "Invalid URL. Use http:// or https://");
    }
}

#[tokio::test]
async fn test_detect_from_url_scans_page() {
    let addr = spawn_page_server().await;
    let url = format!("http://{}/sale", addr);

    let (status, body) = send(app(), post_json("/detect-from-url", json!({ "url": url }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_contents_scanned"], 2);
    assert_eq!(body["total_dark_patterns_detected"], 1);
    assert_eq!(body["dark_ratio"], 50.0);
    assert_eq!(body["risk_level"], "Medium");
    assert_eq!(body["detected_texts"][0]["text"], "Hurry, only a few left in stock today!");
}

#[tokio::test]
async fn test_detect_from_url_no_chunks() {
    let addr = spawn_page_server().await;
    let url = format!("http://{}/empty", addr);

    let (status, body) = send(app(), post_json("/detect-from-url", json!({ "url": url }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No usable visible text chunks found on page");
}

#[tokio::test]
async fn test_detect_from_url_fetch_failure() {
    let addr = spawn_page_server().await;
    let url = format!("http://{}/missing", addr);

    let (status, body) = send(app(), post_json("/detect-from-url", json!({ "url": url }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Failed to fetch URL content");
}

#[tokio::test]
async fn test_health_reports_model_and_stats() {
    let state = state_with(fixtures::service());
    state.detector.predict("Hurry, limited offer").unwrap();

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(create_router(state), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"]["classifier_kind"], "logistic_regression");
    assert_eq!(body["inference"]["batches"], 1);
    assert_eq!(body["inference"]["rows"], 1);
    assert!(body["model"].get("path").is_none());
}

#[test]
fn test_detector_error_status_mapping() {
    use axum::response::IntoResponse;
    use darkscan_core::DetectorError;

    let bad = AppError::from(DetectorError::InvalidInput("Text cannot be empty".into()));
    assert!(matches!(&bad, AppError::ValidationError(msg) if msg == "Text cannot be empty"));
    assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);

    let empty_page = AppError::from(DetectorError::NoContent("nothing here".into()));
    assert!(matches!(&empty_page, AppError::NoContent(msg) if msg == "nothing here"));

    let missing = AppError::from(DetectorError::ArtifactMissing {
        what: "model",
        path: PathBuf::from("model/model.json"),
    })
    .into_response();
    assert_eq!(missing.status(), StatusCode::SERVICE_UNAVAILABLE);

    let unexpected = AppError::from(DetectorError::Inference("score is NaN".into())).into_response();
    assert_eq!(unexpected.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

async fn allowed_origin(cors_allow_origin: Option<&str>) -> Option<String> {
    let config = Config {
        cors_allow_origin: cors_allow_origin.map(str::to_string),
        ..test_config()
    };
    let app = create_router(state_with_config(fixtures::service(), config));

    let request = Request::builder()
        .uri("/health")
        .header("origin", "https://app.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    response
        .headers()
        .get("access-control-allow-origin")
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    assert_eq!(allowed_origin(None).await.as_deref(), Some("*"));
}

#[tokio::test]
async fn test_cors_exact_origin() {
    let origin = allowed_origin(Some("https://app.example.com")).await;
    assert_eq!(origin.as_deref(), Some("https://app.example.com"));
}

#[tokio::test]
async fn test_cors_malformed_origin_falls_back_to_any() {
    assert_eq!(allowed_origin(Some("bad\norigin")).await.as_deref(), Some("*"));
}
