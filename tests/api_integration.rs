//! Integration tests for the Polydivisible Service API.
//!
//! These tests spin up a real server instance and make HTTP requests to verify
//! the complete request/response cycle.

use std::net::SocketAddr;
use std::sync::Arc;

use regex::Regex;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tokio::net::TcpListener;

use polydivisible_service::api::{AppState, create_router};
use polydivisible_service::config::{
    AppConfig, EnumerationConfig, ObservabilityConfig, ServerConfig,
};
use polydivisible_service::service::to_digits;

// ============================================================================
// Test Harness
// ============================================================================

/// Test server instance.
struct TestServer {
    addr: SocketAddr,
    client: Client,
}

impl TestServer {
    async fn new() -> Self {
        Self::with_limits(EnumerationConfig::default()).await
    }

    async fn with_limits(enumeration: EnumerationConfig) -> Self {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".parse().unwrap(),
                port: 0,
                cors_permissive: true,
            },
            enumeration,
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
                log_format: "text".to_string(),
                metrics_enabled: false,
            },
        };

        let state = AppState::new(Arc::new(config));
        let app = create_router(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            addr,
            client: Client::new(),
        }
    }

    fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Request failed")
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    code: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckData {
    is_polydivisible: bool,
    digits: String,
    base: u32,
    parsed_digits: Vec<u32>,
    decimal_value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateData {
    polydivisible_numbers: Vec<String>,
    base: u32,
    max_length: usize,
    count: usize,
    truncated: bool,
}

async fn expect_error(response: Response, message: &str) -> ErrorBody {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, message);
    body
}

// ============================================================================
// Health Endpoint Tests
// ============================================================================

#[derive(Debug, Deserialize)]
struct HealthData {
    status: String,
    timestamp: String,
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::new().await;
    let iso = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$").unwrap();

    for path in ["/api/health", "/health"] {
        let response = server.get(path).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: HealthData = response.json().await.unwrap();
        assert_eq!(body.status, "OK");
        assert!(iso.is_match(&body.timestamp), "{}", body.timestamp);
    }
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let server = TestServer::new().await;
    let response = server.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = response.text().await.unwrap();
    assert!(text.contains("polydivisible_up 1"));
}

#[tokio::test]
async fn test_unknown_route() {
    let server = TestServer::new().await;
    let response = server.get("/api/polydivisible/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Check Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_check_polydivisible() {
    let server = TestServer::new().await;
    let response = server
        .get("/api/polydivisible/check?digits=1232&base=10")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: CheckData = response.json().await.unwrap();
    assert!(body.is_polydivisible);
    assert_eq!(body.digits, "1232");
    assert_eq!(body.base, 10);
    assert_eq!(body.parsed_digits, vec![1, 2, 3, 2]);
    assert_eq!(body.decimal_value.as_deref(), Some("1232"));
}

#[tokio::test]
async fn test_check_not_polydivisible() {
    let server = TestServer::new().await;
    let response = server
        .get("/api/polydivisible/check?digits=1233&base=10")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: CheckData = response.json().await.unwrap();
    assert!(!body.is_polydivisible);
}

#[tokio::test]
async fn test_check_preserves_original_text() {
    let server = TestServer::new().await;
    let response = server
        .get("/api/polydivisible/check?digits=1A2B&base=16")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: CheckData = response.json().await.unwrap();
    assert_eq!(body.digits, "1A2B");
    assert_eq!(body.parsed_digits, vec![1, 10, 2, 11]);
}

#[tokio::test]
async fn test_check_comma_separated_base() {
    let server = TestServer::new().await;
    let response = server
        .get("/api/polydivisible/check?digits=5,12&base=100")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: CheckData = response.json().await.unwrap();
    assert!(body.is_polydivisible);
    assert_eq!(body.parsed_digits, vec![5, 12]);
    assert_eq!(body.decimal_value.as_deref(), Some("512"));
}

#[tokio::test]
async fn test_check_beyond_128_bits() {
    let server = TestServer::new().await;
    let digits = vec!["0"; 25].join(",");
    let response = server
        .get(&format!("/api/polydivisible/check?digits=99,{digits}&base=100"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: CheckData = response.json().await.unwrap();
    assert_eq!(body.parsed_digits.len(), 26);
    assert!(body.decimal_value.is_none());
}

#[tokio::test]
async fn test_check_decimal_value_round_trips() {
    let server = TestServer::new().await;
    for (digits, base) in [("1232", 10), ("ff", 16), ("z0", 36), ("99,0,12", 100)] {
        let response = server
            .get(&format!("/api/polydivisible/check?digits={digits}&base={base}"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: CheckData = response.json().await.unwrap();
        let value: u128 = body.decimal_value.unwrap().parse().unwrap();
        let expected: Vec<u32> = to_digits(value, base).into_iter().map(u32::from).collect();
        assert_eq!(expected, body.parsed_digits, "{digits} in base {base}");
    }
}

#[tokio::test]
async fn test_check_longest_base_10() {
    let server = TestServer::new().await;
    let response = server
        .get("/api/polydivisible/check?digits=3608528850368400786036725&base=10")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: CheckData = response.json().await.unwrap();
    assert!(body.is_polydivisible);
    assert_eq!(
        body.decimal_value.as_deref(),
        Some("3608528850368400786036725")
    );
}

#[tokio::test]
async fn test_check_missing_params() {
    let server = TestServer::new().await;
    let message = "Missing required parameters: digits and base";

    expect_error(server.get("/api/polydivisible/check?base=10").await, message).await;
    expect_error(server.get("/api/polydivisible/check?digits=12").await, message).await;
    let body = expect_error(server.get("/api/polydivisible/check").await, message).await;
    assert_eq!(body.code, 3002);
}

#[tokio::test]
async fn test_check_invalid_base() {
    let server = TestServer::new().await;
    let message = "Base must be an integer between 2 and 100";

    for base in ["1", "101", "abc"] {
        let path = format!("/api/polydivisible/check?digits=1&base={base}");
        let body = expect_error(server.get(&path).await, message).await;
        assert_eq!(body.code, 3003);
    }
}

#[tokio::test]
async fn test_check_invalid_digits() {
    let server = TestServer::new().await;

    let body = expect_error(
        server.get("/api/polydivisible/check?digits=1g&base=16").await,
        "Digit \"g\" (value 16) is too large for base 16",
    )
    .await;
    assert_eq!(body.code, 3004);

    expect_error(
        server.get("/api/polydivisible/check?digits=1,150&base=100").await,
        "Invalid digit \"150\" for base 100",
    )
    .await;

    expect_error(
        server.get("/api/polydivisible/check?digits=1%2B2&base=10").await,
        "Invalid character \"+\" for base 10",
    )
    .await;
}

// ============================================================================
// Generate Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_generate_base_10_length_1() {
    let server = TestServer::new().await;
    let response = server
        .get("/api/polydivisible/generate?base=10&maxLength=1")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: GenerateData = response.json().await.unwrap();
    assert_eq!(
        body.polydivisible_numbers,
        vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]
    );
    assert_eq!(body.base, 10);
    assert_eq!(body.max_length, 1);
    assert_eq!(body.count, 9);
    assert!(!body.truncated);
}

#[tokio::test]
async fn test_generate_base_10_length_4() {
    let server = TestServer::new().await;
    let response = server
        .get("/api/polydivisible/generate?base=10&maxLength=4")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: GenerateData = response.json().await.unwrap();
    assert_eq!(body.count, 9 + 45 + 150 + 375);
    assert_eq!(body.count, body.polydivisible_numbers.len());

    let pos = |s: &str| body.polydivisible_numbers.iter().position(|x| x == s);
    let target = pos("1232").expect("1232 must be generated");
    for prefix in ["1", "12", "123"] {
        assert!(pos(prefix).unwrap() < target);
    }
}

#[tokio::test]
async fn test_generate_high_base_formatting() {
    let server = TestServer::new().await;
    let response = server
        .get("/api/polydivisible/generate?base=100&maxLength=2")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: GenerateData = response.json().await.unwrap();
    assert_eq!(body.count, 99 + 99 * 50);
    assert_eq!(body.polydivisible_numbers[0], "1");
    assert_eq!(body.polydivisible_numbers[1], "1,0");
    assert!(!body.truncated);
}

#[tokio::test]
async fn test_generate_deterministic() {
    let server = TestServer::new().await;
    let path = "/api/polydivisible/generate?base=7&maxLength=8";

    let first: GenerateData = server.get(path).await.json().await.unwrap();
    let second: GenerateData = server.get(path).await.json().await.unwrap();
    assert_eq!(first.polydivisible_numbers, second.polydivisible_numbers);
}

#[tokio::test]
async fn test_generate_truncated_by_result_cap() {
    let server = TestServer::with_limits(EnumerationConfig {
        max_results: 1_000,
        ..EnumerationConfig::default()
    })
    .await;

    let response = server
        .get("/api/polydivisible/generate?base=100&maxLength=20")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: GenerateData = response.json().await.unwrap();
    assert_eq!(body.count, 1_000);
    assert!(body.truncated);
}

#[tokio::test]
async fn test_generate_truncated_by_deadline() {
    let server = TestServer::with_limits(EnumerationConfig {
        timeout_ms: 0,
        max_results: usize::MAX,
        check_interval: 1,
    })
    .await;

    let response = server
        .get("/api/polydivisible/generate?base=100&maxLength=20")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: GenerateData = response.json().await.unwrap();
    assert!(body.truncated);
    assert_eq!(body.count, body.polydivisible_numbers.len());
}

#[tokio::test]
async fn test_generate_missing_params() {
    let server = TestServer::new().await;
    let message = "Missing required parameters: base and maxLength";

    expect_error(server.get("/api/polydivisible/generate?base=10").await, message).await;
    expect_error(
        server.get("/api/polydivisible/generate?maxLength=3").await,
        message,
    )
    .await;
}

#[tokio::test]
async fn test_generate_invalid_ranges() {
    let server = TestServer::new().await;

    expect_error(
        server
            .get("/api/polydivisible/generate?base=1&maxLength=3")
            .await,
        "Base must be an integer between 2 and 100",
    )
    .await;

    for max_length in ["0", "21"] {
        let path = format!("/api/polydivisible/generate?base=10&maxLength={max_length}");
        expect_error(
            server.get(&path).await,
            "Max length must be an integer between 1 and 20",
        )
        .await;
    }
}
