// Integration tests for the report poller using wiremock.
#![allow(clippy::unwrap_used)]

use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use direct_api::{DirectClient, Error, PollPolicy, ProcessingMode, ReportHeaders, ReportRequest};

const TSV: &str = "Date\tClicks\n2024-01-01\t12\nTotal rows: 1\n";

// ── Helpers ─────────────────────────────────────────────────────────

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("direct_api=debug")
        .with_test_writer()
        .try_init();
}

async fn setup_with(policy: PollPolicy) -> (MockServer, DirectClient) {
    init_tracing();
    let server = MockServer::start().await;
    let client = DirectClient::builder("T1")
        .base_url(format!("{}/json/v5/", server.uri()))
        .poll_policy(policy)
        .build()
        .unwrap();
    (server, client)
}

fn request() -> ReportRequest {
    ReportRequest::new(
        "clicks",
        "CAMPAIGN_PERFORMANCE_REPORT",
        "YESTERDAY",
        vec!["Date".into(), "Clicks".into()],
    )
}

fn pending(status: u16, retry_in: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).insert_header("retryIn", retry_in)
}

// ── Polling ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_waits_for_report_then_returns_text() {
    let (server, client) = setup_with(PollPolicy::default()).await;

    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .respond_with(pending(201, "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .respond_with(pending(202, "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TSV))
        .expect(1)
        .mount(&server)
        .await;

    let started = Instant::now();
    let text = client.reports.get(&request()).await.unwrap();

    assert_eq!(text, TSV);
    assert!(started.elapsed() >= Duration::from_secs(2));
}

#[tokio::test]
async fn test_resubmits_identical_request() {
    let (server, client) = setup_with(PollPolicy::default()).await;

    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .respond_with(pending(202, "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TSV))
        .mount(&server)
        .await;

    let request = request().processing_mode(ProcessingMode::Online);
    client.reports.get(&request).await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].body, received[1].body);
    assert_eq!(received[1].headers.get("processingmode").unwrap(), "online");
}

#[tokio::test]
async fn test_missing_retry_header_uses_policy_default() {
    let policy = PollPolicy::default().with_default_retry(Duration::from_millis(50));
    let (server, client) = setup_with(policy).await;

    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .respond_with(ResponseTemplate::new(202))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TSV))
        .mount(&server)
        .await;

    let started = Instant::now();
    client.reports.get(&request()).await.unwrap();
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(50));
    assert!(elapsed < Duration::from_secs(5));
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_status_fails_without_sleeping() {
    let (server, client) = setup_with(PollPolicy::default()).await;

    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .respond_with(pending(400, "10").set_body_json(json!({
            "error": {
                "error_code": "4000",
                "error_string": "Invalid request parameters",
                "error_detail": "Unknown field Clicks2",
                "request_id": "r-rep"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let started = Instant::now();
    let err = client.reports.get(&request()).await.unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(err.api_error_code(), Some(4000));
    assert!(matches!(err, Error::Api(_)));
}

#[tokio::test]
async fn test_401_is_authentication_error() {
    let (server, client) = setup_with(PollPolicy::default()).await;

    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.reports.get(&request()).await.unwrap_err();
    assert!(err.is_auth_expired());
}

#[tokio::test]
async fn test_poll_limit_yields_poll_timeout() {
    let policy = PollPolicy::default().with_max_attempts(2);
    let (server, client) = setup_with(policy).await;

    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .respond_with(pending(202, "0"))
        .expect(2)
        .mount(&server)
        .await;

    let err = client.reports.get(&request()).await.unwrap_err();
    match err {
        Error::PollTimeout { attempts, .. } => assert_eq!(attempts, 2),
        other => panic!("expected PollTimeout, got {other:?}"),
    }
}

// ── Headers and body ────────────────────────────────────────────────

#[tokio::test]
async fn test_report_headers_and_body() {
    let (server, client) = setup_with(PollPolicy::default()).await;

    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .and(header("authorization", "Bearer T1"))
        .and(header("processingmode", "offline"))
        .and(header("skipreportsummary", "true"))
        .and(body_json(json!({
            "params": {
                "SelectionCriteria": {},
                "FieldNames": ["Date", "Clicks"],
                "ReportName": "clicks",
                "ReportType": "CAMPAIGN_PERFORMANCE_REPORT",
                "DateRangeType": "YESTERDAY",
                "IncludeVAT": "YES",
                "Format": "TSV",
                "IncludeDiscount": "NO",
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(TSV))
        .expect(1)
        .mount(&server)
        .await;

    let request = request()
        .processing_mode(ProcessingMode::Offline)
        .headers(ReportHeaders {
            skip_report_summary: Some(true),
            ..ReportHeaders::default()
        });
    client.reports.get(&request).await.unwrap();
}

#[tokio::test]
async fn test_report_timeout_applies_per_submission() {
    let server = MockServer::start().await;
    let client = DirectClient::builder("T1")
        .base_url(format!("{}/json/v5/", server.uri()))
        .report_timeout(Duration::from_millis(250))
        .build()
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/json/v5/reports"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(TSV)
                .set_delay(Duration::from_secs(2)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client.reports.get(&request()).await.unwrap_err();
    match err {
        Error::Timeout { timeout_ms } => assert_eq!(timeout_ms, 250),
        other => panic!("expected Timeout, got {other:?}"),
    }
}
