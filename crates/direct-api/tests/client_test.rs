// Integration tests for `DirectClient` service calls using wiremock.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use direct_api::services::{AdsQuery, CampaignsQuery, KeywordBidsQuery, SitelinksQuery};
use direct_api::{DirectClient, Error, Locale};

// ── Helpers ─────────────────────────────────────────────────────────

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("direct_api=debug")
        .with_test_writer()
        .try_init();
}

async fn setup() -> (MockServer, DirectClient) {
    init_tracing();
    let server = MockServer::start().await;
    let client = DirectClient::builder("T1")
        .base_url(format!("{}/json/v5/", server.uri()))
        .build()
        .unwrap();
    (server, client)
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_campaigns_get_sends_envelope() {
    let (server, client) = setup().await;

    let result = json!({ "result": { "Campaigns": [{ "Id": 1, "Name": "Spring" }] } });
    Mock::given(method("POST"))
        .and(path("/json/v5/campaigns"))
        .and(header("authorization", "Bearer T1"))
        .and(header("accept-language", "ru"))
        .and(body_json(json!({
            "method": "get",
            "params": {
                "SelectionCriteria": { "Ids": [1] },
                "FieldNames": ["Id", "Name"],
                "Page": { "Limit": 1000, "Offset": 0 },
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&result))
        .expect(1)
        .mount(&server)
        .await;

    let query = CampaignsQuery {
        ids: vec![1],
        ..CampaignsQuery::new(["Id", "Name"])
    };
    let value = client.campaigns.get(&query).await.unwrap();
    assert_eq!(value, result);
}

#[tokio::test]
async fn test_add_wraps_objects_under_service_key() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/sitelinks"))
        .and(body_json(json!({
            "method": "add",
            "params": { "SitelinksSets": [{ "Sitelinks": [{ "Title": "Shop", "Href": "https://a.b" }] }] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": { "AddResults": [{ "Id": 9 }] } })))
        .expect(1)
        .mount(&server)
        .await;

    let set = json!({ "Sitelinks": [{ "Title": "Shop", "Href": "https://a.b" }] });
    let value = client.sitelinks.add(&[set]).await.unwrap();
    assert_eq!(value["result"]["AddResults"][0]["Id"], 9);
}

#[tokio::test]
async fn test_status_verbs_send_id_selection() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/ads"))
        .and(body_json(json!({
            "method": "moderate",
            "params": { "SelectionCriteria": { "Ids": [3, 4] } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": {} })))
        .expect(1)
        .mount(&server)
        .await;

    client.ads.moderate(&[3, 4]).await.unwrap();
}

#[tokio::test]
async fn test_keyword_bids_set_auto_verb() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/keywordbids"))
        .and(body_json(json!({
            "method": "setAuto",
            "params": { "KeywordBids": [{ "CampaignId": 5 }] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": {} })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .keyword_bids
        .set_auto(&[json!({ "CampaignId": 5 })])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_clients_get_has_no_selection_or_page() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/clients"))
        .and(body_json(json!({ "method": "get", "params": { "FieldNames": ["Login"] } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": { "Clients": [] } })))
        .expect(1)
        .mount(&server)
        .await;

    client.clients.get(&["Login"]).await.unwrap();
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/vcards"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let value = client.vcards.delete(&[1]).await.unwrap();
    assert!(value.is_null());
}

// ── Local validation ────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_required_group_makes_no_request() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.ads.get(&AdsQuery::new(["Id"])).await.unwrap_err();
    match err {
        Error::Parameter { params } => {
            assert_eq!(params, ["ids", "ad_group_ids", "campaign_ids"]);
        }
        other => panic!("expected Parameter, got {other:?}"),
    }

    let err = client
        .keyword_bids
        .get(&KeywordBidsQuery::new(["KeywordId"]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Parameter { .. }));
}

// ── Error classification ────────────────────────────────────────────

#[tokio::test]
async fn test_401_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/campaigns"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "error_code": 53,
                "error_string": "Authorization error",
                "error_detail": "Invalid OAuth token",
                "request_id": "r-401"
            }
        })))
        .mount(&server)
        .await;

    let err = client
        .campaigns
        .get(&CampaignsQuery::new(["Id"]))
        .await
        .unwrap_err();
    assert!(err.is_auth_expired());
    assert_eq!(err.request_id(), Some("r-401"));
}

#[tokio::test]
async fn test_other_status_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/keywords"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "error_code": 8000,
                "error_string": "Invalid request",
                "error_detail": "Page.Limit out of range",
                "request_id": "r-400"
            }
        })))
        .mount(&server)
        .await;

    let err = client.keywords.delete(&[1]).await.unwrap_err();
    let api = match err {
        Error::Api(api) => api,
        other => panic!("expected Api error, got {other:?}"),
    };
    assert_eq!(api.status, 400);
    assert_eq!(api.code, Some(8000));
    assert_eq!(api.message, "Invalid request");
    assert_eq!(api.description, "Page.Limit out of range");
    assert_eq!(api.request_id.as_deref(), Some("r-400"));
}

#[tokio::test]
async fn test_error_envelope_on_200_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/sitelinks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {
                "error_code": 152,
                "error_string": "Not enough units",
                "error_detail": "",
                "request_id": "r-200"
            }
        })))
        .mount(&server)
        .await;

    let err = client
        .sitelinks
        .get(&SitelinksQuery::new(["Id"]))
        .await
        .unwrap_err();
    assert_eq!(err.api_error_code(), Some(152));
    assert!(matches!(err, Error::Api(_)));
}

// ── Session mutation ────────────────────────────────────────────────

#[tokio::test]
async fn test_session_setters_apply_to_next_request() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/dictionaries"))
        .and(header("authorization", "Bearer T2"))
        .and(header("accept-language", "en"))
        .and(header("client-login", "advertiser-7"))
        .and(header("use-operator-units", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": {} })))
        .expect(1)
        .mount(&server)
        .await;

    client.set_access_token("T2");
    client.set_locale(Locale::En);
    client.set_client_login(Some("advertiser-7"));
    let version = client.set_use_operator_units(true);
    assert_eq!(version, 4);

    client.dictionaries.get(&["Currencies"]).await.unwrap();
}

#[tokio::test]
async fn test_cleared_client_login_is_not_sent() {
    let server = MockServer::start().await;
    let client = DirectClient::builder("T1")
        .client_login("advertiser-7")
        .base_url(format!("{}/json/v5/", server.uri()))
        .build()
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/json/v5/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": {} })))
        .mount(&server)
        .await;

    client.set_client_login(None);
    client.clients.get(&["Login"]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("client-login"));
}

// ── Timeouts ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_configured_timeout_is_reported_exactly() {
    let server = MockServer::start().await;
    let client = DirectClient::builder("T1")
        .base_url(format!("{}/json/v5/", server.uri()))
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/json/v5/vcards"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = client.vcards.delete(&[1]).await.unwrap_err();
    match err {
        Error::Timeout { timeout_ms } => assert_eq!(timeout_ms, 300),
        ref other => panic!("expected Timeout, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Request timed out after 300ms");
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_per_call_timeout_overrides_default() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/json/v5/vcards"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = client
        .transport()
        .send_with_timeout("vcards", "get", &json!({}), Duration::from_millis(200))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_ms: 200 }));
}

// ── Unreadable error body ───────────────────────────────────────────

/// Serve one request with a 500 whose body ends before its Content-Length.
async fn truncated_error_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0_u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&request).to_lowercase();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= end + 4 + length {
                    break;
                }
            }
        }
        let response = "HTTP/1.1 500 Internal Server Error\r\n\
                        Content-Type: application/json\r\n\
                        Content-Length: 100\r\n\r\n{\"error\":";
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{addr}/json/v5/")
}

#[tokio::test]
async fn test_truncated_error_body_still_classified() {
    let client = DirectClient::builder("T1")
        .base_url(truncated_error_server().await)
        .build()
        .unwrap();

    let err = client.vcards.delete(&[1]).await.unwrap_err();
    let api = match err {
        Error::Api(api) => api,
        other => panic!("expected Api error, got {other:?}"),
    };
    assert_eq!(api.status, 500);
    assert_eq!(api.code, None);
    assert_eq!(api.message, "Internal Server Error");
    assert_eq!(api.description, "");
}
