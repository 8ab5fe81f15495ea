// Transport: one reqwest client, per-request identity headers, and the
// status/envelope classification shared by every service call.
//
// Identity headers are NOT baked into the reqwest client as defaults: they
// are rebuilt from a single session snapshot on every request, so a token
// swap is visible on the very next call without rebuilding the client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::{ApiError, Error, ErrorEnvelope};
use crate::report::PollPolicy;
use crate::session::{SessionIdentity, SessionStore};

pub const PRODUCTION_URL: &str = "https://api.direct.yandex.com/json/v5/";
pub const SANDBOX_URL: &str = "https://api-sandbox.direct.yandex.com/json/v5/";

/// Agency accounts name the advertiser they act for.
pub const CLIENT_LOGIN: HeaderName = HeaderName::from_static("client-login");
/// Bill API points to the agency rather than the advertiser.
pub const USE_OPERATOR_UNITS: HeaderName = HeaderName::from_static("use-operator-units");

/// Error code the API uses for a rejected OAuth token.
const AUTH_ERROR_CODE: i64 = 53;

/// Which Direct installation to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiEndpoint {
    #[default]
    Production,
    /// Test accounts only; objects never serve.
    Sandbox,
}

impl ApiEndpoint {
    pub fn url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_URL,
            Self::Sandbox => SANDBOX_URL,
        }
    }
}

// ── Configuration ────────────────────────────────────────────────────

/// Connection tuning. Carries no credentials; those live in the session.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    /// Per-call timeout for ordinary service calls.
    pub timeout: Duration,
    /// Per-request timeout for each report submission.
    pub report_timeout: Duration,
    pub user_agent: String,
    pub poll: PollPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: PRODUCTION_URL.to_owned(),
            timeout: Duration::from_secs(30),
            report_timeout: Duration::from_secs(10),
            user_agent: concat!("direct-api/", env!("CARGO_PKG_VERSION")).to_owned(),
            poll: PollPolicy::default(),
        }
    }
}

impl TransportConfig {
    pub fn with_endpoint(mut self, endpoint: ApiEndpoint) -> Self {
        endpoint.url().clone_into(&mut self.base_url);
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_report_timeout(mut self, timeout: Duration) -> Self {
        self.report_timeout = timeout;
        self
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Build a `reqwest::Client` from this config.
    ///
    /// Timeouts are applied per request, not on the client.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }

    /// Parse `base_url`, forcing a trailing slash so service paths join under it.
    pub(crate) fn normalized_base_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

// ── Wire shapes ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct Envelope<'a, B: ?Sized> {
    method: &'a str,
    params: &'a B,
}

// ── Transport ────────────────────────────────────────────────────────

/// Authenticated JSON transport shared by every service façade.
#[derive(Debug)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    report_timeout: Duration,
    poll: PollPolicy,
    session: Arc<SessionStore>,
}

impl Transport {
    pub fn new(config: &TransportConfig, session: Arc<SessionStore>) -> Result<Self, Error> {
        let http = config.build_client()?;
        Self::with_client(http, config, session)
    }

    /// Wrap an existing `reqwest::Client` (e.g. one with a custom proxy).
    pub fn with_client(
        http: reqwest::Client,
        config: &TransportConfig,
        session: Arc<SessionStore>,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: config.normalized_base_url()?,
            timeout: config.timeout,
            report_timeout: config.report_timeout,
            poll: config.poll.clone(),
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn poll_policy(&self) -> &PollPolicy {
        &self.poll
    }

    pub(crate) fn report_timeout(&self) -> Duration {
        self.report_timeout
    }

    pub(crate) fn url(&self, resource: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(resource)?)
    }

    // ── Public API ───────────────────────────────────────────────────

    /// Call `verb` on `resource` with the default timeout.
    pub async fn send<B: Serialize + Sync + ?Sized>(
        &self,
        resource: &str,
        verb: &str,
        body: &B,
    ) -> Result<Value, Error> {
        self.send_with_timeout(resource, verb, body, self.timeout)
            .await
    }

    /// Call `verb` on `resource`. Never retries.
    pub async fn send_with_timeout<B: Serialize + Sync + ?Sized>(
        &self,
        resource: &str,
        verb: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<Value, Error> {
        let envelope = Envelope {
            method: verb,
            params: body,
        };
        let resp = self
            .post(resource, &envelope, HeaderMap::new(), timeout)
            .await?;

        let status = resp.status();
        if status.is_success() {
            let text = resp.text().await?;
            decode_success(status, &text)
        } else {
            Err(classify_failure(resp).await)
        }
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// POST `body` with identity headers from one session snapshot.
    pub(crate) async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        resource: &str,
        body: &B,
        extra: HeaderMap,
        timeout: Duration,
    ) -> Result<reqwest::Response, Error> {
        let url = self.url(resource)?;
        let session = self.session.snapshot();
        let mut headers = identity_headers(&session)?;
        headers.extend(extra);

        debug!(%url, session_version = session.version(), "POST");

        let resp = self
            .http
            .post(url)
            .headers(headers)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| map_send_error(e, timeout))?;

        log_response_meta(&resp);
        Ok(resp)
    }
}

/// Headers derived from the session: auth, locale, and agency delegation.
pub(crate) fn identity_headers(session: &SessionIdentity) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    let bearer = format!("Bearer {}", session.access_token.expose_secret());
    let mut auth = HeaderValue::from_str(&bearer).map_err(|e| Error::InvalidHeader {
        name: "Authorization",
        reason: e.to_string(),
    })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    let locale: &'static str = session.locale.into();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(locale));

    if let Some(ref login) = session.client_login {
        let value = HeaderValue::from_str(login).map_err(|e| Error::InvalidHeader {
            name: "Client-Login",
            reason: e.to_string(),
        })?;
        headers.insert(CLIENT_LOGIN, value);
    }

    if session.use_operator_units {
        headers.insert(USE_OPERATOR_UNITS, HeaderValue::from_static("true"));
    }

    Ok(headers)
}

fn map_send_error(err: reqwest::Error, timeout: Duration) -> Error {
    if err.is_timeout() {
        Error::Timeout {
            timeout_ms: timeout.as_millis(),
        }
    } else {
        Error::Transport(err)
    }
}

/// `RequestId` and `Units` (`spent/remaining/daily`) for tracing point usage.
fn log_response_meta(resp: &reqwest::Response) {
    let headers = resp.headers();
    let request_id = headers.get("requestid").and_then(|v| v.to_str().ok());
    let units = headers.get("units").and_then(|v| v.to_str().ok());
    debug!(status = %resp.status(), request_id, units, "response");
}

// ── Response classification ──────────────────────────────────────────

/// Decode a 2xx body, surfacing an embedded `{"error": ...}` as a failure.
pub(crate) fn decode_success(status: StatusCode, text: &str) -> Result<Value, Error> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    let value: Value = serde_json::from_str(text).map_err(|e| {
        let preview: String = text.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: text.to_owned(),
        }
    })?;

    if value.get("error").is_some() {
        if let Ok(envelope) = ErrorEnvelope::deserialize(&value) {
            trace!("error envelope in {status} response");
            let is_auth = envelope.error.code() == Some(AUTH_ERROR_CODE);
            let api = envelope.error.into_api_error(status.as_u16());
            return Err(if is_auth {
                Error::Authentication(api)
            } else {
                Error::Api(api)
            });
        }
    }

    Ok(value)
}

/// Turn a non-2xx response into `Authentication` (401) or `Api`.
pub(crate) async fn classify_failure(resp: reqwest::Response) -> Error {
    let status = resp.status();
    let raw = resp.text().await.unwrap_or_else(|e| {
        debug!(%status, error = %e, "failed to read error body");
        String::new()
    });
    let api = parse_api_error(status, &raw);

    if status == StatusCode::UNAUTHORIZED {
        Error::Authentication(api)
    } else {
        Error::Api(api)
    }
}

fn parse_api_error(status: StatusCode, raw: &str) -> ApiError {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(raw) {
        return envelope.error.into_api_error(status.as_u16());
    }

    ApiError {
        status: status.as_u16(),
        code: None,
        message: status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned(),
        description: raw.to_owned(),
        request_id: None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::session::Locale;

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = TransportConfig::default().with_base_url("http://localhost:9000/json/v5");
        assert_eq!(
            config.normalized_base_url().unwrap().as_str(),
            "http://localhost:9000/json/v5/"
        );
    }

    #[test]
    fn sandbox_endpoint() {
        let config = TransportConfig::default().with_endpoint(ApiEndpoint::Sandbox);
        assert_eq!(config.base_url, SANDBOX_URL);
    }

    #[test]
    fn identity_headers_reflect_session() {
        let session = SessionIdentity::new("tok")
            .with_client_login("client-1")
            .with_locale(Locale::Uk)
            .with_operator_units(true);
        let headers = identity_headers(&session).unwrap();

        assert_eq!(headers[AUTHORIZATION], "Bearer tok");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[ACCEPT_LANGUAGE], "uk");
        assert_eq!(headers[CLIENT_LOGIN], "client-1");
        assert_eq!(headers[USE_OPERATOR_UNITS], "true");
    }

    #[test]
    fn identity_headers_omit_unset_login() {
        let headers = identity_headers(&SessionIdentity::new("tok")).unwrap();
        assert!(headers.get(CLIENT_LOGIN).is_none());
        assert!(headers.get(USE_OPERATOR_UNITS).is_none());
    }

    #[test]
    fn invalid_login_is_rejected() {
        let session = SessionIdentity::new("tok").with_client_login("bad\nlogin");
        assert!(matches!(
            identity_headers(&session),
            Err(Error::InvalidHeader {
                name: "Client-Login",
                ..
            })
        ));
    }

    #[test]
    fn embedded_error_on_200() {
        let body = json!({
            "error": {
                "error_code": 8800,
                "error_string": "Object not found",
                "error_detail": "Campaign not found",
                "request_id": "abc"
            }
        })
        .to_string();
        let err = decode_success(StatusCode::OK, &body).unwrap_err();
        assert_eq!(err.api_error_code(), Some(8800));
        assert_eq!(err.request_id(), Some("abc"));
        assert!(matches!(err, Error::Api(_)));
    }

    #[test]
    fn embedded_auth_error_on_200() {
        let body = r#"{"error":{"error_code":53,"error_string":"Authorization error","error_detail":"","request_id":"x"}}"#;
        let err = decode_success(StatusCode::OK, body).unwrap_err();
        assert!(err.is_auth_expired());
    }

    #[test]
    fn empty_success_body_is_null() {
        assert_eq!(decode_success(StatusCode::OK, "").unwrap(), Value::Null);
    }

    #[test]
    fn non_envelope_failure_keeps_raw_body() {
        let api = parse_api_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(api.status, 502);
        assert_eq!(api.code, None);
        assert_eq!(api.message, "Bad Gateway");
        assert_eq!(api.description, "upstream down");
    }
}
