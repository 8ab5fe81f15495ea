use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Top-level error type for the `direct-api` crate.
///
/// Callers branch on the variant: [`Authentication`](Self::Authentication)
/// means the token must be refreshed, [`Parameter`](Self::Parameter) means the
/// call was rejected locally before touching the network, and
/// [`Api`](Self::Api) carries whatever the server said verbatim.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The server rejected the OAuth token (HTTP 401 or error code 53).
    ///
    /// Never retried internally. Refresh the token, call
    /// `DirectClient::set_access_token`, and retry at a higher layer.
    #[error("Authentication failed: {0}")]
    Authentication(ApiError),

    // ── API ─────────────────────────────────────────────────────────
    /// Any other failure reported by the server.
    #[error("API error: {0}")]
    Api(ApiError),

    // ── Local validation ────────────────────────────────────────────
    /// None of a required disjunctive filter group was supplied.
    #[error("must supply one of {params:?}")]
    Parameter { params: Vec<&'static str> },

    // ── Reports ─────────────────────────────────────────────────────
    /// The report poller gave up before the server finished the report.
    #[error("Report not ready after {attempts} attempts ({waited_secs}s waited)")]
    PollTimeout { attempts: u32, waited_secs: u64 },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u128 },

    /// A session value could not be encoded as an HTTP header.
    #[error("Invalid value for header {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` if refreshing the access token might resolve this error.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Only meaningful for idempotent calls: retrying an `add` may
    /// duplicate objects.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } | Self::PollTimeout { .. } => true,
            // 52: authorization server temporarily unavailable
            // 1000/1001/1002: service temporarily unavailable
            Self::Api(api) => matches!(api.code, Some(52 | 1000 | 1001 | 1002)),
            _ => false,
        }
    }

    /// The server-side error payload, if this error came from the API.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Authentication(api) | Self::Api(api) => Some(api),
            _ => None,
        }
    }

    /// Extract the API error code, if available.
    pub fn api_error_code(&self) -> Option<i64> {
        self.api_error().and_then(|api| api.code)
    }

    /// The server's request id, for support tickets.
    pub fn request_id(&self) -> Option<&str> {
        self.api_error().and_then(|api| api.request_id.as_deref())
    }
}

/// Error payload decoded from the `{"error": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status of the response that carried the error.
    pub status: u16,
    pub code: Option<i64>,
    pub message: String,
    pub description: String,
    pub request_id: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{code}. ")?,
            None => write!(f, "HTTP {}. ", self.status)?,
        }
        write!(f, "{}. {}", self.message, self.description)?;
        if let Some(ref id) = self.request_id {
            write!(f, " request_id={id}")?;
        }
        Ok(())
    }
}

// ── Wire shape ───────────────────────────────────────────────────────

/// `{"error": {...}}` as sent by the API, on failure statuses and,
/// for most business errors, on HTTP 200.
#[derive(Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub(crate) error: ErrorBody,
}

#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default, deserialize_with = "lenient_code")]
    error_code: Option<i64>,
    #[serde(default)]
    error_string: Option<String>,
    #[serde(default)]
    error_detail: Option<String>,
    #[serde(default)]
    request_id: Option<String>,
}

impl ErrorBody {
    pub(crate) fn code(&self) -> Option<i64> {
        self.error_code
    }

    pub(crate) fn into_api_error(self, status: u16) -> ApiError {
        ApiError {
            status,
            code: self.error_code,
            message: self.error_string.unwrap_or_default(),
            description: self.error_detail.unwrap_or_default(),
            request_id: self.request_id,
        }
    }
}

/// The reports service sends `error_code` as a string, the JSON services
/// as a number.
fn lenient_code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Int(i64),
        Text(String),
    }

    Ok(match Option::<Code>::deserialize(deserializer)? {
        Some(Code::Int(n)) => Some(n),
        Some(Code::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}
