// Report service
//
// Reports are generated asynchronously server-side. The endpoint answers
// 201 (queued offline) or 202 (building) with a `retryIn` header until the
// report is ready (200, body is the report text). The poller resubmits the
// identical request until then, bounded by `PollPolicy`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::{Map, Value, json};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::{debug, warn};

use crate::error::Error;
use crate::params::{assemble, to_map};
use crate::transport::{Transport, classify_failure};

pub(crate) const REPORTS_PATH: &str = "reports";

const PROCESSING_MODE: HeaderName = HeaderName::from_static("processingmode");
const RETURN_MONEY_IN_MICROS: HeaderName = HeaderName::from_static("returnmoneyinmicros");
const SKIP_REPORT_HEADER: HeaderName = HeaderName::from_static("skipreportheader");
const SKIP_COLUMN_HEADER: HeaderName = HeaderName::from_static("skipcolumnheader");
const SKIP_REPORT_SUMMARY: HeaderName = HeaderName::from_static("skipreportsummary");
const RETRY_IN: &str = "retryin";

/// Optional fields of the `params` block, in wire order.
const OPTIONAL_FIELDS: &[&str] = &[
    "goals",
    "attribution_models",
    "page",
    "order_by",
    "format",
    "include_discount",
];

// ── Poll policy ──────────────────────────────────────────────────────

/// Bounds on how long [`ReportPoller::fetch`] waits for a report.
///
/// Both limits default to `None`: the poller trusts the server to finish
/// eventually. Set at least one when a stuck offline report must not block
/// the caller forever; exceeding it yields [`Error::PollTimeout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Wait used when the server omits `retryIn`.
    pub default_retry: Duration,
    /// Maximum number of submissions, including the first.
    pub max_attempts: Option<u32>,
    /// Maximum total time spent sleeping between submissions.
    pub max_wait: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            default_retry: Duration::from_secs(10),
            max_attempts: None,
            max_wait: None,
        }
    }
}

impl PollPolicy {
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn with_max_wait(mut self, wait: Duration) -> Self {
        self.max_wait = Some(wait);
        self
    }

    pub fn with_default_retry(mut self, retry: Duration) -> Self {
        self.default_retry = retry;
        self
    }

    /// Whether another wait of `next_wait` (after `attempts` submissions
    /// and `waited` sleeping) would break a limit.
    fn exceeded(&self, attempts: u32, waited: Duration, next_wait: Duration) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
            || self
                .max_wait
                .is_some_and(|max| waited.saturating_add(next_wait) > max)
    }
}

// ── Request ──────────────────────────────────────────────────────────

/// How the server should build the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ProcessingMode {
    /// Server decides between online and offline.
    #[default]
    Auto,
    Online,
    Offline,
}

/// Per-request report headers. `None` leaves the server default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportHeaders {
    pub return_money_in_micros: Option<bool>,
    pub skip_report_header: Option<bool>,
    pub skip_column_header: Option<bool>,
    pub skip_report_summary: Option<bool>,
}

/// One report definition. Resubmitted verbatim while the server builds it.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRequest {
    /// Passed through as-is (`DateFrom`, `DateTo`, `Filter`, ...).
    pub selection_criteria: Value,
    pub field_names: Vec<String>,
    pub report_name: String,
    pub report_type: String,
    pub date_range_type: String,
    pub goals: Vec<String>,
    pub attribution_models: Vec<String>,
    /// `{"Limit": n}`
    pub page: Option<Value>,
    /// `[{"Field": .., "SortOrder": ..}]`
    pub order_by: Vec<Value>,
    pub format: String,
    /// `YES`/`NO`; `None` omits the field.
    pub include_vat: Option<String>,
    pub include_discount: Option<String>,
    #[serde(skip)]
    pub processing_mode: ProcessingMode,
    #[serde(skip)]
    pub headers: ReportHeaders,
}

impl ReportRequest {
    pub fn new(
        report_name: impl Into<String>,
        report_type: impl Into<String>,
        date_range_type: impl Into<String>,
        field_names: Vec<String>,
    ) -> Self {
        Self {
            selection_criteria: Value::Object(Map::new()),
            field_names,
            report_name: report_name.into(),
            report_type: report_type.into(),
            date_range_type: date_range_type.into(),
            goals: Vec::new(),
            attribution_models: Vec::new(),
            page: None,
            order_by: Vec::new(),
            format: "TSV".to_owned(),
            include_vat: Some("YES".to_owned()),
            include_discount: Some("NO".to_owned()),
            processing_mode: ProcessingMode::default(),
            headers: ReportHeaders::default(),
        }
    }

    pub fn selection_criteria(mut self, criteria: Value) -> Self {
        self.selection_criteria = criteria;
        self
    }

    pub fn goals(mut self, goals: Vec<String>) -> Self {
        self.goals = goals;
        self
    }

    pub fn attribution_models(mut self, models: Vec<String>) -> Self {
        self.attribution_models = models;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.page = Some(json!({ "Limit": limit }));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, sort_order: impl Into<String>) -> Self {
        self.order_by
            .push(json!({ "Field": field.into(), "SortOrder": sort_order.into() }));
        self
    }

    pub fn include_vat(mut self, include: Option<bool>) -> Self {
        self.include_vat = include.map(yes_no);
        self
    }

    pub fn include_discount(mut self, include: Option<bool>) -> Self {
        self.include_discount = include.map(yes_no);
        self
    }

    pub fn processing_mode(mut self, mode: ProcessingMode) -> Self {
        self.processing_mode = mode;
        self
    }

    pub fn headers(mut self, headers: ReportHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// `{"params": {...}}` as the reports endpoint expects.
    pub fn to_body(&self) -> Result<Value, Error> {
        let mut params = Map::new();
        params.insert(
            "SelectionCriteria".into(),
            self.selection_criteria.clone(),
        );
        params.insert("FieldNames".into(), Value::from(self.field_names.clone()));
        params.insert("ReportName".into(), Value::from(self.report_name.as_str()));
        params.insert("ReportType".into(), Value::from(self.report_type.as_str()));
        params.insert(
            "DateRangeType".into(),
            Value::from(self.date_range_type.as_str()),
        );
        // "VAT" is an acronym; name conversion would produce "IncludeVat"
        if let Some(ref vat) = self.include_vat {
            params.insert("IncludeVAT".into(), Value::from(vat.as_str()));
        }
        params.extend(assemble(OPTIONAL_FIELDS, &to_map(self)?));

        Ok(json!({ "params": params }))
    }

    /// Processing mode plus any report headers that were set.
    pub fn header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let mode: &'static str = self.processing_mode.into();
        headers.insert(PROCESSING_MODE, HeaderValue::from_static(mode));

        let flags = [
            (RETURN_MONEY_IN_MICROS, self.headers.return_money_in_micros),
            (SKIP_REPORT_HEADER, self.headers.skip_report_header),
            (SKIP_COLUMN_HEADER, self.headers.skip_column_header),
            (SKIP_REPORT_SUMMARY, self.headers.skip_report_summary),
        ];
        for (name, flag) in flags {
            if let Some(on) = flag {
                let value = if on { "true" } else { "false" };
                headers.insert(name, HeaderValue::from_static(value));
            }
        }
        headers
    }
}

fn yes_no(on: bool) -> String {
    if on { "YES" } else { "NO" }.to_owned()
}

// ── Poller ───────────────────────────────────────────────────────────

/// Submits a report and waits until the server has built it.
#[derive(Debug, Clone)]
pub struct ReportPoller {
    transport: Arc<Transport>,
}

impl ReportPoller {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the report text, sleeping between submissions as the server asks.
    ///
    /// Each call owns its own body and headers; concurrent fetches are
    /// independent. Dropping the future abandons the wait.
    pub async fn fetch(&self, request: &ReportRequest) -> Result<String, Error> {
        let body = request.to_body()?;
        let headers = request.header_map();
        let policy = self.transport.poll_policy();
        let timeout = self.transport.report_timeout();

        let mut attempts: u32 = 0;
        let mut waited = Duration::ZERO;

        loop {
            attempts = attempts.saturating_add(1);
            let resp = self
                .transport
                .post(REPORTS_PATH, &body, headers.clone(), timeout)
                .await?;

            let status = resp.status();
            match status {
                StatusCode::OK => return Ok(resp.text().await?),
                StatusCode::CREATED | StatusCode::ACCEPTED => {
                    let retry_in = retry_in(resp.headers()).unwrap_or(policy.default_retry);

                    if policy.exceeded(attempts, waited, retry_in) {
                        warn!(
                            attempts,
                            waited_secs = waited.as_secs(),
                            report = %request.report_name,
                            "report poll limit reached"
                        );
                        return Err(Error::PollTimeout {
                            attempts,
                            waited_secs: waited.as_secs(),
                        });
                    }

                    debug!(
                        %status,
                        attempts,
                        retry_in_secs = retry_in.as_secs(),
                        report = %request.report_name,
                        "report not ready"
                    );
                    tokio::time::sleep(retry_in).await;
                    waited = waited.saturating_add(retry_in);
                }
                _ => return Err(classify_failure(resp).await),
            }
        }
    }
}

/// `retryIn` in whole seconds; unparseable values count as absent.
fn retry_in(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_IN)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
