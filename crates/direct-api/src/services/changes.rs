// Changes service
//
// Incremental sync: the server answers with what changed since a timestamp
// and a new timestamp for the next call.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{Endpoint, names};
use crate::error::Error;
use crate::params::{assemble, require_one_of, to_map};
use crate::transport::Transport;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const CHECK_IDS: &[&str] = &["campaign_ids", "ad_group_ids", "ad_ids"];

/// Arguments of `changes.check`. Exactly the id lists the caller fills in
/// are sent, at the top level of the body.
#[derive(Debug, Clone, Serialize)]
pub struct ChangesQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    #[serde(skip)]
    pub timestamp: DateTime<Utc>,
    pub campaign_ids: Vec<i64>,
    pub ad_group_ids: Vec<i64>,
    pub ad_ids: Vec<i64>,
}

impl ChangesQuery {
    pub fn new<I, S>(timestamp: DateTime<Utc>, field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_names: names(field_names),
            timestamp,
            campaign_ids: Vec::new(),
            ad_group_ids: Vec::new(),
            ad_ids: Vec::new(),
        }
    }

    pub fn to_body(&self) -> Result<Value, Error> {
        let values = to_map(self)?;
        require_one_of(CHECK_IDS, &values)?;

        let mut body = assemble(CHECK_IDS, &values);
        body.insert("FieldNames".into(), Value::from(self.field_names.clone()));
        body.insert("Timestamp".into(), Value::from(format_timestamp(&self.timestamp)));
        Ok(Value::Object(body))
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn timestamp_body(ts: Option<&DateTime<Utc>>) -> Value {
    let mut body = Map::new();
    if let Some(ts) = ts {
        body.insert("Timestamp".into(), Value::from(format_timestamp(ts)));
    }
    Value::Object(body)
}

#[derive(Debug, Clone)]
pub struct Changes {
    endpoint: Endpoint,
}

impl Changes {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "Changes", "changes"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Whether regions or time zones changed. Without a timestamp the
    /// server only returns the current one.
    pub async fn check_dictionaries(&self, since: Option<DateTime<Utc>>) -> Result<Value, Error> {
        let body = timestamp_body(since.as_ref());
        self.endpoint.call("checkDictionaries", &body).await
    }

    pub async fn check_campaigns(&self, since: DateTime<Utc>) -> Result<Value, Error> {
        let body = timestamp_body(Some(&since));
        self.endpoint.call("checkCampaigns", &body).await
    }

    pub async fn check(&self, query: &ChangesQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.call("check", &body).await
    }
}
