// Dynamic text ad targets service
//
// The API calls these objects webpages; that is also their object key.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{Endpoint, GetLayout, keyed, names};
use crate::error::Error;
use crate::params::{Page, assemble, to_map};
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &["ids", "ad_group_ids", "campaign_ids"],
    criteria: &["ids", "ad_group_ids", "campaign_ids", "states"],
    sub_field_names: &[],
    default_limit: Page::DEFAULT_LIMIT,
    optional_criteria: false,
};

const ADD_OPTIONS: &[&str] = &["bid", "context_bid", "strategy_priority"];

/// Body of `dynamictextadtargets.add`. Bids apply to every webpage in the
/// batch; unset options are left out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewWebpages {
    #[serde(skip)]
    pub webpages: Vec<Value>,
    pub bid: Option<i64>,
    pub context_bid: Option<i64>,
    /// `LOW`, `NORMAL` or `HIGH`.
    pub strategy_priority: Option<String>,
}

impl NewWebpages {
    pub fn new(webpages: Vec<Value>) -> Self {
        Self {
            webpages,
            ..Self::default()
        }
    }

    pub fn to_body(&self) -> Result<Value, Error> {
        let mut body = Map::new();
        body.insert("Webpages".into(), Value::Array(self.webpages.clone()));
        body.extend(assemble(ADD_OPTIONS, &to_map(self)?));
        Ok(Value::Object(body))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DynamicTextAdTargetsQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub ids: Vec<i64>,
    pub ad_group_ids: Vec<i64>,
    pub campaign_ids: Vec<i64>,
    pub states: Vec<String>,
    #[serde(skip)]
    pub page: Option<Page>,
}

impl DynamicTextAdTargetsQuery {
    pub fn new<I, S>(field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_names: names(field_names),
            ..Self::default()
        }
    }

    pub fn to_body(&self) -> Result<Value, Error> {
        GET.body(self, &self.field_names, self.page)
    }
}

#[derive(Debug, Clone)]
pub struct DynamicTextAdTargets {
    endpoint: Endpoint,
}

impl DynamicTextAdTargets {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "Webpages", "dynamictextadtargets"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn add(&self, webpages: &NewWebpages) -> Result<Value, Error> {
        let body = webpages.to_body()?;
        self.endpoint.call("add", &body).await
    }

    pub async fn get(&self, query: &DynamicTextAdTargetsQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }

    pub async fn delete(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.delete(ids).await
    }

    pub async fn suspend(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.by_ids("suspend", ids).await
    }

    pub async fn resume(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.by_ids("resume", ids).await
    }

    pub async fn set_bids<T: Serialize + Sync>(&self, bids: &[T]) -> Result<Value, Error> {
        self.endpoint.call("setBids", &keyed("Bids", bids)?).await
    }
}
