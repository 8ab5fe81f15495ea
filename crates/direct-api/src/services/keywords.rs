// Keywords service

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{Endpoint, GetLayout, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &["ids", "ad_group_ids", "campaign_ids"],
    criteria: &[
        "ids",
        "ad_group_ids",
        "campaign_ids",
        "states",
        "statuses",
        "serving_statuses",
        "modified_since",
    ],
    sub_field_names: &[],
    default_limit: Page::DEFAULT_LIMIT,
    optional_criteria: false,
};

/// Arguments of `keywords.get`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeywordsQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub ids: Vec<i64>,
    pub ad_group_ids: Vec<i64>,
    pub campaign_ids: Vec<i64>,
    pub states: Vec<String>,
    pub statuses: Vec<String>,
    pub serving_statuses: Vec<String>,
    /// `YYYY-MM-DDThh:mm:ssZ`
    pub modified_since: Option<String>,
    #[serde(skip)]
    pub page: Option<Page>,
}

impl KeywordsQuery {
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
pub struct Keywords {
    endpoint: Endpoint,
}

impl Keywords {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "Keywords", "keywords"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn add<T: Serialize + Sync>(&self, keywords: &[T]) -> Result<Value, Error> {
        self.endpoint.add(keywords).await
    }

    pub async fn update<T: Serialize + Sync>(&self, keywords: &[T]) -> Result<Value, Error> {
        self.endpoint.update(keywords).await
    }

    pub async fn get(&self, query: &KeywordsQuery) -> Result<Value, Error> {
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
}
