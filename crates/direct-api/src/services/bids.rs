// Bids service

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{Endpoint, GetLayout, keyed, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &["keyword_ids", "ad_group_ids", "campaign_ids"],
    criteria: &["keyword_ids", "ad_group_ids", "campaign_ids", "serving_statuses"],
    sub_field_names: &[],
    default_limit: Page::DEFAULT_LIMIT,
    optional_criteria: false,
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct BidsQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub keyword_ids: Vec<i64>,
    pub ad_group_ids: Vec<i64>,
    pub campaign_ids: Vec<i64>,
    pub serving_statuses: Vec<String>,
    #[serde(skip)]
    pub page: Option<Page>,
}

impl BidsQuery {
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
pub struct Bids {
    endpoint: Endpoint,
}

impl Bids {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "Bids", "bids"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn get(&self, query: &BidsQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }

    pub async fn set<T: Serialize + Sync>(&self, bids: &[T]) -> Result<Value, Error> {
        self.endpoint.call("set", &keyed("Bids", bids)?).await
    }

    pub async fn set_auto<T: Serialize + Sync>(&self, bids: &[T]) -> Result<Value, Error> {
        self.endpoint.call("setAuto", &keyed("Bids", bids)?).await
    }
}
