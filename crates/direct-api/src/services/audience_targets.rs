// Audience targets service

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{Endpoint, GetLayout, keyed, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &["ids", "ad_group_ids", "campaign_ids"],
    criteria: &[
        "ids",
        "ad_group_ids",
        "campaign_ids",
        "retargeting_list_ids",
        "interest_ids",
        "states",
    ],
    sub_field_names: &[],
    default_limit: Page::DEFAULT_LIMIT,
    optional_criteria: false,
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct AudienceTargetsQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub ids: Vec<i64>,
    pub ad_group_ids: Vec<i64>,
    pub campaign_ids: Vec<i64>,
    pub retargeting_list_ids: Vec<i64>,
    pub interest_ids: Vec<i64>,
    pub states: Vec<String>,
    #[serde(skip)]
    pub page: Option<Page>,
}

impl AudienceTargetsQuery {
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
pub struct AudienceTargets {
    endpoint: Endpoint,
}

impl AudienceTargets {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "AudienceTargets", "audiencetargets"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn add<T: Serialize + Sync>(&self, targets: &[T]) -> Result<Value, Error> {
        self.endpoint.add(targets).await
    }

    pub async fn get(&self, query: &AudienceTargetsQuery) -> Result<Value, Error> {
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
