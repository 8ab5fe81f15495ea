// Campaigns service

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{Endpoint, GetLayout, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &[],
    criteria: &["ids", "types", "states", "statuses", "statuses_payment"],
    sub_field_names: &[
        "text_campaign_field_names",
        "mobile_app_campaign_field_names",
        "dynamic_text_campaign_field_names",
        "cpm_banner_campaign_field_names",
        "smart_campaign_field_names",
        "unified_campaign_field_names",
    ],
    default_limit: 1_000,
    optional_criteria: false,
};

/// Arguments of `campaigns.get`. No filter is required; an empty
/// `SelectionCriteria` returns every campaign of the account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignsQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub ids: Vec<i64>,
    pub types: Vec<String>,
    pub states: Vec<String>,
    pub statuses: Vec<String>,
    pub statuses_payment: Vec<String>,

    pub text_campaign_field_names: Vec<String>,
    pub mobile_app_campaign_field_names: Vec<String>,
    pub dynamic_text_campaign_field_names: Vec<String>,
    pub cpm_banner_campaign_field_names: Vec<String>,
    pub smart_campaign_field_names: Vec<String>,
    pub unified_campaign_field_names: Vec<String>,

    /// Defaults to `Limit: 1000`.
    #[serde(skip)]
    pub page: Option<Page>,
}

impl CampaignsQuery {
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
pub struct Campaigns {
    endpoint: Endpoint,
}

impl Campaigns {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "Campaigns", "campaigns"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn add<T: Serialize + Sync>(&self, campaigns: &[T]) -> Result<Value, Error> {
        self.endpoint.add(campaigns).await
    }

    pub async fn update<T: Serialize + Sync>(&self, campaigns: &[T]) -> Result<Value, Error> {
        self.endpoint.update(campaigns).await
    }

    pub async fn get(&self, query: &CampaignsQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }

    pub async fn delete(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.delete(ids).await
    }

    pub async fn archive(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.by_ids("archive", ids).await
    }

    pub async fn unarchive(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.by_ids("unarchive", ids).await
    }

    pub async fn suspend(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.by_ids("suspend", ids).await
    }

    pub async fn resume(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.by_ids("resume", ids).await
    }
}
