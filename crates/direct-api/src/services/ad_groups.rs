// Ad groups service

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{Endpoint, GetLayout, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &["ids", "campaign_ids"],
    criteria: &[
        "campaign_ids",
        "ids",
        "types",
        "statuses",
        "serving_statuses",
        "app_icon_statuses",
        "negative_keyword_shared_set_ids",
    ],
    sub_field_names: &[
        "mobile_app_ad_group_field_names",
        "dynamic_text_ad_group_field_names",
        "dynamic_text_feed_ad_group_field_names",
        "smart_ad_group_field_names",
    ],
    default_limit: 500,
    optional_criteria: false,
};

/// Arguments of `adgroups.get`. Requires `ids` or `campaign_ids`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdGroupsQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub campaign_ids: Vec<i64>,
    pub ids: Vec<i64>,
    pub types: Vec<String>,
    pub statuses: Vec<String>,
    pub serving_statuses: Vec<String>,
    pub app_icon_statuses: Vec<String>,
    pub negative_keyword_shared_set_ids: Vec<i64>,

    pub mobile_app_ad_group_field_names: Vec<String>,
    pub dynamic_text_ad_group_field_names: Vec<String>,
    pub dynamic_text_feed_ad_group_field_names: Vec<String>,
    pub smart_ad_group_field_names: Vec<String>,

    #[serde(skip)]
    pub page: Option<Page>,
}

impl AdGroupsQuery {
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
pub struct AdGroups {
    endpoint: Endpoint,
}

impl AdGroups {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "AdGroups", "adgroups"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn add<T: Serialize + Sync>(&self, ad_groups: &[T]) -> Result<Value, Error> {
        self.endpoint.add(ad_groups).await
    }

    pub async fn update<T: Serialize + Sync>(&self, ad_groups: &[T]) -> Result<Value, Error> {
        self.endpoint.update(ad_groups).await
    }

    pub async fn get(&self, query: &AdGroupsQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }

    pub async fn delete(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.delete(ids).await
    }
}
