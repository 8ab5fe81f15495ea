// Bid modifiers service

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{Endpoint, GetLayout, keyed, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &["ids", "campaign_ids", "ad_group_ids"],
    criteria: &["ids", "campaign_ids", "ad_group_ids", "types", "levels"],
    sub_field_names: &[
        "mobile_adjustment_field_names",
        "desktop_adjustment_field_names",
        "demographics_adjustment_field_names",
        "retargeting_adjustment_field_names",
        "regional_adjustment_field_names",
        "video_adjustment_field_names",
    ],
    default_limit: Page::DEFAULT_LIMIT,
    optional_criteria: false,
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct BidModifiersQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub ids: Vec<i64>,
    pub campaign_ids: Vec<i64>,
    pub ad_group_ids: Vec<i64>,
    pub types: Vec<String>,
    /// `CAMPAIGN` and/or `AD_GROUP`.
    pub levels: Vec<String>,

    pub mobile_adjustment_field_names: Vec<String>,
    pub desktop_adjustment_field_names: Vec<String>,
    pub demographics_adjustment_field_names: Vec<String>,
    pub retargeting_adjustment_field_names: Vec<String>,
    pub regional_adjustment_field_names: Vec<String>,
    pub video_adjustment_field_names: Vec<String>,

    #[serde(skip)]
    pub page: Option<Page>,
}

impl BidModifiersQuery {
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
pub struct BidModifiers {
    endpoint: Endpoint,
}

impl BidModifiers {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "BidModifiers", "bidmodifiers"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn add<T: Serialize + Sync>(&self, modifiers: &[T]) -> Result<Value, Error> {
        self.endpoint.add(modifiers).await
    }

    pub async fn get(&self, query: &BidModifiersQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }

    pub async fn delete(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.delete(ids).await
    }

    /// Change the value of existing modifiers.
    pub async fn set<T: Serialize + Sync>(&self, modifiers: &[T]) -> Result<Value, Error> {
        self.endpoint.call("set", &keyed("BidModifiers", modifiers)?).await
    }

    /// Enable or disable a whole adjustment set.
    pub async fn toggle<T: Serialize + Sync>(&self, items: &[T]) -> Result<Value, Error> {
        let body = keyed("BidModifierToggleItems", items)?;
        self.endpoint.call("toggle", &body).await
    }
}
