// Retargeting lists service

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{Endpoint, GetLayout, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &[],
    criteria: &["ids", "types"],
    sub_field_names: &[],
    default_limit: Page::DEFAULT_LIMIT,
    optional_criteria: true,
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct RetargetingListsQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub ids: Vec<i64>,
    /// `RETARGETING` or `AUDIENCE`.
    pub types: Vec<String>,
    #[serde(skip)]
    pub page: Option<Page>,
}

impl RetargetingListsQuery {
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
pub struct RetargetingLists {
    endpoint: Endpoint,
}

impl RetargetingLists {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "RetargetingLists", "retargetinglists"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn add<T: Serialize + Sync>(&self, lists: &[T]) -> Result<Value, Error> {
        self.endpoint.add(lists).await
    }

    pub async fn update<T: Serialize + Sync>(&self, lists: &[T]) -> Result<Value, Error> {
        self.endpoint.update(lists).await
    }

    pub async fn get(&self, query: &RetargetingListsQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }

    pub async fn delete(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.delete(ids).await
    }
}
