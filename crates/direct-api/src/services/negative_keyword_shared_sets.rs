// Negative keyword shared sets service

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{Endpoint, GetLayout, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &[],
    criteria: &["ids"],
    sub_field_names: &[],
    default_limit: Page::DEFAULT_LIMIT,
    optional_criteria: true,
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct NegativeKeywordSharedSetsQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub ids: Vec<i64>,
    #[serde(skip)]
    pub page: Option<Page>,
}

impl NegativeKeywordSharedSetsQuery {
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
pub struct NegativeKeywordSharedSets {
    endpoint: Endpoint,
}

impl NegativeKeywordSharedSets {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "NegativeKeywordSharedSets", "negativekeywordsharedsets"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn add<T: Serialize + Sync>(&self, sets: &[T]) -> Result<Value, Error> {
        self.endpoint.add(sets).await
    }

    pub async fn update<T: Serialize + Sync>(&self, sets: &[T]) -> Result<Value, Error> {
        self.endpoint.update(sets).await
    }

    pub async fn get(&self, query: &NegativeKeywordSharedSetsQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }

    pub async fn delete(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.delete(ids).await
    }
}
