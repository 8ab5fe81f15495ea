// Creatives service

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
    sub_field_names: &[
        "video_extension_creative_field_names",
        "cpc_video_creative_field_names",
        "cpm_video_creative_field_names",
    ],
    default_limit: Page::DEFAULT_LIMIT,
    optional_criteria: false,
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreativesQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub ids: Vec<i64>,
    pub types: Vec<String>,
    pub video_extension_creative_field_names: Vec<String>,
    pub cpc_video_creative_field_names: Vec<String>,
    pub cpm_video_creative_field_names: Vec<String>,
    #[serde(skip)]
    pub page: Option<Page>,
}

impl CreativesQuery {
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

/// Read-only; creatives are made in the web UI.
#[derive(Debug, Clone)]
pub struct Creatives {
    endpoint: Endpoint,
}

impl Creatives {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "Creatives", "creatives"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn get(&self, query: &CreativesQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }
}
