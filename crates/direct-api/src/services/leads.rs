// Leads service

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{Endpoint, GetLayout, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &["turbo_page_ids"],
    criteria: &["turbo_page_ids", "date_time_from", "date_time_to"],
    sub_field_names: &[],
    default_limit: Page::DEFAULT_LIMIT,
    optional_criteria: false,
};

/// Arguments of `leads.get`: form submissions from turbo pages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadsQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub turbo_page_ids: Vec<i64>,
    /// `YYYY-MM-DDThh:mm:ssZ`
    pub date_time_from: Option<String>,
    pub date_time_to: Option<String>,
    #[serde(skip)]
    pub page: Option<Page>,
}

impl LeadsQuery {
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
pub struct Leads {
    endpoint: Endpoint,
}

impl Leads {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "Leads", "leads"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn get(&self, query: &LeadsQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }
}
