// Sitelinks service

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
    sub_field_names: &["sitelink_field_names"],
    default_limit: Page::DEFAULT_LIMIT,
    optional_criteria: true,
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct SitelinksQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub ids: Vec<i64>,
    /// Fields of the individual links inside each set.
    pub sitelink_field_names: Vec<String>,
    #[serde(skip)]
    pub page: Option<Page>,
}

impl SitelinksQuery {
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

/// Sitelink sets; add/get bodies use the `SitelinksSets` key.
#[derive(Debug, Clone)]
pub struct Sitelinks {
    endpoint: Endpoint,
}

impl Sitelinks {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "SitelinksSets", "sitelinks"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn add<T: Serialize + Sync>(&self, sets: &[T]) -> Result<Value, Error> {
        self.endpoint.add(sets).await
    }

    pub async fn get(&self, query: &SitelinksQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }

    pub async fn delete(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.delete(ids).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn sitelink_fields_without_selection() {
        let body = SitelinksQuery {
            sitelink_field_names: vec!["Title".into(), "Href".into()],
            page: Some(Page::with_limit(50)),
            ..SitelinksQuery::new(["Id"])
        }
        .to_body()
        .unwrap();
        assert_eq!(
            body,
            json!({
                "FieldNames": ["Id"],
                "Page": { "Limit": 50, "Offset": 0 },
                "SitelinkFieldNames": ["Title", "Href"],
            })
        );
    }
}
