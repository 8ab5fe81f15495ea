// Ad extensions service

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{Endpoint, GetLayout, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &[],
    criteria: &["ids", "types", "states", "statuses", "modified_since"],
    sub_field_names: &["callout_field_names"],
    default_limit: 500,
    optional_criteria: false,
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct AdExtensionsQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub ids: Vec<i64>,
    pub types: Vec<String>,
    pub states: Vec<String>,
    pub statuses: Vec<String>,
    pub modified_since: Option<String>,
    pub callout_field_names: Vec<String>,
    #[serde(skip)]
    pub page: Option<Page>,
}

impl AdExtensionsQuery {
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
pub struct AdExtensions {
    endpoint: Endpoint,
}

impl AdExtensions {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "AdExtensions", "adextensions"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn add<T: Serialize + Sync>(&self, extensions: &[T]) -> Result<Value, Error> {
        self.endpoint.add(extensions).await
    }

    pub async fn get(&self, query: &AdExtensionsQuery) -> Result<Value, Error> {
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
    use serde_json::json;

    use super::*;

    #[test]
    fn callout_fields_sit_beside_field_names() {
        let body = AdExtensionsQuery {
            types: vec!["CALLOUT".into()],
            callout_field_names: vec!["CalloutText".into()],
            ..AdExtensionsQuery::new(["Id"])
        }
        .to_body()
        .unwrap();
        assert_eq!(body["SelectionCriteria"], json!({ "Types": ["CALLOUT"] }));
        assert_eq!(body["CalloutFieldNames"], json!(["CalloutText"]));
        assert_eq!(body["Page"]["Limit"], 500);
    }
}
