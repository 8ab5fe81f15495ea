// Keywords research service

use std::sync::Arc;

use serde_json::{Map, Value, json};

use super::Endpoint;
use crate::error::Error;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct KeywordsResearch {
    endpoint: Endpoint,
}

impl KeywordsResearch {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "KeywordsResearch", "keywordsresearch"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Merge duplicates and add cross negatives. `operation` restricts which
    /// of `MERGE_DUPLICATES`, `ELIMINATE_OVERLAPPING` are applied.
    pub async fn deduplicate(
        &self,
        keywords: &[Value],
        operation: Option<&[&str]>,
    ) -> Result<Value, Error> {
        let body = deduplicate_body(keywords, operation);
        self.endpoint.call("deduplicate", &body).await
    }

    pub async fn has_search_volume(
        &self,
        field_names: &[&str],
        keywords: &[&str],
        region_ids: &[i64],
    ) -> Result<Value, Error> {
        let body = json!({
            "SelectionCriteria": { "Keywords": keywords, "RegionIds": region_ids },
            "FieldNames": field_names,
        });
        self.endpoint.call("hasSearchVolume", &body).await
    }
}

fn deduplicate_body(keywords: &[Value], operation: Option<&[&str]>) -> Value {
    let mut body = Map::new();
    body.insert("Keywords".into(), Value::Array(keywords.to_vec()));
    if let Some(operation) = operation {
        body.insert("Operation".into(), json!(operation));
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn operation_key_is_pascal_case() {
        let body = deduplicate_body(&[json!({ "Keyword": "shoes" })], Some(&["MERGE_DUPLICATES"][..]));
        assert_eq!(
            body,
            json!({ "Keywords": [{ "Keyword": "shoes" }], "Operation": ["MERGE_DUPLICATES"] })
        );
        let body = deduplicate_body(&[], None);
        assert_eq!(body, json!({ "Keywords": [] }));
    }
}
