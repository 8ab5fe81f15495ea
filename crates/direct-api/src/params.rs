// Request parameter assembly
//
// Façade arguments are snake_case Rust names; the API wants CamelCase keys
// and rejects empty filters. Everything here is pure and allocation-only.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Error;

/// Translate a snake_case logical name into the API's CamelCase field name.
///
/// `modify_since` → `ModifySince`, `id` → `Id`, `v_card_ids` → `VCardIds`.
pub fn convert(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split('_') {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Whether a caller-supplied value should be sent at all.
///
/// Absence and emptiness are excluded; `0` and `false` are legitimate values.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Build a mapping of converted names to values for every present field.
///
/// Iterates `fields` in order, so the output is deterministic.
pub fn assemble(fields: &[&str], values: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|field| {
            values
                .get(*field)
                .filter(|v| is_present(v))
                .map(|v| (convert(field), v.clone()))
        })
        .collect()
}

/// Fail with [`Error::Parameter`] unless at least one of `group` is present.
pub fn require_one_of(group: &[&'static str], values: &Map<String, Value>) -> Result<(), Error> {
    if group
        .iter()
        .any(|field| values.get(*field).is_some_and(is_present))
    {
        Ok(())
    } else {
        Err(Error::Parameter {
            params: group.to_vec(),
        })
    }
}

/// Serialize a query struct into the logical-name mapping `assemble` reads.
pub(crate) fn to_map<T: Serialize>(query: &T) -> Result<Map<String, Value>, Error> {
    match serde_json::to_value(query)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::Deserialization {
            message: "query must serialize to a JSON object".into(),
            body: other.to_string(),
        }),
    }
}

// ── Paging ───────────────────────────────────────────────────────────

/// `Page` block of a `get` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    /// Default limit for most services.
    pub const DEFAULT_LIMIT: u32 = 10_000;

    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    pub fn with_limit(limit: u32) -> Self {
        Self { limit, offset: 0 }
    }

    /// The page after this one.
    pub fn next(self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset.saturating_add(self.limit),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }
}

// ── Body builder ─────────────────────────────────────────────────────

/// Shared shape of every filtered `get` body.
///
/// `SelectionCriteria`, then `FieldNames`, then `Page`, then any sub-entity
/// field-name groups merged at the top level.
pub(crate) struct GetBody {
    body: Map<String, Value>,
}

impl GetBody {
    pub(crate) fn new(criteria: Map<String, Value>, field_names: &[String]) -> Self {
        let mut body = Map::new();
        body.insert("SelectionCriteria".into(), Value::Object(criteria));
        body.insert("FieldNames".into(), Value::from(field_names.to_vec()));
        Self { body }
    }

    /// Same as [`new`](Self::new), but drops `SelectionCriteria` when empty.
    pub(crate) fn optional_criteria(criteria: Map<String, Value>, field_names: &[String]) -> Self {
        let mut this = Self::new(criteria, field_names);
        if this
            .body
            .get("SelectionCriteria")
            .is_some_and(|v| !is_present(v))
        {
            this.body.remove("SelectionCriteria");
        }
        this
    }

    pub(crate) fn page(mut self, page: Page) -> Result<Self, Error> {
        self.body.insert("Page".into(), serde_json::to_value(page)?);
        Ok(self)
    }

    pub(crate) fn merge(mut self, extra: Map<String, Value>) -> Self {
        self.body.extend(extra);
        self
    }

    pub(crate) fn build(self) -> Value {
        Value::Object(self.body)
    }
}
