// Clients service

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};

use super::Endpoint;
use crate::error::Error;
use crate::transport::Transport;

/// The advertiser account the session acts as (or `Client-Login` names).
#[derive(Debug, Clone)]
pub struct Clients {
    endpoint: Endpoint,
}

impl Clients {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "Clients", "clients"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// No selection and no paging: the body is just `FieldNames`.
    pub async fn get<S: AsRef<str>>(&self, field_names: &[S]) -> Result<Value, Error> {
        let field_names: Vec<&str> = field_names.iter().map(AsRef::as_ref).collect();
        self.endpoint.get(&json!({ "FieldNames": field_names })).await
    }

    pub async fn update<T: Serialize + Sync>(&self, clients: &[T]) -> Result<Value, Error> {
        self.endpoint.update(clients).await
    }
}
