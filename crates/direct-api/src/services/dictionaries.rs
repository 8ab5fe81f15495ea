// Dictionaries service

use std::sync::Arc;

use serde_json::{Value, json};

use super::Endpoint;
use crate::error::Error;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct Dictionaries {
    endpoint: Endpoint,
}

impl Dictionaries {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "Dictionaries", "dictionaries"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Reference data such as `Currencies`, `GeoRegions`, `TimeZones`.
    pub async fn get<S: AsRef<str>>(&self, dictionary_names: &[S]) -> Result<Value, Error> {
        let dictionary_names: Vec<&str> = dictionary_names.iter().map(AsRef::as_ref).collect();
        self.endpoint
            .get(&json!({ "DictionaryNames": dictionary_names }))
            .await
    }
}
