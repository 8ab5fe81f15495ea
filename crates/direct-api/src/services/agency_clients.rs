// Agency clients service
//
// Shares the `Clients` object key with the clients service; only the path
// differs.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{Endpoint, GetLayout, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &[],
    criteria: &["logins", "archived"],
    sub_field_names: &[],
    default_limit: 500,
    optional_criteria: false,
};

/// A client account to register under the agency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewClient {
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grants: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<Value>>,
}

impl NewClient {
    pub fn new(
        login: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            currency: currency.into(),
            grants: None,
            notification: None,
            settings: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AgencyClientsQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub logins: Vec<String>,
    /// `YES` or `NO`.
    pub archived: Option<String>,
    #[serde(skip)]
    pub page: Option<Page>,
}

impl AgencyClientsQuery {
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
pub struct AgencyClients {
    endpoint: Endpoint,
}

impl AgencyClients {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "Clients", "agencyclients"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Register one client; the body is the client itself, not a list.
    pub async fn add(&self, client: &NewClient) -> Result<Value, Error> {
        self.endpoint.call("add", client).await
    }

    pub async fn get(&self, query: &AgencyClientsQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }

    pub async fn update<T: Serialize + Sync>(&self, clients: &[T]) -> Result<Value, Error> {
        self.endpoint.update(clients).await
    }
}
