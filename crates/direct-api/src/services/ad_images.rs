// Ad images service
//
// Images are keyed by hash, not by numeric id, so `delete` builds its own
// selection instead of going through `Endpoint::delete`.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};

use super::{Endpoint, GetLayout, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &[],
    criteria: &["ad_image_hashes", "associated"],
    sub_field_names: &[],
    default_limit: 500,
    optional_criteria: false,
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct AdImagesQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub ad_image_hashes: Vec<String>,
    /// `YES` or `NO`.
    pub associated: Option<String>,
    #[serde(skip)]
    pub page: Option<Page>,
}

impl AdImagesQuery {
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
pub struct AdImages {
    endpoint: Endpoint,
}

impl AdImages {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "AdImages", "adimages"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn add<T: Serialize + Sync>(&self, images: &[T]) -> Result<Value, Error> {
        self.endpoint.add(images).await
    }

    pub async fn get(&self, query: &AdImagesQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }

    pub async fn delete<S: AsRef<str>>(&self, hashes: &[S]) -> Result<Value, Error> {
        let hashes: Vec<&str> = hashes.iter().map(AsRef::as_ref).collect();
        let body = json!({ "SelectionCriteria": { "AdImageHashes": hashes } });
        self.endpoint.call("delete", &body).await
    }
}
