// Ads service
//
// Full verb set: add/update/get/delete plus the moderation and lifecycle
// status changes, all of which take a plain id list.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{Endpoint, GetLayout, names};
use crate::error::Error;
use crate::params::Page;
use crate::transport::Transport;

const GET: GetLayout = GetLayout {
    required: &["ids", "ad_group_ids", "campaign_ids"],
    criteria: &[
        "ids",
        "campaign_ids",
        "ad_group_ids",
        "states",
        "statuses",
        "types",
        "mobile",
        "v_card_ids",
        "sitelink_set_ids",
        "ad_image_hashes",
        "v_card_moderation_statuses",
        "sitelink_moderation_statuses",
        "ad_image_moderation_statuses",
        "ad_extension_ids",
    ],
    sub_field_names: &[
        "text_ad_field_names",
        "text_ad_price_extension_field_names",
        "mobile_app_ad_field_names",
        "dynamic_text_ad_field_names",
        "text_image_ad_field_names",
        "mobile_app_image_ad_field_names",
        "text_ad_builder_ad_field_names",
        "mobile_app_ad_builder_ad_field_names",
        "cpc_video_ad_builder_ad_field_names",
        "cpm_banner_ad_builder_ad_field_names",
        "cpm_video_ad_builder_ad_field_names",
    ],
    default_limit: Page::DEFAULT_LIMIT,
    optional_criteria: false,
};

/// Arguments of `ads.get`.
///
/// At least one of `ids`, `ad_group_ids`, `campaign_ids` must be set.
/// Empty vectors and `None` are left out of the request.
///
/// ```
/// use direct_api::services::AdsQuery;
///
/// let query = AdsQuery {
///     campaign_ids: vec![42],
///     states: vec!["ON".into()],
///     ..AdsQuery::new(["Id", "State"])
/// };
/// assert!(query.to_body().is_ok());
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdsQuery {
    #[serde(skip)]
    pub field_names: Vec<String>,
    pub ids: Vec<i64>,
    pub campaign_ids: Vec<i64>,
    pub ad_group_ids: Vec<i64>,
    pub states: Vec<String>,
    pub statuses: Vec<String>,
    pub types: Vec<String>,
    /// `YES` or `NO`.
    pub mobile: Option<String>,
    pub v_card_ids: Vec<i64>,
    pub sitelink_set_ids: Vec<i64>,
    pub ad_image_hashes: Vec<String>,
    pub v_card_moderation_statuses: Vec<String>,
    pub sitelink_moderation_statuses: Vec<String>,
    pub ad_image_moderation_statuses: Vec<String>,
    pub ad_extension_ids: Vec<i64>,

    pub text_ad_field_names: Vec<String>,
    pub text_ad_price_extension_field_names: Vec<String>,
    pub mobile_app_ad_field_names: Vec<String>,
    pub dynamic_text_ad_field_names: Vec<String>,
    pub text_image_ad_field_names: Vec<String>,
    pub mobile_app_image_ad_field_names: Vec<String>,
    pub text_ad_builder_ad_field_names: Vec<String>,
    pub mobile_app_ad_builder_ad_field_names: Vec<String>,
    pub cpc_video_ad_builder_ad_field_names: Vec<String>,
    pub cpm_banner_ad_builder_ad_field_names: Vec<String>,
    pub cpm_video_ad_builder_ad_field_names: Vec<String>,

    /// Defaults to `Limit: 10000, Offset: 0`.
    #[serde(skip)]
    pub page: Option<Page>,
}

impl AdsQuery {
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

    /// The `params` block sent to `ads.get`.
    pub fn to_body(&self) -> Result<Value, Error> {
        GET.body(self, &self.field_names, self.page)
    }
}

#[derive(Debug, Clone)]
pub struct Ads {
    endpoint: Endpoint,
}

impl Ads {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            endpoint: Endpoint::new(transport, "Ads", "ads"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn add<T: Serialize + Sync>(&self, ads: &[T]) -> Result<Value, Error> {
        self.endpoint.add(ads).await
    }

    pub async fn update<T: Serialize + Sync>(&self, ads: &[T]) -> Result<Value, Error> {
        self.endpoint.update(ads).await
    }

    /// Fails with [`Error::Parameter`] before any request if no id filter is set.
    pub async fn get(&self, query: &AdsQuery) -> Result<Value, Error> {
        let body = query.to_body()?;
        self.endpoint.get(&body).await
    }

    pub async fn delete(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.delete(ids).await
    }

    pub async fn archive(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.by_ids("archive", ids).await
    }

    pub async fn unarchive(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.by_ids("unarchive", ids).await
    }

    pub async fn suspend(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.by_ids("suspend", ids).await
    }

    pub async fn resume(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.by_ids("resume", ids).await
    }

    /// Send drafts to moderation.
    pub async fn moderate(&self, ids: &[i64]) -> Result<Value, Error> {
        self.endpoint.by_ids("moderate", ids).await
    }
}
