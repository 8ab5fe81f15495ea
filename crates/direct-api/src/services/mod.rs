// Service façades
//
// One struct per API service. Each composes an `Endpoint`, which carries the
// shared verbs (add/update/get/delete and the by-ids status changes), and
// adds its own query type and custom verbs on top.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::Error;
use crate::params::{GetBody, Page, assemble, require_one_of, to_map};
use crate::transport::Transport;

pub mod ad_extensions;
pub mod ad_groups;
pub mod ad_images;
pub mod ads;
pub mod agency_clients;
pub mod audience_targets;
pub mod bid_modifiers;
pub mod bids;
pub mod campaigns;
pub mod changes;
pub mod clients;
pub mod creatives;
pub mod dictionaries;
pub mod dynamic_text_ad_targets;
pub mod keyword_bids;
pub mod keywords;
pub mod keywords_research;
pub mod leads;
pub mod negative_keyword_shared_sets;
pub mod reports;
pub mod retargeting_lists;
pub mod sitelinks;
pub mod turbo_pages;
pub mod vcards;

pub use ad_extensions::{AdExtensions, AdExtensionsQuery};
pub use ad_groups::{AdGroups, AdGroupsQuery};
pub use ad_images::{AdImages, AdImagesQuery};
pub use ads::{Ads, AdsQuery};
pub use agency_clients::{AgencyClients, AgencyClientsQuery, NewClient};
pub use audience_targets::{AudienceTargets, AudienceTargetsQuery};
pub use bid_modifiers::{BidModifiers, BidModifiersQuery};
pub use bids::{Bids, BidsQuery};
pub use campaigns::{Campaigns, CampaignsQuery};
pub use changes::{Changes, ChangesQuery};
pub use clients::Clients;
pub use creatives::{Creatives, CreativesQuery};
pub use dictionaries::Dictionaries;
pub use dynamic_text_ad_targets::{DynamicTextAdTargets, DynamicTextAdTargetsQuery, NewWebpages};
pub use keyword_bids::{KeywordBids, KeywordBidsQuery};
pub use keywords::{Keywords, KeywordsQuery};
pub use keywords_research::KeywordsResearch;
pub use leads::{Leads, LeadsQuery};
pub use negative_keyword_shared_sets::{NegativeKeywordSharedSets, NegativeKeywordSharedSetsQuery};
pub use reports::Reports;
pub use retargeting_lists::{RetargetingLists, RetargetingListsQuery};
pub use sitelinks::{Sitelinks, SitelinksQuery};
pub use turbo_pages::{TurboPages, TurboPagesQuery};
pub use vcards::{VCards, VCardsQuery};

/// Binding of one service to the shared transport.
///
/// `object_key` names the list in add/update bodies (`{"Ads": [...]}`);
/// `path` is the URL segment under the API root (`ads`).
#[derive(Debug, Clone)]
pub struct Endpoint {
    transport: Arc<Transport>,
    object_key: &'static str,
    path: &'static str,
}

impl Endpoint {
    pub(crate) fn new(transport: Arc<Transport>, object_key: &'static str, path: &'static str) -> Self {
        Self {
            transport,
            object_key,
            path,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn object_key(&self) -> &'static str {
        self.object_key
    }

    /// Invoke any verb with a prepared body.
    pub async fn call<B: Serialize + Sync + ?Sized>(&self, verb: &str, body: &B) -> Result<Value, Error> {
        debug!(service = self.path, verb, "calling service");
        self.transport.send(self.path, verb, body).await
    }

    /// `add` with `{<ObjectKey>: objects}`.
    pub async fn add<T: Serialize + Sync>(&self, objects: &[T]) -> Result<Value, Error> {
        self.call("add", &self.wrap(objects)?).await
    }

    /// `update` with `{<ObjectKey>: objects}`.
    pub async fn update<T: Serialize + Sync>(&self, objects: &[T]) -> Result<Value, Error> {
        self.call("update", &self.wrap(objects)?).await
    }

    pub async fn get(&self, body: &Value) -> Result<Value, Error> {
        self.call("get", body).await
    }

    /// Any verb whose only argument is `SelectionCriteria.Ids`.
    pub async fn by_ids(&self, verb: &str, ids: &[i64]) -> Result<Value, Error> {
        let body = json!({ "SelectionCriteria": { "Ids": ids } });
        self.call(verb, &body).await
    }

    pub async fn delete(&self, ids: &[i64]) -> Result<Value, Error> {
        self.by_ids("delete", ids).await
    }

    fn wrap<T: Serialize>(&self, objects: &[T]) -> Result<Value, Error> {
        keyed(self.object_key, objects)
    }
}

/// `{key: value}`, failing instead of panicking when `value` cannot be
/// serialised.
pub(crate) fn keyed<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Value, Error> {
    let mut body = Map::new();
    body.insert(key.to_owned(), serde_json::to_value(value)?);
    Ok(Value::Object(body))
}

// ── Filtered get ─────────────────────────────────────────────────────

/// Static description of a service's filtered `get`.
///
/// Field lists hold the snake_case names of the query struct's fields.
pub(crate) struct GetLayout {
    /// At least one of these must be non-empty; empty slice means no check.
    pub(crate) required: &'static [&'static str],
    /// Keys of `SelectionCriteria`.
    pub(crate) criteria: &'static [&'static str],
    /// Sub-type field-name lists, merged at the top level of the body.
    pub(crate) sub_field_names: &'static [&'static str],
    pub(crate) default_limit: u32,
    /// Omit `SelectionCriteria` entirely when no filter is set.
    pub(crate) optional_criteria: bool,
}

impl GetLayout {
    pub(crate) fn body<Q: Serialize>(
        &self,
        query: &Q,
        field_names: &[String],
        page: Option<Page>,
    ) -> Result<Value, Error> {
        let values = to_map(query)?;
        if !self.required.is_empty() {
            require_one_of(self.required, &values)?;
        }

        let criteria = assemble(self.criteria, &values);
        let body = if self.optional_criteria {
            GetBody::optional_criteria(criteria, field_names)
        } else {
            GetBody::new(criteria, field_names)
        };

        Ok(body
            .page(page.unwrap_or(Page::with_limit(self.default_limit)))?
            .merge(assemble(self.sub_field_names, &values))
            .build())
    }
}

/// Collect field names from anything string-like.
pub(crate) fn names<I, S>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fields.into_iter().map(Into::into).collect()
}
