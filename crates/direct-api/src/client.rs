// Client: composition root holding the session, the transport and one
// façade per service.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;

use crate::error::Error;
use crate::report::PollPolicy;
use crate::services::{
    AdExtensions, AdGroups, AdImages, Ads, AgencyClients, AudienceTargets, BidModifiers, Bids,
    Campaigns, Changes, Clients, Creatives, Dictionaries, DynamicTextAdTargets, KeywordBids,
    Keywords, KeywordsResearch, Leads, NegativeKeywordSharedSets, Reports, RetargetingLists,
    Sitelinks, TurboPages, VCards,
};
use crate::session::{Locale, SessionIdentity, SessionStore};
use crate::transport::{ApiEndpoint, Transport, TransportConfig};

/// Async client for the Direct API v5.
///
/// Every service is a public field sharing one transport, so a session
/// change through any setter applies to all of them from the next request on.
///
/// ```no_run
/// # async fn run() -> Result<(), direct_api::Error> {
/// use direct_api::DirectClient;
/// use direct_api::services::CampaignsQuery;
///
/// let client = DirectClient::builder("oauth-token")
///     .client_login("advertiser")
///     .sandbox()
///     .build()?;
/// let campaigns = client.campaigns.get(&CampaignsQuery::new(["Id", "Name"])).await?;
/// println!("{campaigns}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DirectClient {
    session: Arc<SessionStore>,
    transport: Arc<Transport>,

    pub agency_clients: AgencyClients,
    pub ad_extensions: AdExtensions,
    pub ad_groups: AdGroups,
    pub ad_images: AdImages,
    pub ads: Ads,
    pub audience_targets: AudienceTargets,
    pub bids: Bids,
    pub bid_modifiers: BidModifiers,
    pub campaigns: Campaigns,
    pub changes: Changes,
    pub clients: Clients,
    pub creatives: Creatives,
    pub dictionaries: Dictionaries,
    pub dynamic_text_ad_targets: DynamicTextAdTargets,
    pub keyword_bids: KeywordBids,
    pub keywords: Keywords,
    pub keywords_research: KeywordsResearch,
    pub leads: Leads,
    pub negative_keyword_shared_sets: NegativeKeywordSharedSets,
    pub reports: Reports,
    pub retargeting_lists: RetargetingLists,
    pub sitelinks: Sitelinks,
    pub turbo_pages: TurboPages,
    pub vcards: VCards,
}

impl DirectClient {
    pub fn new(identity: SessionIdentity, config: &TransportConfig) -> Result<Self, Error> {
        let session = Arc::new(SessionStore::new(identity));
        let transport = Arc::new(Transport::new(config, Arc::clone(&session))?);
        debug!(base_url = %transport.base_url(), "direct client ready");
        Ok(Self::from_transport(session, transport))
    }

    /// Reuse an existing `reqwest::Client` (proxies, custom TLS roots).
    pub fn with_http_client(
        http: reqwest::Client,
        identity: SessionIdentity,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        let session = Arc::new(SessionStore::new(identity));
        let transport = Arc::new(Transport::with_client(http, config, Arc::clone(&session))?);
        Ok(Self::from_transport(session, transport))
    }

    pub fn builder(access_token: impl Into<String>) -> DirectClientBuilder {
        DirectClientBuilder::new(access_token)
    }

    fn from_transport(session: Arc<SessionStore>, transport: Arc<Transport>) -> Self {
        let t = &transport;
        Self {
            agency_clients: AgencyClients::new(Arc::clone(t)),
            ad_extensions: AdExtensions::new(Arc::clone(t)),
            ad_groups: AdGroups::new(Arc::clone(t)),
            ad_images: AdImages::new(Arc::clone(t)),
            ads: Ads::new(Arc::clone(t)),
            audience_targets: AudienceTargets::new(Arc::clone(t)),
            bids: Bids::new(Arc::clone(t)),
            bid_modifiers: BidModifiers::new(Arc::clone(t)),
            campaigns: Campaigns::new(Arc::clone(t)),
            changes: Changes::new(Arc::clone(t)),
            clients: Clients::new(Arc::clone(t)),
            creatives: Creatives::new(Arc::clone(t)),
            dictionaries: Dictionaries::new(Arc::clone(t)),
            dynamic_text_ad_targets: DynamicTextAdTargets::new(Arc::clone(t)),
            keyword_bids: KeywordBids::new(Arc::clone(t)),
            keywords: Keywords::new(Arc::clone(t)),
            keywords_research: KeywordsResearch::new(Arc::clone(t)),
            leads: Leads::new(Arc::clone(t)),
            negative_keyword_shared_sets: NegativeKeywordSharedSets::new(Arc::clone(t)),
            reports: Reports::new(Arc::clone(t)),
            retargeting_lists: RetargetingLists::new(Arc::clone(t)),
            sitelinks: Sitelinks::new(Arc::clone(t)),
            turbo_pages: TurboPages::new(Arc::clone(t)),
            vcards: VCards::new(Arc::clone(t)),
            session,
            transport,
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ── Session setters ──────────────────────────────────────────────
    //
    // Each returns the new session version.

    pub fn set_access_token(&self, token: impl Into<String>) -> u64 {
        let token = SecretString::from(token.into());
        self.session.update(|s| s.access_token = token.clone())
    }

    pub fn set_client_login(&self, login: Option<&str>) -> u64 {
        self.session
            .update(|s| s.client_login = login.map(str::to_owned))
    }

    pub fn set_locale(&self, locale: Locale) -> u64 {
        self.session.update(|s| s.locale = locale)
    }

    pub fn set_refresh_token(&self, token: Option<&str>) -> u64 {
        self.session
            .update(|s| s.refresh_token = token.map(|t| SecretString::from(t.to_owned())))
    }

    pub fn set_use_operator_units(&self, enabled: bool) -> u64 {
        self.session.update(|s| s.use_operator_units = enabled)
    }

    // ── Session getters ──────────────────────────────────────────────

    pub fn access_token(&self) -> SecretString {
        self.session.snapshot().access_token.clone()
    }

    pub fn client_login(&self) -> Option<String> {
        self.session.snapshot().client_login.clone()
    }

    pub fn locale(&self) -> Locale {
        self.session.snapshot().locale
    }

    pub fn refresh_token(&self) -> Option<SecretString> {
        self.session.snapshot().refresh_token.clone()
    }

    pub fn session_version(&self) -> u64 {
        self.session.snapshot().version()
    }
}

// ── Builder ──────────────────────────────────────────────────────────

/// Step-by-step construction of a [`DirectClient`].
#[derive(Debug, Clone)]
pub struct DirectClientBuilder {
    identity: SessionIdentity,
    config: TransportConfig,
}

impl DirectClientBuilder {
    fn new(access_token: impl Into<String>) -> Self {
        Self {
            identity: SessionIdentity::new(access_token),
            config: TransportConfig::default(),
        }
    }

    pub fn client_login(mut self, login: impl Into<String>) -> Self {
        self.identity = self.identity.with_client_login(login);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.identity = self.identity.with_locale(locale);
        self
    }

    pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
        self.identity = self.identity.with_refresh_token(token);
        self
    }

    pub fn use_operator_units(mut self, enabled: bool) -> Self {
        self.identity = self.identity.with_operator_units(enabled);
        self
    }

    pub fn sandbox(mut self) -> Self {
        self.config = self.config.with_endpoint(ApiEndpoint::Sandbox);
        self
    }

    /// Any API root, e.g. a mock server in tests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(url);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    pub fn report_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_report_timeout(timeout);
        self
    }

    pub fn poll_policy(mut self, poll: PollPolicy) -> Self {
        self.config = self.config.with_poll_policy(poll);
        self
    }

    pub fn build(self) -> Result<DirectClient, Error> {
        DirectClient::new(self.identity, &self.config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn builder_applies_identity_and_endpoint() {
        let client = DirectClient::builder("T1")
            .client_login("advertiser")
            .locale(Locale::En)
            .sandbox()
            .build()
            .unwrap();
        assert_eq!(client.client_login().as_deref(), Some("advertiser"));
        assert_eq!(client.locale(), Locale::En);
        assert_eq!(
            client.transport().base_url().as_str(),
            "https://api-sandbox.direct.yandex.com/json/v5/"
        );
    }

    #[test]
    fn setters_bump_version() {
        let client = DirectClient::builder("T1").build().unwrap();
        assert_eq!(client.session_version(), 0);
        assert_eq!(client.set_access_token("T2"), 1);
        assert_eq!(client.set_client_login(Some("c")), 2);
        assert_eq!(client.set_client_login(None), 3);
        assert_eq!(client.access_token().expose_secret(), "T2");
        assert!(client.client_login().is_none());
    }

    #[test]
    fn invalid_base_url_fails_to_build() {
        let err = DirectClient::builder("T").base_url("not a url").build().unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn services_share_one_transport() {
        let client = DirectClient::builder("T").build().unwrap();
        assert_eq!(client.ads.endpoint().path(), "ads");
        assert_eq!(client.sitelinks.endpoint().object_key(), "SitelinksSets");
        assert_eq!(client.dynamic_text_ad_targets.endpoint().object_key(), "Webpages");
        assert_eq!(Arc::strong_count(&client.transport), 25);
    }
}
