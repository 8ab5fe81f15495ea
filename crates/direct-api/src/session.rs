// Session identity
//
// The identity headers (token, locale, client login) live in one immutable
// snapshot. Setters publish a new snapshot with a bumped version; every
// request loads exactly one snapshot, so its headers never mix versions.

use std::sync::Arc;

use arc_swap::ArcSwap;
use secrecy::SecretString;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Language of server messages, sent as `Accept-Language`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    #[default]
    Ru,
    En,
    Tr,
    Uk,
}

/// Who is calling and on whose behalf.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub access_token: SecretString,
    /// Advertiser login for agency accounts (`Client-Login`).
    pub client_login: Option<String>,
    pub locale: Locale,
    /// Opaque; kept for the caller's refresh flow, never sent.
    pub refresh_token: Option<SecretString>,
    /// Charge API points to the agency instead of the advertiser.
    pub use_operator_units: bool,
    version: u64,
}

impl SessionIdentity {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            client_login: None,
            locale: Locale::default(),
            refresh_token: None,
            use_operator_units: false,
            version: 0,
        }
    }

    pub fn with_client_login(mut self, login: impl Into<String>) -> Self {
        self.client_login = Some(login.into());
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(SecretString::from(token.into()));
        self
    }

    pub fn with_operator_units(mut self, enabled: bool) -> Self {
        self.use_operator_units = enabled;
        self
    }

    /// Monotonic counter, bumped by every [`SessionStore`] update.
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Shared, atomically swapped holder of the current [`SessionIdentity`].
#[derive(Debug)]
pub struct SessionStore {
    current: ArcSwap<SessionIdentity>,
}

impl SessionStore {
    pub fn new(identity: SessionIdentity) -> Self {
        Self {
            current: ArcSwap::from_pointee(identity),
        }
    }

    /// The snapshot a request should build its headers from.
    pub fn snapshot(&self) -> Arc<SessionIdentity> {
        self.current.load_full()
    }

    /// Apply `f` to a copy of the current identity and publish it.
    ///
    /// Concurrent updates are serialised by `rcu`; none is lost.
    pub fn update(&self, f: impl Fn(&mut SessionIdentity)) -> u64 {
        let published = self.current.rcu(|cur| {
            let mut next = SessionIdentity::clone(cur);
            f(&mut next);
            next.version = cur.version.wrapping_add(1);
            next
        });
        // rcu returns the value it replaced
        published.version.wrapping_add(1)
    }
}
