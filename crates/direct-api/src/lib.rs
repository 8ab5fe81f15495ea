// direct-api: Async Rust client for the Yandex Direct API v5

pub mod client;
pub mod error;
pub mod params;
pub mod report;
pub mod services;
pub mod session;
pub mod transport;

pub use client::{DirectClient, DirectClientBuilder};
pub use error::{ApiError, Error};
pub use params::{Page, assemble, convert, require_one_of};
pub use report::{PollPolicy, ProcessingMode, ReportHeaders, ReportPoller, ReportRequest};
pub use session::{Locale, SessionIdentity, SessionStore};
pub use transport::{ApiEndpoint, Transport, TransportConfig};
