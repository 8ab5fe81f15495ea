// Reports service

use std::sync::Arc;

use crate::error::Error;
use crate::report::{ReportPoller, ReportRequest};
use crate::transport::Transport;

/// Statistics reports, returned as the raw text the server produced
/// (TSV unless the request says otherwise).
#[derive(Debug, Clone)]
pub struct Reports {
    poller: ReportPoller,
}

impl Reports {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            poller: ReportPoller::new(transport),
        }
    }

    /// Submit `request` and wait until the report is ready.
    pub async fn get(&self, request: &ReportRequest) -> Result<String, Error> {
        self.poller.fetch(request).await
    }
}
