//! Per-call knobs for the fetcher.

use crate::cancel::CancelToken;
use crate::config::FetchConfig;
use std::time::Duration;

/// Options for one fetch. `Default` matches a plain GET: follow up to 10
/// redirects, 30s connect timeout, no overall deadline, no cancellation.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Option<Duration>,
    /// Overall deadline for the whole transfer.
    pub timeout: Option<Duration>,
    pub follow_redirects: bool,
    pub max_redirections: u32,
    pub user_agent: Option<String>,
    pub cancel: Option<CancelToken>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}

impl FetchOptions {
    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self {
            connect_timeout: Some(Duration::from_secs(cfg.connect_timeout_secs)),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
            follow_redirects: cfg.follow_redirects,
            max_redirections: cfg.max_redirections,
            user_agent: cfg.user_agent.clone(),
            cancel: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}
