//! Relay configuration.

use std::time::Duration;

/// Default deadline for one outbound call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration options for a [`Relay`](super::Relay)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Deadline covering connect, send and the full body read
    pub timeout: Duration,

    /// `User-Agent` the client sends when the request has none
    pub user_agent: Option<String>,

    /// Maximum redirects followed before failing; 0 returns redirects as-is
    pub max_redirects: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT, user_agent: None, max_redirects: 10 }
    }
}

impl RelayConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}
