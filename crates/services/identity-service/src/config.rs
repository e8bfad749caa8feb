//! Identity service configuration.

use std::env;
use std::time::Duration;

/// Identity service configuration.
#[derive(Debug, Clone, Default)]
pub struct IdentityConfig {
    /// Artificial latency before register/login complete, in milliseconds
    pub auth_delay_ms: u64,
}

impl IdentityConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            auth_delay_ms: env::var("MARKET_AUTH_DELAY_MS")
                .ok()
                .and_then(|ms| ms.parse().ok())
                .unwrap_or(0),
        }
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }
}
