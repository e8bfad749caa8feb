//! Marketplace configuration.

use std::env;

use common::{AppResult, StoreConfig};
use identity_service::config::IdentityConfig;

/// Configuration for a whole marketplace instance.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub store: StoreConfig,
    pub identity: IdentityConfig,
    /// Install demo data into absent keys on startup
    pub seed_demo: bool,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            identity: IdentityConfig::default(),
            seed_demo: true,
        }
    }
}

impl MarketConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            store: StoreConfig::from_env()?,
            identity: IdentityConfig::from_env(),
            seed_demo: env::var("MARKET_SEED_DEMO")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        for off in ["0", "false", "No", " off "] {
            assert!(!parse_flag(off), "{off}");
        }
        for on in ["1", "true", "yes", ""] {
            assert!(parse_flag(on), "{on}");
        }
    }

    #[test]
    fn test_default_seeds_demo_data() {
        assert!(MarketConfig::default().seed_demo);
    }
}
