//! Shared configuration structures.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Which record store implementation backs the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    #[default]
    File,
    Redis,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "file" => Ok(StoreBackend::File),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(AppError::validation(format!(
                "Unknown store backend: {}",
                other
            ))),
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// JSON document used by the file backend
    pub path: PathBuf,
    /// Redis URL used by the redis backend
    pub redis_url: String,
    /// Prefix applied to every key in Redis
    pub redis_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            path: PathBuf::from("marketplace-data.json"),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            redis_prefix: "market:".to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to the defaults; an unknown backend name
    /// is an error.
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            backend: match env::var("MARKET_STORE_BACKEND") {
                Ok(name) => name.parse()?,
                Err(_) => defaults.backend,
            },
            path: env::var("MARKET_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.path),
            redis_url: env::var("MARKET_REDIS_URL")
                .or_else(|_| env::var("REDIS_URL"))
                .unwrap_or(defaults.redis_url),
            redis_prefix: env::var("MARKET_REDIS_PREFIX").unwrap_or(defaults.redis_prefix),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("Memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!(" file ".parse::<StoreBackend>().unwrap(), StoreBackend::File);
        assert_eq!("redis".parse::<StoreBackend>().unwrap(), StoreBackend::Redis);
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_defaults() {
        let store = StoreConfig::default();
        assert_eq!(store.backend, StoreBackend::File);
        assert_eq!(store.redis_prefix, "market:");
    }
}
