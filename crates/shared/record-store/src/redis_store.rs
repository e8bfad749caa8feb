//! Redis-backed record store.
//!
//! Each record is a JSON string under `<prefix><key>`. Records never expire.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use serde_json::Value;
use tracing::{debug, info};

use common::{AppError, AppResult};

use crate::store::RecordStore;

/// Record store on a shared Redis instance.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    prefix: String,
}

impl RedisStore {
    /// Connect to Redis, returning an error instead of panicking.
    pub async fn connect(url: &str, prefix: impl Into<String>) -> AppResult<Self> {
        let client = Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        info!("Redis record store connected");

        Ok(Self {
            connection,
            prefix: prefix.into(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.get(self.key(key)).await?;

        match raw {
            Some(json) => {
                let value = serde_json::from_str(&json).map_err(|e| {
                    AppError::storage(format!("Corrupt record under {}: {}", key, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(&value)?;
        conn.set::<_, _, ()>(self.key(key), json).await?;
        debug!(key, "Record written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        conn.del::<_, ()>(self.key(key)).await?;
        debug!(key, "Record removed");
        Ok(())
    }
}
