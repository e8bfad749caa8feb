//! File-backed record store.
//!
//! All keys live in one JSON object on disk. Every write serialises the whole
//! document to a sibling temporary file and renames it over the original, so
//! readers of the file never see a partially written document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info};

use common::{AppError, AppResult};

use crate::store::RecordStore;

/// Record store persisted as a single JSON document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    records: Mutex<Map<String, Value>>,
}

impl FileStore {
    /// Open the document at `path`, starting empty if it does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Map::new(),
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes)? {
                Value::Object(map) => map,
                _ => {
                    return Err(AppError::storage(format!(
                        "{} does not contain a JSON object",
                        path.display()
                    )))
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        info!(path = %path.display(), keys = records.len(), "File store opened");

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, records: &Map<String, Value>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.records.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let mut records = self.records.lock().await;
        let previous = records.insert(key.to_string(), value);

        if let Err(e) = self.persist(&records).await {
            // Keep memory consistent with what is on disk.
            match previous {
                Some(old) => records.insert(key.to_string(), old),
                None => records.remove(key),
            };
            return Err(e);
        }

        debug!(key, "Record written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let mut records = self.records.lock().await;
        let Some(previous) = records.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.persist(&records).await {
            records.insert(key.to_string(), previous);
            return Err(e);
        }

        debug!(key, "Record removed");
        Ok(())
    }
}
