//! Typed list views over the record store.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use common::AppResult;

use crate::store::RecordStore;

/// Read a JSON list stored under `key`. An absent key is an empty list.
pub async fn load_list<T: DeserializeOwned>(store: &dyn RecordStore, key: &str) -> AppResult<Vec<T>> {
    match store.get(key).await? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(Vec::new()),
    }
}

/// Replace the JSON list stored under `key`.
pub async fn save_list<T: Serialize>(store: &dyn RecordStore, key: &str, items: &[T]) -> AppResult<()> {
    let value = serde_json::to_value(items)?;
    store.set(key, value).await?;
    debug!(key, len = items.len(), "List saved");
    Ok(())
}

/// A list of records under one fixed key.
///
/// Writes go through [`Collection::modify`], which holds a lock for the whole
/// load-mutate-save cycle. The lock is per instance: services sharing a store
/// must share the collection, and separate processes writing the same key
/// still race (last writer wins).
pub struct Collection<T> {
    store: Arc<dyn RecordStore>,
    key: String,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(store: Arc<dyn RecordStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// All records, in stored order.
    pub async fn all(&self) -> AppResult<Vec<T>> {
        load_list(self.store.as_ref(), &self.key).await
    }

    /// First record matching `predicate`.
    pub async fn find<P>(&self, predicate: P) -> AppResult<Option<T>>
    where
        P: Fn(&T) -> bool + Send,
    {
        Ok(self.all().await?.into_iter().find(|item| predicate(item)))
    }

    /// Records matching `predicate`, in stored order.
    pub async fn filter<P>(&self, predicate: P) -> AppResult<Vec<T>>
    where
        P: Fn(&T) -> bool + Send,
    {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|item| predicate(item))
            .collect())
    }

    /// Load, mutate and save under the write lock.
    ///
    /// Nothing is written when `mutate` fails.
    pub async fn modify<R, F>(&self, mutate: F) -> AppResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> AppResult<R> + Send,
        R: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.all().await?;
        let result = mutate(&mut items)?;
        save_list(self.store.as_ref(), &self.key, &items).await?;
        Ok(result)
    }

    /// Append one record.
    pub async fn push(&self, item: T) -> AppResult<()> {
        self.modify(move |items| {
            items.push(item);
            Ok(())
        })
        .await
    }
}
