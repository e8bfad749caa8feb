//! Current-user session persisted under a single key.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::User;
use record_store::{keys, RecordStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Remember the signed-in user
    async fn save(&self, user: &User) -> AppResult<()>;

    /// The signed-in user, if any
    async fn current(&self) -> AppResult<Option<User>>;

    /// Forget the signed-in user
    async fn clear(&self) -> AppResult<()>;
}

pub struct SessionStore {
    store: Arc<dyn RecordStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn save(&self, user: &User) -> AppResult<()> {
        let value = serde_json::to_value(user)?;
        self.store.set(keys::SESSION, value).await
    }

    async fn current(&self) -> AppResult<Option<User>> {
        match self.store.get(keys::SESSION).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn clear(&self) -> AppResult<()> {
        self.store.remove(keys::SESSION).await
    }
}
