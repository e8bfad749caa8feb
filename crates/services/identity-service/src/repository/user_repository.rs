//! User repository over the record store.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppError, AppResult};
use domain::UserRecord;
use record_store::{keys, Collection, RecordStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by exact (case-sensitive) username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>>;

    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserRecord>>;

    /// Append a new user. Fails if the username is taken.
    async fn create(&self, record: UserRecord) -> AppResult<UserRecord>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    users: Collection<UserRecord>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            users: Collection::new(store, keys::USERS),
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>> {
        self.users.find(|u| u.username == username).await
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserRecord>> {
        self.users.find(|u| u.id == id).await
    }

    async fn create(&self, record: UserRecord) -> AppResult<UserRecord> {
        self.users
            .modify(move |users| {
                // Re-checked under the write lock.
                if users.iter().any(|u| u.username == record.username) {
                    return Err(AppError::validation(
                        "User with this username already exists",
                    ));
                }
                users.push(record.clone());
                Ok(record)
            })
            .await
    }
}
