//! Notification repository over the record store.
//!
//! Each user's notifications live under their own key. A separate
//! `notification_owners` map (notification id -> user id) lets a
//! notification be found by id alone.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use common::{AppError, AppResult, OptionExt};
use domain::Notification;
use record_store::{keys, load_list, save_list, RecordStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

type OwnerIndex = BTreeMap<String, String>;

/// Notification repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append to the recipient's feed
    async fn append(&self, notification: Notification) -> AppResult<Notification>;

    /// A user's feed, in insertion order
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Notification>>;

    /// Find notification by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Notification>>;

    /// Set the read flag. Already-read notifications are returned unchanged.
    async fn mark_read(&self, id: &str) -> AppResult<Notification>;
}

/// Concrete implementation of NotificationRepository
pub struct NotificationStore {
    store: Arc<dyn RecordStore>,
    write_lock: Mutex<()>,
}

impl NotificationStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn owners(&self) -> AppResult<OwnerIndex> {
        match self.store.get(keys::NOTIFICATION_OWNERS).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(OwnerIndex::new()),
        }
    }

    async fn owner_of(&self, id: &str) -> AppResult<Option<String>> {
        Ok(self.owners().await?.remove(id))
    }
}

#[async_trait]
impl NotificationRepository for NotificationStore {
    async fn append(&self, notification: Notification) -> AppResult<Notification> {
        let _guard = self.write_lock.lock().await;

        let key = keys::notifications(&notification.user_id);
        let mut feed: Vec<Notification> = load_list(self.store.as_ref(), &key).await?;
        let mut owners = self.owners().await?;

        // Index first: an index entry without a feed entry resolves to NotFound,
        // a feed entry without an index entry could never be marked read.
        owners.insert(notification.id.clone(), notification.user_id.clone());
        self.store
            .set(keys::NOTIFICATION_OWNERS, serde_json::to_value(&owners)?)
            .await?;

        feed.push(notification.clone());
        save_list(self.store.as_ref(), &key, &feed).await?;

        Ok(notification)
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Notification>> {
        load_list(self.store.as_ref(), &keys::notifications(user_id)).await
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Notification>> {
        let Some(owner) = self.owner_of(id).await? else {
            return Ok(None);
        };
        Ok(self
            .list_for_user(&owner)
            .await?
            .into_iter()
            .find(|n| n.id == id))
    }

    async fn mark_read(&self, id: &str) -> AppResult<Notification> {
        let _guard = self.write_lock.lock().await;

        let owner = self.owner_of(id).await?.ok_or_not_found("Notification")?;
        let key = keys::notifications(&owner);
        let mut feed: Vec<Notification> = load_list(self.store.as_ref(), &key).await?;
        let notification = feed
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| AppError::not_found("Notification"))?;

        if !notification.mark_read() {
            return Ok(notification.clone());
        }
        let updated = notification.clone();
        save_list(self.store.as_ref(), &key, &feed).await?;
        debug!(notification_id = %id, user_id = %owner, "Notification marked read");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{NewNotification, NotificationType};
    use record_store::{MemoryStore, MockRecordStore};

    fn notification(user_id: &str, title: &str) -> Notification {
        Notification::create(NewNotification::new(
            user_id,
            NotificationType::NewOffer,
            title,
            "message",
        ))
    }

    #[tokio::test]
    async fn test_append_writes_feed_and_owner_index() {
        let store = MemoryStore::new();
        let repo = NotificationStore::new(Arc::new(store.clone()));
        let saved = repo.append(notification("user1", "First")).await.unwrap();

        assert!(store.contains_key("notifications_user1").await);
        let owners = store.get(keys::NOTIFICATION_OWNERS).await.unwrap().unwrap();
        assert_eq!(owners[saved.id.as_str()], "user1");
        assert_eq!(repo.find_by_id(&saved.id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_feeds_are_separated_per_user() {
        let repo = NotificationStore::new(Arc::new(MemoryStore::new()));
        repo.append(notification("user1", "a")).await.unwrap();
        repo.append(notification("user2", "b")).await.unwrap();
        repo.append(notification("user1", "c")).await.unwrap();

        let titles: Vec<String> = repo
            .list_for_user("user1")
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert!(repo.list_for_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mark_read_locates_feed_through_owner_index() {
        let store = MemoryStore::new();
        let repo = NotificationStore::new(Arc::new(store.clone()));
        let saved = repo.append(notification("user1", "a")).await.unwrap();

        assert!(repo.mark_read(&saved.id).await.unwrap().read);
        store.remove(keys::NOTIFICATION_OWNERS).await.unwrap();
        let err = repo.mark_read(&saved.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_append_leaves_feed_untouched_when_index_write_fails() {
        let mut store = MockRecordStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .withf(|key, _| key.starts_with(keys::NOTIFICATION_OWNERS))
            .times(1)
            .returning(|_, _| Err(AppError::storage("index unavailable")));
        store
            .expect_set()
            .withf(|key, _| key.starts_with("notifications_"))
            .times(0);
        let repo = NotificationStore::new(Arc::new(store));

        let err = repo.append(notification("user1", "a")).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[tokio::test]
    async fn test_index_entry_without_feed_entry_is_not_found() {
        let store = MemoryStore::new();
        let repo = NotificationStore::new(Arc::new(store.clone()));
        let saved = repo.append(notification("user1", "a")).await.unwrap();
        store.remove("notifications_user1").await.unwrap();

        assert_eq!(repo.find_by_id(&saved.id).await.unwrap(), None);
        let err = repo.mark_read(&saved.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_mark_read_unknown_id() {
        let repo = NotificationStore::new(Arc::new(MemoryStore::new()));
        let err = repo.mark_read("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
