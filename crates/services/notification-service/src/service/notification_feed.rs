//! Notification feed - creation, listing and read state.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use common::AppResult;
use domain::{NewNotification, Notification};

use crate::repository::NotificationRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Notification feed trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationFeed: Send + Sync {
    /// Deliver a new unread notification
    async fn notify(&self, request: NewNotification) -> AppResult<Notification>;

    /// A user's notifications in insertion order (oldest first)
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Notification>>;

    /// Mark as read. Idempotent; unknown IDs are `NotFound`.
    async fn mark_read(&self, notification_id: &str) -> AppResult<Notification>;

    /// Number of unread notifications for a user
    async fn unread_count(&self, user_id: &str) -> AppResult<usize>;
}

pub struct NotificationCenter {
    repo: Arc<dyn NotificationRepository>,
}

impl NotificationCenter {
    pub fn new(repo: Arc<dyn NotificationRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl NotificationFeed for NotificationCenter {
    async fn notify(&self, request: NewNotification) -> AppResult<Notification> {
        let notification = self.repo.append(Notification::create(request)).await?;
        info!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            kind = ?notification.kind,
            "Notification sent"
        );
        Ok(notification)
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Notification>> {
        self.repo.list_for_user(user_id).await
    }

    async fn mark_read(&self, notification_id: &str) -> AppResult<Notification> {
        self.repo.mark_read(notification_id).await
    }

    async fn unread_count(&self, user_id: &str) -> AppResult<usize> {
        Ok(self
            .repo
            .list_for_user(user_id)
            .await?
            .iter()
            .filter(|n| !n.read)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockNotificationRepository, NotificationStore};
    use common::AppError;
    use domain::NotificationType;
    use mockall::predicate::eq;
    use record_store::MemoryStore;
    use tokio_test::assert_ok;

    fn feed() -> NotificationCenter {
        NotificationCenter::new(Arc::new(NotificationStore::new(Arc::new(MemoryStore::new()))))
    }

    fn new_offer_for(user_id: &str) -> NewNotification {
        NewNotification::new(
            user_id,
            NotificationType::NewOffer,
            "New offer",
            "Received a new offer for your order \"Nike sneakers\"",
        )
        .about("1", "1")
    }

    #[tokio::test]
    async fn test_notify_creates_unread() {
        let feed = feed();
        let notification = feed.notify(new_offer_for("user1")).await.unwrap();

        assert!(!notification.read);
        assert_eq!(notification.order_id.as_deref(), Some("1"));
        assert_eq!(feed.list_for_user("user1").await.unwrap(), vec![notification]);
        assert_eq!(feed.unread_count("user1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_is_idempotent() {
        let feed = feed();
        let notification = feed.notify(new_offer_for("user1")).await.unwrap();

        let first = feed.mark_read(&notification.id).await.unwrap();
        let second = assert_ok!(feed.mark_read(&notification.id).await);

        assert!(first.read);
        assert_eq!(first, second);
        assert_eq!(feed.unread_count("user1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mark_read_unknown_is_not_found() {
        let err = feed().mark_read("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unread_count_ignores_other_users() {
        let feed = feed();
        feed.notify(new_offer_for("user1")).await.unwrap();
        feed.notify(new_offer_for("user1")).await.unwrap();
        feed.notify(new_offer_for("user2")).await.unwrap();

        assert_eq!(feed.unread_count("user1").await.unwrap(), 2);
        assert_eq!(feed.unread_count("user2").await.unwrap(), 1);
        assert_eq!(feed.unread_count("user3").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_notify_propagates_storage_failure() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_append()
            .times(1)
            .returning(|_| Err(AppError::storage("disk full")));
        let feed = NotificationCenter::new(Arc::new(repo));

        let err = feed.notify(new_offer_for("user1")).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[tokio::test]
    async fn test_mark_read_delegates_by_id() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_mark_read()
            .with(eq("n-1"))
            .times(1)
            .returning(|_| Err(AppError::not_found("Notification")));
        let feed = NotificationCenter::new(Arc::new(repo));

        assert!(feed.mark_read("n-1").await.is_err());
    }
}
