mod notification_repository;

pub use notification_repository::{NotificationRepository, NotificationStore};

#[cfg(any(test, feature = "test-utils"))]
pub use notification_repository::MockNotificationRepository;
