//! Notification feed use cases.

mod notification_feed;

pub use notification_feed::{NotificationCenter, NotificationFeed};

#[cfg(any(test, feature = "test-utils"))]
pub use notification_feed::MockNotificationFeed;
