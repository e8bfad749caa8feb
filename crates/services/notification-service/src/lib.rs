//! Notification Service Library
//!
//! Per-user notification feeds: creation, listing and the one-way read flag.

pub mod repository;
pub mod service;

use std::sync::Arc;

use record_store::RecordStore;

use crate::repository::NotificationStore;
use crate::service::NotificationCenter;

pub use crate::service::NotificationFeed;

/// Build the notification feed over a record store.
pub fn init(store: Arc<dyn RecordStore>) -> Arc<dyn NotificationFeed> {
    Arc::new(NotificationCenter::new(Arc::new(NotificationStore::new(store))))
}
