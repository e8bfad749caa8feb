//! Order Service Library
//!
//! Buyers' purchase requests: creation, listing, the manufacturer catalog
//! filter and the `active -> completed | cancelled` lifecycle.

pub mod repository;
pub mod service;

use std::sync::Arc;

use record_store::RecordStore;

use crate::repository::OrderStore;
use crate::service::OrderManager;

pub use crate::service::OrderCatalog;

/// Build the order catalog over a record store.
pub fn init(store: Arc<dyn RecordStore>) -> Arc<dyn OrderCatalog> {
    Arc::new(OrderManager::new(Arc::new(OrderStore::new(store))))
}
