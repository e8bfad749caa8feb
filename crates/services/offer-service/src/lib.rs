//! Offer Service Library
//!
//! Manufacturers' offers against active orders and the buyer's
//! accept/reject decision. Both steps notify the other party.

pub mod repository;
pub mod service;

use std::sync::Arc;

use notification_service::NotificationFeed;
use order_service::OrderCatalog;
use record_store::RecordStore;

use crate::repository::OfferStore;
use crate::service::OfferDesk;

pub use crate::service::{OfferLedger, OrderWithOffers};

/// Build the offer ledger over a record store and its collaborators.
pub fn init(
    store: Arc<dyn RecordStore>,
    orders: Arc<dyn OrderCatalog>,
    notifications: Arc<dyn NotificationFeed>,
) -> Arc<dyn OfferLedger> {
    Arc::new(OfferDesk::new(
        Arc::new(OfferStore::new(store)),
        orders,
        notifications,
    ))
}
