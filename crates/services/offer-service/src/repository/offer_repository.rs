//! Offer repository over the record store.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppResult, OptionExt};
use domain::{Offer, OfferDecision};
use record_store::{keys, Collection, RecordStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Offer repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Find offer by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Offer>>;

    /// Offers for one order, in submission order
    async fn list_by_order(&self, order_id: &str) -> AppResult<Vec<Offer>>;

    /// Append a new offer
    async fn create(&self, offer: Offer) -> AppResult<Offer>;

    /// Resolve a pending offer atomically
    async fn decide(&self, id: &str, decision: OfferDecision) -> AppResult<Offer>;
}

/// Concrete implementation of OfferRepository
pub struct OfferStore {
    offers: Collection<Offer>,
}

impl OfferStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            offers: Collection::new(store, keys::OFFERS),
        }
    }
}

#[async_trait]
impl OfferRepository for OfferStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Offer>> {
        self.offers.find(|o| o.id == id).await
    }

    async fn list_by_order(&self, order_id: &str) -> AppResult<Vec<Offer>> {
        self.offers.filter(|o| o.order_id == order_id).await
    }

    async fn create(&self, offer: Offer) -> AppResult<Offer> {
        self.offers.push(offer.clone()).await?;
        Ok(offer)
    }

    async fn decide(&self, id: &str, decision: OfferDecision) -> AppResult<Offer> {
        self.offers
            .modify(|offers| {
                let offer = offers
                    .iter_mut()
                    .find(|o| o.id == id)
                    .ok_or_not_found("Offer")?;
                offer.decide(decision)?;
                Ok(offer.clone())
            })
            .await
    }
}
