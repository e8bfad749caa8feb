//! Offer ledger - Handles offer submission and the buyer's decision.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{NewNotification, NewOffer, Offer, OfferDecision, Order};
use notification_service::NotificationFeed;
use order_service::OrderCatalog;

use crate::repository::OfferRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// An order together with the offers made against it.
///
/// Derived on read; offers are never stored inside the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithOffers {
    #[serde(flatten)]
    pub order: Order,
    pub offers: Vec<Offer>,
}

/// Offer ledger trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OfferLedger: Send + Sync {
    /// Submit a pending offer against an active order
    async fn submit_offer(&self, request: NewOffer) -> AppResult<Offer>;

    /// Offers for an order, in submission order
    async fn list_offers_for_order(&self, order_id: &str) -> AppResult<Vec<Offer>>;

    /// Get offer by ID
    async fn get_offer(&self, offer_id: &str) -> AppResult<Offer>;

    /// Accept or reject a pending offer. Only the order's owner may decide.
    async fn decide(
        &self,
        offer_id: &str,
        decision: OfferDecision,
        acting_user_id: &str,
    ) -> AppResult<Offer>;

    /// Order detail view with its offers attached
    async fn order_with_offers(&self, order_id: &str) -> AppResult<OrderWithOffers>;
}

/// Concrete implementation of OfferLedger.
pub struct OfferDesk {
    repo: Arc<dyn OfferRepository>,
    orders: Arc<dyn OrderCatalog>,
    notifications: Arc<dyn NotificationFeed>,
}

impl OfferDesk {
    pub fn new(
        repo: Arc<dyn OfferRepository>,
        orders: Arc<dyn OrderCatalog>,
        notifications: Arc<dyn NotificationFeed>,
    ) -> Self {
        Self {
            repo,
            orders,
            notifications,
        }
    }

    /// Delivery failures are logged, never returned: the offer write stands.
    async fn send(&self, request: NewNotification) {
        let user_id = request.user_id.clone();
        if let Err(e) = self.notifications.notify(request).await {
            warn!(user_id = %user_id, error = %e, "Failed to deliver notification");
        }
    }
}

#[async_trait]
impl OfferLedger for OfferDesk {
    async fn submit_offer(&self, request: NewOffer) -> AppResult<Offer> {
        let order = self.orders.get_order(&request.order_id).await?;
        if !order.is_active() {
            return Err(AppError::validation(format!(
                "Order {} is {} and no longer accepts offers",
                order.id, order.status
            )));
        }

        let offer = self.repo.create(Offer::create(request)?).await?;
        info!(
            offer_id = %offer.id,
            order_id = %order.id,
            manufacturer_id = %offer.manufacturer_id,
            price = offer.price,
            "Offer submitted"
        );

        self.send(NewNotification::new_offer(&order, &offer)).await;
        Ok(offer)
    }

    async fn list_offers_for_order(&self, order_id: &str) -> AppResult<Vec<Offer>> {
        self.repo.list_by_order(order_id).await
    }

    async fn get_offer(&self, offer_id: &str) -> AppResult<Offer> {
        self.repo.find_by_id(offer_id).await?.ok_or_not_found("Offer")
    }

    async fn decide(
        &self,
        offer_id: &str,
        decision: OfferDecision,
        acting_user_id: &str,
    ) -> AppResult<Offer> {
        let offer = self.get_offer(offer_id).await?;
        let order = self.orders.get_order(&offer.order_id).await?;
        if !order.is_owned_by(acting_user_id) {
            warn!(offer_id = %offer_id, user_id = %acting_user_id, "Decision by non-owner refused");
            return Err(AppError::Forbidden);
        }

        let offer = self.repo.decide(offer_id, decision).await?;
        info!(offer_id = %offer.id, order_id = %order.id, status = %offer.status, "Offer decided");

        self.send(NewNotification::offer_decided(&order, &offer, decision))
            .await;
        Ok(offer)
    }

    async fn order_with_offers(&self, order_id: &str) -> AppResult<OrderWithOffers> {
        let order = self.orders.get_order(order_id).await?;
        let offers = self.repo.list_by_order(order_id).await?;
        Ok(OrderWithOffers { order, offers })
    }
}
