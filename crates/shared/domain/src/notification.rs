//! Notification domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{TITLE_NEW_OFFER, TITLE_OFFER_ACCEPTED, TITLE_OFFER_REJECTED};
use crate::offer::{Offer, OfferDecision};
use crate::order::Order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewOffer,
    OfferAccepted,
    OfferRejected,
}

/// Informational event delivered to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn create(request: NewNotification) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: request.user_id,
            kind: request.kind,
            title: request.title,
            message: request.message,
            order_id: request.order_id,
            offer_id: request.offer_id,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// One-way. Returns whether the flag changed.
    pub fn mark_read(&mut self) -> bool {
        let changed = !self.read;
        self.read = true;
        changed
    }
}

/// Notification creation data transfer object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: String,
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub order_id: Option<String>,
    pub offer_id: Option<String>,
}

impl NewNotification {
    pub fn new(
        user_id: impl Into<String>,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            kind,
            title: title.into(),
            message: message.into(),
            order_id: None,
            offer_id: None,
        }
    }

    pub fn about(mut self, order_id: impl Into<String>, offer_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self.offer_id = Some(offer_id.into());
        self
    }

    /// Tell the order's owner that an offer arrived.
    pub fn new_offer(order: &Order, offer: &Offer) -> Self {
        Self::new(
            order.user_id.clone(),
            NotificationType::NewOffer,
            TITLE_NEW_OFFER,
            format!("Received a new offer for your order \"{}\"", order.title),
        )
        .about(order.id.clone(), offer.id.clone())
    }

    /// Tell the manufacturer how the buyer decided.
    pub fn offer_decided(order: &Order, offer: &Offer, decision: OfferDecision) -> Self {
        let (kind, title, verb) = match decision {
            OfferDecision::Accepted => (
                NotificationType::OfferAccepted,
                TITLE_OFFER_ACCEPTED,
                "accepted",
            ),
            OfferDecision::Rejected => (
                NotificationType::OfferRejected,
                TITLE_OFFER_REJECTED,
                "rejected",
            ),
        };
        Self::new(
            offer.manufacturer_id.clone(),
            kind,
            title,
            format!("Your offer for \"{}\" was {}", order.title, verb),
        )
        .about(order.id.clone(), offer.id.clone())
    }
}
