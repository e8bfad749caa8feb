//! Offer domain entity: a manufacturer's response to an order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::user::User;

/// Offer lifecycle. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buyer's verdict on a pending offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferDecision {
    Accepted,
    Rejected,
}

impl From<OfferDecision> for OfferStatus {
    fn from(decision: OfferDecision) -> Self {
        match decision {
            OfferDecision::Accepted => OfferStatus::Accepted,
            OfferDecision::Rejected => OfferStatus::Rejected,
        }
    }
}

/// Identity snapshot of the submitting manufacturer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferAuthor {
    pub id: String,
    pub username: String,
}

impl OfferAuthor {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

impl From<&User> for OfferAuthor {
    fn from(user: &User) -> Self {
        Self::new(user.id.clone(), user.username.clone())
    }
}

/// Offer domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub order_id: String,
    pub manufacturer_id: String,
    pub manufacturer_username: String,
    pub price: u64,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub characteristics: String,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    /// Create a pending offer, validating the submitted fields.
    ///
    /// Whether the referenced order exists and is open is checked by the
    /// ledger, which can see orders.
    pub fn create(request: NewOffer) -> DomainResult<Self> {
        if request.price == 0 {
            return Err(DomainError::validation("Price must be a positive whole number"));
        }
        let description = request.description.trim();
        if description.is_empty() {
            return Err(DomainError::validation("Offer description is required"));
        }
        let characteristics = request.characteristics.trim();
        if characteristics.is_empty() {
            return Err(DomainError::validation("Characteristics are required"));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            order_id: request.order_id,
            manufacturer_id: request.manufacturer.id,
            manufacturer_username: request.manufacturer.username,
            price: request.price,
            description: description.to_string(),
            images: request.images,
            characteristics: characteristics.to_string(),
            status: OfferStatus::Pending,
            created_at: Utc::now(),
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status == OfferStatus::Pending
    }

    /// Resolve the offer. Legal once, from `Pending`.
    pub fn decide(&mut self, decision: OfferDecision) -> DomainResult<()> {
        if !self.is_pending() {
            return Err(DomainError::invalid_transition(format!(
                "Offer {} is already {}",
                self.id, self.status
            )));
        }
        self.status = decision.into();
        Ok(())
    }
}

/// Offer submission data transfer object
#[derive(Debug, Clone)]
pub struct NewOffer {
    pub order_id: String,
    pub manufacturer: OfferAuthor,
    pub price: u64,
    pub description: String,
    pub characteristics: String,
    pub images: Vec<String>,
}

impl NewOffer {
    pub fn new(
        order_id: impl Into<String>,
        manufacturer: OfferAuthor,
        price: u64,
        description: impl Into<String>,
        characteristics: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            manufacturer,
            price,
            description: description.into(),
            characteristics: characteristics.into(),
            images: Vec::new(),
        }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }
}

/// Parse an offer price from form text. Must be a positive whole number.
pub fn parse_price(raw: &str) -> DomainResult<u64> {
    match raw.trim().parse::<u64>() {
        Ok(price) if price > 0 => Ok(price),
        _ => Err(DomainError::validation("Price must be a positive whole number")),
    }
}
