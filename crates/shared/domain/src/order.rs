//! Order domain entity: a buyer's purchase request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Order lifecycle. `Active` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Active,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Active)
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Active, OrderStatus::Completed)
                | (OrderStatus::Active, OrderStatus::Cancelled)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Active => "active",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory price bounds declared by the buyer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
}

impl PriceRange {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Optional constraints guiding manufacturer offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl OrderFilters {
    /// Build filters from typed values. Blank color/size count as absent.
    pub fn new(
        price_min: Option<u64>,
        price_max: Option<u64>,
        color: Option<String>,
        size: Option<String>,
    ) -> DomainResult<Self> {
        Self {
            price: Some(PriceRange {
                min: price_min,
                max: price_max,
            }),
            color,
            size,
        }
        .validated()
    }

    /// Normalize and check filters however they were built.
    ///
    /// Blank color/size and an empty price range become absent; a minimum
    /// above the maximum is rejected.
    pub fn validated(self) -> DomainResult<Self> {
        let price = self.price.filter(|p| !p.is_empty());
        if let Some(PriceRange {
            min: Some(min),
            max: Some(max),
        }) = price
        {
            if min > max {
                return Err(DomainError::validation(
                    "Minimum price cannot exceed maximum price",
                ));
            }
        }

        Ok(Self {
            price,
            color: non_blank(self.color),
            size: non_blank(self.size),
        })
    }

    /// Build filters from raw form text.
    ///
    /// Empty price fields are absent; anything else must be a whole number.
    pub fn from_form(price_min: &str, price_max: &str, color: &str, size: &str) -> DomainResult<Self> {
        Self::new(
            parse_bound(price_min, "Minimum price")?,
            parse_bound(price_max, "Maximum price")?,
            Some(color.to_string()),
            Some(size.to_string()),
        )
    }

    pub fn price_min(&self) -> Option<u64> {
        self.price.and_then(|p| p.min)
    }

    pub fn price_max(&self) -> Option<u64> {
        self.price.and_then(|p| p.max)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional non-negative integer from form text.
pub fn parse_bound(raw: &str, field: &str) -> DomainResult<Option<u64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| DomainError::validation(format!("{} must be a whole number", field)))
}

/// Order domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub filters: OrderFilters,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create an active order from a validated request.
    pub fn create(request: NewOrder) -> DomainResult<Self> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("Product name is required"));
        }
        let description = request.description.trim();
        if description.is_empty() {
            return Err(DomainError::validation("Product description is required"));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id: request.user_id,
            title: title.to_string(),
            description: description.to_string(),
            filters: request.filters.validated()?,
            status: OrderStatus::Active,
            created_at: Utc::now(),
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Move to a terminal state. Only legal from `Active`.
    pub fn transition_to(&mut self, next: OrderStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::invalid_transition(format!(
                "Order {} cannot move from {} to {}",
                self.id, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }
}

/// Order creation data transfer object
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub user_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub filters: OrderFilters,
}

impl NewOrder {
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        filters: OrderFilters,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            description: description.into(),
            filters,
        }
    }
}

/// Selection for listing orders. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub user_id: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn owned_by(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.user_id.as_deref().map_or(true, |id| order.user_id == id)
            && self.status.map_or(true, |status| order.status == status)
    }
}
