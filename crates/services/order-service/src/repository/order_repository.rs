//! Order repository over the record store.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppResult, OptionExt};
use domain::{Order, OrderQuery, OrderStatus};
use record_store::{keys, Collection, RecordStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find order by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Order>>;

    /// Orders matching the query, in insertion order
    async fn list(&self, query: OrderQuery) -> AppResult<Vec<Order>>;

    /// Append a new order
    async fn create(&self, order: Order) -> AppResult<Order>;

    /// Apply a status transition atomically
    async fn transition(&self, id: &str, next: OrderStatus) -> AppResult<Order>;
}

/// Concrete implementation of OrderRepository
pub struct OrderStore {
    orders: Collection<Order>,
}

impl OrderStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            orders: Collection::new(store, keys::ORDERS),
        }
    }
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Order>> {
        self.orders.find(|o| o.id == id).await
    }

    async fn list(&self, query: OrderQuery) -> AppResult<Vec<Order>> {
        self.orders.filter(move |o| query.matches(o)).await
    }

    async fn create(&self, order: Order) -> AppResult<Order> {
        self.orders.push(order.clone()).await?;
        Ok(order)
    }

    async fn transition(&self, id: &str, next: OrderStatus) -> AppResult<Order> {
        self.orders
            .modify(|orders| {
                let order = orders
                    .iter_mut()
                    .find(|o| o.id == id)
                    .ok_or_not_found("Order")?;
                order.transition_to(next)?;
                Ok(order.clone())
            })
            .await
    }
}
