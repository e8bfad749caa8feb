//! Order catalog - Handles order-related business logic.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use common::{AppResult, OptionExt};
use domain::{CatalogCriteria, NewOrder, Order, OrderQuery, OrderStatus};

use crate::repository::OrderRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order catalog trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderCatalog: Send + Sync {
    /// Create an active order
    async fn create_order(&self, request: NewOrder) -> AppResult<Order>;

    /// Get order by ID
    async fn get_order(&self, order_id: &str) -> AppResult<Order>;

    /// List orders by owner and/or status, in insertion order
    async fn list_orders(&self, query: OrderQuery) -> AppResult<Vec<Order>>;

    /// Apply catalog criteria to an order sequence
    fn filter_catalog(&self, orders: &[Order], criteria: &CatalogCriteria) -> Vec<Order>;

    /// Active orders passing the criteria (what manufacturers browse)
    async fn browse_catalog(&self, criteria: &CatalogCriteria) -> AppResult<Vec<Order>>;

    /// Move an active order to `completed` or `cancelled`
    async fn transition_status(&self, order_id: &str, to: OrderStatus) -> AppResult<Order>;
}

/// Concrete implementation of OrderCatalog using repository.
pub struct OrderManager {
    repo: Arc<dyn OrderRepository>,
}

impl OrderManager {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl OrderCatalog for OrderManager {
    async fn create_order(&self, request: NewOrder) -> AppResult<Order> {
        let order = self.repo.create(Order::create(request)?).await?;
        info!(order_id = %order.id, user_id = %order.user_id, "Order created");
        Ok(order)
    }

    async fn get_order(&self, order_id: &str) -> AppResult<Order> {
        self.repo.find_by_id(order_id).await?.ok_or_not_found("Order")
    }

    async fn list_orders(&self, query: OrderQuery) -> AppResult<Vec<Order>> {
        self.repo.list(query).await
    }

    fn filter_catalog(&self, orders: &[Order], criteria: &CatalogCriteria) -> Vec<Order> {
        criteria.apply(orders)
    }

    async fn browse_catalog(&self, criteria: &CatalogCriteria) -> AppResult<Vec<Order>> {
        let active = self
            .repo
            .list(OrderQuery::all().with_status(OrderStatus::Active))
            .await?;
        Ok(self.filter_catalog(&active, criteria))
    }

    async fn transition_status(&self, order_id: &str, to: OrderStatus) -> AppResult<Order> {
        let order = self.repo.transition(order_id, to).await?;
        info!(order_id = %order.id, status = %order.status, "Order status changed");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockOrderRepository, OrderStore};
    use common::AppError;
    use domain::{OrderFilters, PriceRange};
    use record_store::MemoryStore;

    fn catalog() -> OrderManager {
        OrderManager::new(Arc::new(OrderStore::new(Arc::new(MemoryStore::new()))))
    }

    fn request(user: &str, title: &str, filters: OrderFilters) -> NewOrder {
        NewOrder::new(user, title, format!("{} wanted", title), filters)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let catalog = catalog();
        let order = catalog
            .create_order(request("buyer", "Nike sneakers", OrderFilters::default()))
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Active);
        assert_eq!(catalog.get_order(&order.id).await.unwrap(), order);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title_without_writing() {
        let repo = MockOrderRepository::new();
        let catalog = OrderManager::new(Arc::new(repo));
        let err = catalog
            .create_order(NewOrder::new("buyer", " ", "desc", OrderFilters::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_missing_order() {
        let err = catalog().get_order("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order_and_filters() {
        let catalog = catalog();
        let mut created = Vec::new();
        for (user, title) in [("b1", "First"), ("b2", "Second"), ("b1", "Third")] {
            created.push(
                catalog
                    .create_order(request(user, title, OrderFilters::default()))
                    .await
                    .unwrap(),
            );
        }

        let all = catalog.list_orders(OrderQuery::all()).await.unwrap();
        assert_eq!(all, created);

        let mine = catalog.list_orders(OrderQuery::owned_by("b1")).await.unwrap();
        let titles: Vec<&str> = mine.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Third"]);

        catalog
            .transition_status(&created[2].id, OrderStatus::Cancelled)
            .await
            .unwrap();
        let mine_active = catalog
            .list_orders(OrderQuery::owned_by("b1").with_status(OrderStatus::Active))
            .await
            .unwrap();
        assert_eq!(mine_active.len(), 1);
    }

    #[tokio::test]
    async fn test_transitions_are_terminal() {
        let catalog = catalog();
        let order = catalog
            .create_order(request("buyer", "Jacket", OrderFilters::default()))
            .await
            .unwrap();

        let done = catalog
            .transition_status(&order.id, OrderStatus::Completed)
            .await
            .unwrap();
        assert_eq!(done.status, OrderStatus::Completed);

        let err = catalog
            .transition_status(&order.id, OrderStatus::Active)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));

        let err = catalog
            .transition_status(&order.id, OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
        assert_eq!(
            catalog.get_order(&order.id).await.unwrap().status,
            OrderStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_transition_missing_order() {
        let err = catalog()
            .transition_status("missing", OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_browse_only_shows_active_orders() {
        let catalog = catalog();
        let open = catalog
            .create_order(request("b", "Phone", OrderFilters::default()))
            .await
            .unwrap();
        let closed = catalog
            .create_order(request("b", "Phone case", OrderFilters::default()))
            .await
            .unwrap();
        catalog
            .transition_status(&closed.id, OrderStatus::Completed)
            .await
            .unwrap();

        let visible = catalog
            .browse_catalog(&CatalogCriteria::new().search("phone"))
            .await
            .unwrap();
        assert_eq!(visible, vec![open]);
    }

    #[tokio::test]
    async fn test_create_normalizes_filters_built_field_by_field() {
        let catalog = catalog();
        let raw = OrderFilters {
            price: None,
            color: Some(String::new()),
            size: None,
        };
        let order = catalog
            .create_order(request("b", "Scarf", raw))
            .await
            .unwrap();

        assert_eq!(order.filters.color, None);
        assert!(CatalogCriteria::new().color("red").matches(&order));

        let inverted = OrderFilters {
            price: Some(PriceRange {
                min: Some(15000),
                max: Some(5000),
            }),
            color: None,
            size: None,
        };
        let err = catalog
            .create_order(request("b", "Scarf", inverted))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(catalog.list_orders(OrderQuery::all()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_filter_catalog_permissive_color() {
        let catalog = catalog();
        let black = catalog
            .create_order(request(
                "b",
                "Sneakers",
                OrderFilters::new(None, None, Some("black".into()), None).unwrap(),
            ))
            .await
            .unwrap();
        let any_color = catalog
            .create_order(request("b", "Boots", OrderFilters::default()))
            .await
            .unwrap();

        let result = catalog.filter_catalog(
            &[black, any_color.clone()],
            &CatalogCriteria::new().color("red"),
        );
        assert_eq!(result, vec![any_color]);
    }
}
