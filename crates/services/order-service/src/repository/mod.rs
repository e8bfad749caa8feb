//! Repository layer for orders.

mod order_repository;

pub use order_repository::{OrderRepository, OrderStore};

#[cfg(any(test, feature = "test-utils"))]
pub use order_repository::MockOrderRepository;
