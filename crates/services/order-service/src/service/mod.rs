//! Order catalog use cases.

mod order_catalog;

pub use order_catalog::{OrderCatalog, OrderManager};

#[cfg(any(test, feature = "test-utils"))]
pub use order_catalog::MockOrderCatalog;
