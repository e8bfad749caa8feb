//! Domain layer - Core marketplace entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! users, orders, offers and notifications, their state machines, the
//! catalog filter and the password policy.

pub mod catalog;
pub mod constants;
pub mod error;
pub mod notification;
pub mod offer;
pub mod order;
pub mod password;
pub mod user;

pub use catalog::CatalogCriteria;
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use notification::{NewNotification, Notification, NotificationType};
pub use offer::{parse_price, NewOffer, Offer, OfferAuthor, OfferDecision, OfferStatus};
pub use order::{NewOrder, Order, OrderFilters, OrderQuery, OrderStatus, PriceRange};
pub use password::Password;
pub use user::{RegisterUser, User, UserRecord, UserRole};
