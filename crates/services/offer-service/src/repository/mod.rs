mod offer_repository;

pub use offer_repository::{OfferRepository, OfferStore};

#[cfg(any(test, feature = "test-utils"))]
pub use offer_repository::MockOfferRepository;
