//! Offer ledger use cases.

mod offer_ledger;

pub use offer_ledger::{OfferDesk, OfferLedger, OrderWithOffers};

#[cfg(any(test, feature = "test-utils"))]
pub use offer_ledger::MockOfferLedger;
