//! Identity use cases.

mod identity_service;

pub use identity_service::{Authenticator, IdentityService};
