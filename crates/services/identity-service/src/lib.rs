//! Identity Service Library
//!
//! Registration against the password policy, login by exact
//! username/password match, and the persisted current-user session.

pub mod config;
pub mod repository;
pub mod service;

use std::sync::Arc;

use record_store::RecordStore;

use crate::config::IdentityConfig;
use crate::repository::{SessionStore, UserStore};
use crate::service::Authenticator;

pub use crate::service::IdentityService;

/// Build the identity service over a record store.
pub fn init(store: Arc<dyn RecordStore>, config: &IdentityConfig) -> Arc<dyn IdentityService> {
    let users = Arc::new(UserStore::new(store.clone()));
    let sessions = Arc::new(SessionStore::new(store));
    Arc::new(Authenticator::new(users, sessions).with_delay(config.auth_delay()))
}
