//! Common utilities shared across all marketplace services.
//!
//! This crate provides:
//! - Unified error handling for service callers
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
