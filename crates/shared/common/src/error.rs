//! Unified error handling for marketplace services.
//!
//! Every expected business condition is a typed variant so callers can
//! branch on it: validation, authentication, lookup, authorization and
//! state-machine failures. Infrastructure failures are kept separate and
//! their details are hidden from user-facing messages.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Input
    #[error("{0}")]
    Validation(String),

    // Authentication & Authorization
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Access denied")]
    Forbidden,

    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    // State machines
    #[error("Action not allowed in current state: {0}")]
    InvalidTransition(String),

    // Record store
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cache")]
    #[error("Cache error")]
    Cache(#[from] redis::RedisError),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Forbidden => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidTransition(_) => "INVALID_TRANSITION",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            #[cfg(feature = "cache")]
            AppError::Cache(_) => "CACHE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this is an expected business outcome rather than a fault.
    pub fn is_business(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidCredentials
                | AppError::Forbidden
                | AppError::NotFound(_)
                | AppError::InvalidTransition(_)
        )
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidTransition(_) => "Action not allowed in current state".to_string(),
            AppError::Forbidden => "You do not have permission to perform this action".to_string(),

            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                "A storage error occurred".to_string()
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                "Stored data could not be read".to_string()
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {:?}", e);
                "A storage error occurred".to_string()
            }
            #[cfg(feature = "cache")]
            AppError::Cache(e) => {
                tracing::error!("Cache error: {:?}", e);
                "A storage error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Password(msg) => AppError::Validation(msg),
            DomainError::NotFound(entity) => AppError::NotFound(entity),
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
            DomainError::InvalidTransition(msg) => AppError::InvalidTransition(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(entity))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        AppError::InvalidTransition(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_business_kinds() {
        let cases = [
            (DomainError::validation("x"), "VALIDATION_ERROR"),
            (DomainError::password("weak"), "VALIDATION_ERROR"),
            (DomainError::not_found("Order"), "NOT_FOUND"),
            (DomainError::Forbidden, "FORBIDDEN"),
            (DomainError::InvalidCredentials, "INVALID_CREDENTIALS"),
            (DomainError::invalid_transition("done"), "INVALID_TRANSITION"),
        ];
        for (domain, code) in cases {
            let err = AppError::from(domain);
            assert_eq!(err.code(), code);
            assert!(err.is_business());
        }
    }

    #[test]
    fn test_credentials_message_is_generic() {
        assert_eq!(
            AppError::InvalidCredentials.user_message(),
            "Invalid username or password"
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::storage("disk full at /var/lib/market");
        assert!(!err.user_message().contains("/var/lib"));
        assert!(!err.is_business());
    }

    #[test]
    fn test_not_found_names_entity() {
        let err: AppResult<()> = None.ok_or_not_found("Offer");
        assert_eq!(err.unwrap_err().to_string(), "Offer not found");
    }
}
