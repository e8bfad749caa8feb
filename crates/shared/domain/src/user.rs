//! User domain entity and related types.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::constants::{MIN_USERNAME_LENGTH, ROLE_BOTH, ROLE_BUYER, ROLE_MANUFACTURER};
use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Buyer,
    Manufacturer,
    Both,
}

impl UserRole {
    /// Whether this role may post orders
    pub fn can_buy(&self) -> bool {
        matches!(self, UserRole::Buyer | UserRole::Both)
    }

    /// Whether this role may submit offers
    pub fn can_manufacture(&self) -> bool {
        matches!(self, UserRole::Manufacturer | UserRole::Both)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Buyer => ROLE_BUYER,
            UserRole::Manufacturer => ROLE_MANUFACTURER,
            UserRole::Both => ROLE_BOTH,
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_BUYER => Ok(UserRole::Buyer),
            ROLE_MANUFACTURER => Ok(UserRole::Manufacturer),
            ROLE_BOTH => Ok(UserRole::Both),
            other => Err(DomainError::validation(format!("Unknown role: {}", other))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted identity record.
///
/// `password` holds the Argon2 hash. This type never leaves the identity
/// service; callers receive [`User`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl UserRecord {
    /// Create a new record with a freshly generated id.
    pub fn new(username: String, password: Password, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password: password.into_string(),
            role,
            created_at: Utc::now(),
        }
    }

    /// Verify a login attempt against the stored hash.
    pub fn verify_password(&self, plain_text: &str) -> bool {
        Password::from_hash(self.password.as_str()).verify(plain_text)
    }
}

/// User as returned to callers (password stripped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            role: record.role,
            created_at: record.created_at,
        }
    }
}

impl From<&UserRecord> for User {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            username: record.username.clone(),
            role: record.role,
            created_at: record.created_at,
        }
    }
}

/// Registration form.
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    #[validate(custom(function = "validate_username"))]
    pub username: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    #[validate(
        length(min = 1, message = "Password confirmation is required"),
        must_match(other = "password", message = "Passwords do not match")
    )]
    pub confirm_password: String,
    #[serde(default)]
    pub role: UserRole,
}

impl std::fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUser")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

impl RegisterUser {
    /// Fields in the order their errors are reported.
    const FIELD_ORDER: [&'static str; 3] = ["username", "password", "confirm_password"];

    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            role: UserRole::default(),
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// Validate the form and report the first failing field.
    pub fn check(&self) -> DomainResult<()> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };
        let field_errors = errors.field_errors();
        let message = Self::FIELD_ORDER
            .iter()
            .filter_map(|field| field_errors.get(*field))
            .filter_map(|errors| errors.first())
            .find_map(|error| error.message.as_ref())
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| "Validation failed".to_string());
        Err(DomainError::Validation(message))
    }
}

fn policy_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(policy_error(
            "username_required",
            "Username is required".to_string(),
        ));
    }
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(policy_error(
            "username_length",
            format!(
                "Username must contain at least {} characters",
                MIN_USERNAME_LENGTH
            ),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(policy_error(
            "password_required",
            "Password is required".to_string(),
        ));
    }
    match Password::check_policy(password) {
        Ok(()) => Ok(()),
        Err(DomainError::Password(msg)) => Err(policy_error("password_policy", msg)),
        Err(other) => Err(policy_error("password_policy", other.to_string())),
    }
}
