//! Password value object.
//!
//! Enforces the registration strength policy and stores passwords as Argon2
//! PHC strings. The persisted user record keeps the field name `password`;
//! only its encoding differs from the plain text the form submitted.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::constants::{MIN_PASSWORD_LENGTH, PASSWORD_SYMBOLS};
use crate::error::{DomainError, DomainResult};

/// Hash verified when the username is unknown, so a miss costs the same
/// as a wrong password.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$2nHRlgRTmzAPk3fpgPvlhMyiKKQ2x0jTPD3vMc3hnBE";

/// Hashed password.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Check the policy and hash the plain text.
    ///
    /// # Errors
    /// Returns `DomainError::Password` with the first policy rule violated.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Self::check_policy(plain_text)?;
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Check a candidate password against the strength policy.
    ///
    /// Rules are checked in a fixed order and the first failure is reported.
    pub fn check_policy(plain_text: &str) -> DomainResult<()> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::password(format!(
                "Password must contain at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        if !plain_text.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::password(
                "Password must contain at least one uppercase letter",
            ));
        }
        if !plain_text.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(DomainError::password(
                "Password must contain at least one lowercase letter",
            ));
        }
        if !plain_text.chars().any(|c| c.is_ascii_digit()) {
            return Err(DomainError::password(
                "Password must contain at least one digit",
            ));
        }
        if !plain_text.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
            return Err(DomainError::password(
                "Password must contain at least one special character",
            ));
        }
        Ok(())
    }

    /// Wrap an existing hash (from the record store).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Placeholder used to verify against when no user matched.
    pub fn dummy() -> Self {
        Self::from_hash(DUMMY_HASH)
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DomainError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
