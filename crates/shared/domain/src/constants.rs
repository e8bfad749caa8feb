//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Role assigned to newly registered users
pub const ROLE_BUYER: &str = "buyer";

/// Role for users who submit offers
pub const ROLE_MANUFACTURER: &str = "manufacturer";

/// Role for users who both buy and manufacture
pub const ROLE_BOTH: &str = "both";

// =============================================================================
// Validation
// =============================================================================

/// Minimum username length requirement
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters accepted as the "special character" of the password policy
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

// =============================================================================
// Notification texts
// =============================================================================

pub const TITLE_NEW_OFFER: &str = "New offer";
pub const TITLE_OFFER_ACCEPTED: &str = "Offer accepted";
pub const TITLE_OFFER_REJECTED: &str = "Offer rejected";
