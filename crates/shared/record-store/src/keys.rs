//! Storage keys shared by every service.

/// Global list of identity records
pub const USERS: &str = "users";

/// Global list of orders
pub const ORDERS: &str = "orders";

/// Global list of offers
pub const OFFERS: &str = "offers";

/// Currently signed-in user
pub const SESSION: &str = "user";

/// Notification id -> recipient user id
pub const NOTIFICATION_OWNERS: &str = "notification_owners";

const NOTIFICATIONS_PREFIX: &str = "notifications_";

/// Per-user notification list key
pub fn notifications(user_id: &str) -> String {
    format!("{}{}", NOTIFICATIONS_PREFIX, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_keys_are_per_user() {
        assert_eq!(notifications("user1"), "notifications_user1");
        assert_ne!(notifications("a"), notifications("b"));
    }
}
