//! Demo catalog installed on first start.
//!
//! Only keys that are absent are written; existing data is never replaced.

use serde_json::{json, Map, Value};
use tracing::info;

use common::{AppError, AppResult};
use record_store::{keys, RecordStore};

/// Install the demo records. Returns how many keys were written.
pub async fn install(store: &dyn RecordStore) -> AppResult<usize> {
    let mut written = 0;

    for (key, records) in [(keys::ORDERS, demo_orders()), (keys::OFFERS, demo_offers())] {
        if store.get(key).await?.is_none() {
            store.set(key, records).await?;
            written += 1;
        }
    }

    let mut owners = match store.get(keys::NOTIFICATION_OWNERS).await? {
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(AppError::storage(
                "Notification owner index is not a JSON object",
            ))
        }
        None => Map::new(),
    };
    let mut owners_changed = false;

    for (user_id, notification) in demo_notifications() {
        let key = keys::notifications(user_id);
        if store.get(&key).await?.is_some() {
            continue;
        }
        if let Some(id) = notification.get("id").and_then(Value::as_str) {
            owners.insert(id.to_string(), Value::from(user_id));
            owners_changed = true;
        }
        store.set(&key, json!([notification])).await?;
        written += 1;
    }

    if owners_changed {
        store
            .set(keys::NOTIFICATION_OWNERS, Value::Object(owners))
            .await?;
    }

    info!(written, "Demo data installed");
    Ok(written)
}

fn demo_orders() -> Value {
    json!([
        {
            "id": "1",
            "userId": "user1",
            "title": "Nike sneakers",
            "description": "Looking for quality Nike sneakers for running, size 42, black color",
            "filters": { "price": { "min": 5000, "max": 15000 }, "color": "black", "size": "42" },
            "status": "active",
            "createdAt": "2024-01-15T10:00:00Z"
        },
        {
            "id": "2",
            "userId": "user2",
            "title": "iPhone smartphone",
            "description": "Need an iPhone in good condition, no older than 2 years",
            "filters": { "price": { "min": 30000, "max": 80000 }, "color": "any" },
            "status": "active",
            "createdAt": "2024-01-14T15:30:00Z"
        },
        {
            "id": "3",
            "userId": "user3",
            "title": "Winter jacket",
            "description": "Warm winter jacket for men, size L, dark color",
            "filters": { "price": { "min": 3000, "max": 12000 }, "color": "dark", "size": "L" },
            "status": "active",
            "createdAt": "2024-01-13T09:15:00Z"
        }
    ])
}

fn demo_offers() -> Value {
    json!([
        {
            "id": "1",
            "orderId": "1",
            "manufacturerId": "man1",
            "manufacturerUsername": "sport_shop",
            "price": 12000,
            "description": "Great Nike Air Max sneakers, practically new, worn 2 times",
            "images": ["https://via.placeholder.com/300x200?text=Nike+Air+Max"],
            "characteristics": "Size: 42, Color: black, Condition: excellent",
            "status": "pending",
            "createdAt": "2024-01-15T12:00:00Z"
        },
        {
            "id": "2",
            "orderId": "2",
            "manufacturerId": "man2",
            "manufacturerUsername": "tech_store",
            "price": 45000,
            "description": "iPhone 13 in excellent condition, battery 95%, all functions work",
            "images": ["https://via.placeholder.com/300x200?text=iPhone+13"],
            "characteristics": "Model: iPhone 13, Memory: 128GB, Color: blue, Condition: excellent",
            "status": "pending",
            "createdAt": "2024-01-14T18:00:00Z"
        }
    ])
}

fn demo_notifications() -> Vec<(&'static str, Value)> {
    vec![
        (
            "user1",
            json!({
                "id": "1",
                "userId": "user1",
                "type": "new_offer",
                "title": "New offer",
                "message": "Received a new offer for your order \"Nike sneakers\"",
                "orderId": "1",
                "offerId": "1",
                "read": false,
                "createdAt": "2024-01-15T12:00:00Z"
            }),
        ),
        (
            "user2",
            json!({
                "id": "2",
                "userId": "user2",
                "type": "new_offer",
                "title": "New offer",
                "message": "Received a new offer for your order \"iPhone smartphone\"",
                "orderId": "2",
                "offerId": "2",
                "read": false,
                "createdAt": "2024-01-14T18:00:00Z"
            }),
        ),
    ]
}
