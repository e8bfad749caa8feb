//! Marketplace assembly: one record store, every service wired to it.

pub mod config;
pub mod seed;

use std::sync::Arc;

use tracing::info;

use common::{AppResult, StoreBackend, StoreConfig};
use identity_service::IdentityService;
use notification_service::NotificationFeed;
use offer_service::OfferLedger;
use order_service::OrderCatalog;
use record_store::{FileStore, MemoryStore, RecordStore, RedisStore};

pub use config::MarketConfig;

/// Open the configured record store backend.
pub async fn open_store(config: &StoreConfig) -> AppResult<Arc<dyn RecordStore>> {
    let store: Arc<dyn RecordStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File => Arc::new(FileStore::open(config.path.clone()).await?),
        StoreBackend::Redis => {
            Arc::new(RedisStore::connect(&config.redis_url, config.redis_prefix.clone()).await?)
        }
    };
    info!(backend = ?config.backend, "Record store opened");
    Ok(store)
}

/// Every marketplace service over one shared store.
///
/// Services are built once per store so that each collection has a single
/// writer inside the process.
#[derive(Clone)]
pub struct Marketplace {
    store: Arc<dyn RecordStore>,
    identity: Arc<dyn IdentityService>,
    orders: Arc<dyn OrderCatalog>,
    offers: Arc<dyn OfferLedger>,
    notifications: Arc<dyn NotificationFeed>,
}

impl Marketplace {
    pub fn new(store: Arc<dyn RecordStore>, config: &MarketConfig) -> Self {
        let identity = identity_service::init(store.clone(), &config.identity);
        let orders = order_service::init(store.clone());
        let notifications = notification_service::init(store.clone());
        let offers = offer_service::init(store.clone(), orders.clone(), notifications.clone());

        Self {
            store,
            identity,
            orders,
            offers,
            notifications,
        }
    }

    /// Open the configured store, install demo data if enabled, and wire
    /// the services.
    pub async fn open(config: &MarketConfig) -> AppResult<Self> {
        let store = open_store(&config.store).await?;
        if config.seed_demo {
            seed::install(store.as_ref()).await?;
        }
        Ok(Self::new(store, config))
    }

    pub fn store(&self) -> Arc<dyn RecordStore> {
        self.store.clone()
    }

    pub fn identity(&self) -> Arc<dyn IdentityService> {
        self.identity.clone()
    }

    pub fn orders(&self) -> Arc<dyn OrderCatalog> {
        self.orders.clone()
    }

    pub fn offers(&self) -> Arc<dyn OfferLedger> {
        self.offers.clone()
    }

    pub fn notifications(&self) -> Arc<dyn NotificationFeed> {
        self.notifications.clone()
    }
}
