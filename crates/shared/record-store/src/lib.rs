//! Record Store
//!
//! The persistence collaborator every marketplace service depends on: a
//! key-value mapping from string keys to JSON values with get/set/remove,
//! plus typed list helpers built on top of it.
//!
//! Backends:
//! - [`MemoryStore`]: process-local, used by tests and the demo
//! - [`FileStore`]: one JSON document on disk, atomic replace on write
//! - `RedisStore` (feature `redis`): JSON strings in Redis

pub mod collection;
pub mod file;
pub mod keys;
#[cfg(feature = "redis")]
pub mod redis_store;
pub mod store;

pub use collection::{load_list, save_list, Collection};
pub use file::FileStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisStore;
pub use store::{MemoryStore, RecordStore};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockRecordStore;
