//! The item-shop catalog cache: TTL freshness, stale-on-error fallback and durable snapshot
//! storage.
mod api;
mod errors;
mod store;

pub use api::{CatalogApi, DEFAULT_SHOP_TTL_SECS};
pub use errors::CatalogError;
pub use store::{FileSnapshotStore, DEFAULT_SNAPSHOT_PATH};
