//! The behaviour contracts the engine APIs are generic over. Server endpoint tests mock these.
mod shop;
mod storefront_database;

pub use shop::{ShopFetcher, SnapshotStore, SnapshotStoreError};
pub use storefront_database::{StorefrontApiError, StorefrontDatabase};
