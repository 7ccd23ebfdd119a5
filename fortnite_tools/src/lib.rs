mod api;
mod config;
mod error;
mod pricing;
mod shop;

pub mod data_objects;

pub use api::FortniteApi;
pub use config::FortniteApiConfig;
pub use error::FortniteApiError;
pub use pricing::PriceEstimator;
pub use shop::{canonical_prices, normalize_shop, BundleMember, ItemImages, RelatedItem, ShopItem, ShopSnapshot};
