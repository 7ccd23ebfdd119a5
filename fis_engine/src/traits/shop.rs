use fortnite_tools::{data_objects::ShopPayload, FortniteApi, FortniteApiError, ShopSnapshot};
use thiserror::Error;

/// The upstream fetch seam of the catalog cache. [`FortniteApi`] is the production implementation;
/// tests substitute stubs to exercise cache policy without the network.
#[allow(async_fn_in_trait)]
pub trait ShopFetcher {
    async fn fetch_shop(&self) -> Result<ShopPayload, FortniteApiError>;
}

impl ShopFetcher for FortniteApi {
    async fn fetch_shop(&self) -> Result<ShopPayload, FortniteApiError> {
        FortniteApi::fetch_shop(self).await
    }
}

#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    #[error("Could not persist the shop snapshot: {0}")]
    WriteFailed(String),
}

/// Durable storage for the last good shop snapshot.
///
/// `load` never fails: a missing or corrupt document reads as `None`, which sends the caller down
/// the fetch path.
pub trait SnapshotStore {
    fn load(&self) -> Option<ShopSnapshot>;
    fn save(&self, snapshot: &ShopSnapshot) -> Result<(), SnapshotStoreError>;
}
