use chrono::Utc;
use fortnite_tools::{normalize_shop, ShopSnapshot};
use log::*;

use crate::{
    catalog::CatalogError,
    traits::{ShopFetcher, SnapshotStore},
};

/// Default snapshot time-to-live: 15 minutes. Override with `FIS_SHOP_TTL_SECS`.
pub const DEFAULT_SHOP_TTL_SECS: u64 = 900;

/// The request-serving shop cache.
///
/// A stored snapshot younger than the TTL is served without touching the network. Once it ages
/// out the upstream is fetched, normalized and persisted; if that fetch fails and any stored
/// snapshot exists (however old), the stale snapshot is served instead of an error.
pub struct CatalogApi<F, S> {
    fetcher: F,
    store: S,
    ttl: chrono::Duration,
}

impl<F, S> CatalogApi<F, S> {
    pub fn new(fetcher: F, store: S, ttl: std::time::Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl)
            .unwrap_or_else(|_| chrono::Duration::seconds(DEFAULT_SHOP_TTL_SECS as i64));
        Self { fetcher, store, ttl }
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }
}

impl<F, S> CatalogApi<F, S>
where
    F: ShopFetcher,
    S: SnapshotStore,
{
    /// Serve the shop, fetching from upstream only when the stored snapshot is missing, expired,
    /// or `force_refresh` is set.
    pub async fn get_shop(&self, force_refresh: bool) -> Result<ShopSnapshot, CatalogError> {
        let cached = self.store.load();
        if !force_refresh {
            if let Some(snapshot) = cached.as_ref() {
                let age = snapshot.age(Utc::now());
                if age < self.ttl {
                    debug!("Serving cached shop snapshot ({}s old)", age.num_seconds());
                    return Ok(snapshot.clone());
                }
                debug!("Shop snapshot is {}s old (TTL {}s). Refreshing", age.num_seconds(), self.ttl.num_seconds());
            }
        }
        match self.fetch_and_store().await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => match cached {
                Some(snapshot) => {
                    warn!("Shop fetch failed ({e}). Serving the stored snapshot from {}", snapshot.last_updated);
                    Ok(snapshot)
                },
                None => Err(e),
            },
        }
    }

    /// Unconditionally fetch, normalize and persist. No stale fallback; failures propagate. This
    /// is the out-of-band refresh trigger, not the request-serving path.
    pub async fn refresh_shop(&self) -> Result<ShopSnapshot, CatalogError> {
        self.fetch_and_store().await
    }

    async fn fetch_and_store(&self) -> Result<ShopSnapshot, CatalogError> {
        let payload = self.fetcher.fetch_shop().await?;
        let snapshot = normalize_shop(&payload.shop, payload.raw, Utc::now());
        if let Err(e) = self.store.save(&snapshot) {
            // Serving the shop matters more than persisting it. The next request re-fetches.
            error!("{e}");
        }
        Ok(snapshot)
    }
}
