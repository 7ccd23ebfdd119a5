use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Utc;
use fis_engine::{
    traits::{ShopFetcher, SnapshotStore, SnapshotStoreError},
    CatalogApi,
};
use fortnite_tools::{
    data_objects::{BrItem, ItemType, ShopData, ShopEntry, ShopPayload},
    normalize_shop,
    FortniteApiError,
    ShopSnapshot,
};
use serde_json::{json, Value};

use super::helpers::{get_request, post_request};
use crate::routes::{ShopRefreshRoute, ShopRoute};

const TTL_SECS: u64 = 900;

#[derive(Clone)]
struct StubFetcher {
    payload: Option<ShopPayload>,
}

impl ShopFetcher for StubFetcher {
    async fn fetch_shop(&self) -> Result<ShopPayload, FortniteApiError> {
        match &self.payload {
            Some(payload) => Ok(payload.clone()),
            None => Err(FortniteApiError::FetchFailed("stub upstream is offline".to_string())),
        }
    }
}

/// An in-memory snapshot store, so endpoint tests need no filesystem.
#[derive(Clone, Default)]
struct MemoryStore {
    inner: Arc<Mutex<Option<ShopSnapshot>>>,
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<ShopSnapshot> {
        self.inner.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, snapshot: &ShopSnapshot) -> Result<(), SnapshotStoreError> {
        match self.inner.lock() {
            Ok(mut guard) => {
                *guard = Some(snapshot.clone());
                Ok(())
            },
            Err(e) => Err(SnapshotStoreError::WriteFailed(e.to_string())),
        }
    }
}

fn sample_payload(date: &str) -> ShopPayload {
    let item = BrItem {
        id: "cid-030-raven".to_string(),
        name: "Raven".to_string(),
        item_type: Some(ItemType { value: "outfit".to_string(), display_value: "Tenue".to_string() }),
        ..Default::default()
    };
    let entry =
        ShopEntry { final_price: 2000.into(), regular_price: 2000.into(), br_items: vec![item], ..Default::default() };
    let shop = ShopData { date: date.to_string(), entries: vec![entry], vbuck_icon: "vbuck.png".to_string() };
    ShopPayload { shop, raw: json!({"date": date}) }
}

fn aged_snapshot(date: &str, age: chrono::Duration) -> ShopSnapshot {
    let payload = sample_payload(date);
    normalize_shop(&payload.shop, payload.raw, Utc::now() - age)
}

fn configure(fetcher: StubFetcher, store: MemoryStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = CatalogApi::new(fetcher, store, Duration::from_secs(TTL_SECS));
        cfg.service(ShopRoute::<StubFetcher, MemoryStore>::new())
            .service(ShopRefreshRoute::<StubFetcher, MemoryStore>::new())
            .app_data(web::Data::new(api));
    }
}

#[actix_web::test]
async fn a_fresh_snapshot_is_served_without_fetching() {
    let _ = env_logger::try_init().ok();
    let store = MemoryStore::default();
    store.save(&aged_snapshot("2026-08-28", chrono::Duration::seconds(60))).unwrap();
    // The fetcher is offline; serving from cache proves no fetch happened.
    let (status, body) = get_request("/shop", configure(StubFetcher { payload: None }, store)).await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["date"], "2026-08-28");
    assert_eq!(parsed["total_items"], 1);
    assert_eq!(parsed["vbuckIcon"], "vbuck.png");
}

#[actix_web::test]
async fn an_expired_snapshot_is_refreshed() {
    let _ = env_logger::try_init().ok();
    let store = MemoryStore::default();
    store.save(&aged_snapshot("2026-08-27", chrono::Duration::seconds(TTL_SECS as i64 + 1))).unwrap();
    let fetcher = StubFetcher { payload: Some(sample_payload("2026-08-28")) };
    let (status, body) = get_request("/shop", configure(fetcher, store.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["date"], "2026-08-28");
    assert_eq!(store.load().unwrap().date, "2026-08-28");
}

#[actix_web::test]
async fn refresh_query_flag_bypasses_a_fresh_cache() {
    let _ = env_logger::try_init().ok();
    let store = MemoryStore::default();
    store.save(&aged_snapshot("2026-08-28", chrono::Duration::seconds(10))).unwrap();
    let fetcher = StubFetcher { payload: Some(sample_payload("2026-08-29")) };
    let (status, body) = get_request("/shop?refresh=1", configure(fetcher, store)).await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["date"], "2026-08-29");
}

#[actix_web::test]
async fn a_failed_fetch_serves_the_stale_snapshot() {
    let _ = env_logger::try_init().ok();
    let store = MemoryStore::default();
    store.save(&aged_snapshot("2026-08-20", chrono::Duration::days(5))).unwrap();
    let (status, body) = get_request("/shop", configure(StubFetcher { payload: None }, store)).await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["date"], "2026-08-20");
}

#[actix_web::test]
async fn a_failed_fetch_with_no_snapshot_is_a_502() {
    let _ = env_logger::try_init().ok();
    let store = MemoryStore::default();
    let (status, body) = get_request("/shop", configure(StubFetcher { payload: None }, store)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert!(parsed["error"].as_str().unwrap().contains("item shop"));
}

#[actix_web::test]
async fn the_refresh_endpoint_never_serves_stale_data() {
    let _ = env_logger::try_init().ok();
    let store = MemoryStore::default();
    store.save(&aged_snapshot("2026-08-28", chrono::Duration::seconds(10))).unwrap();
    let (status, _) = post_request("/shop/refresh", json!({}), configure(StubFetcher { payload: None }, store)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
