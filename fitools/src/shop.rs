use std::time::Duration;

use fis_engine::{
    catalog::{DEFAULT_SHOP_TTL_SECS, DEFAULT_SNAPSHOT_PATH},
    CatalogApi,
    FileSnapshotStore,
};
use fortnite_tools::{FortniteApi, FortniteApiConfig, ShopSnapshot};
use prettytable::{row, Table};

fn catalog() -> anyhow::Result<CatalogApi<FortniteApi, FileSnapshotStore>> {
    let api = FortniteApi::new(FortniteApiConfig::new_from_env_or_default())?;
    let path = std::env::var("FIS_SHOP_CACHE_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let ttl = std::env::var("FIS_SHOP_TTL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SHOP_TTL_SECS);
    Ok(CatalogApi::new(api, FileSnapshotStore::new(path), Duration::from_secs(ttl)))
}

pub async fn fetch_shop(refresh: bool) -> anyhow::Result<()> {
    let snapshot = catalog()?.get_shop(refresh).await?;
    print_snapshot(&snapshot);
    Ok(())
}

pub async fn refresh_shop() -> anyhow::Result<()> {
    let snapshot = catalog()?.refresh_shop().await?;
    println!("Snapshot refreshed.");
    print_snapshot(&snapshot);
    Ok(())
}

fn print_snapshot(snapshot: &ShopSnapshot) {
    println!("Item shop for {} ({} items, fetched {})", snapshot.date, snapshot.total_items, snapshot.last_updated);
    let mut table = Table::new();
    table.set_titles(row!["Id", "Name", "Type", "Rarity", "V-Bucks", "Flags"]);
    for item in &snapshot.items {
        let mut flags = Vec::new();
        if item.is_bundle {
            flags.push(format!("bundle of {}", item.bundle_items.len()));
        }
        if item.has_related_items {
            flags.push(format!("+{} related", item.related_items.len()));
        }
        if item.vehicle_id.is_some() {
            flags.push("vehicle".to_string());
        }
        table.add_row(row![item.id, item.name, item.item_type, item.rarity, item.vbucks, flags.join(", ")]);
    }
    table.printstd();
}
