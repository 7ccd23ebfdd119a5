//! The catalog normalizer. Flattens the upstream entry structure into the item list the
//! storefront frontend renders, resolving named bundles, outfit and accessory pairs, unnamed
//! multi-item packs and plain single items.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fis_common::{helpers::slugify, Vbucks};
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data_objects::{BrItem, CarItem, CosmeticImages, ItemType, Rarity, ShopData, ShopEntry};

/// The sentinel category used when the upstream type display value is missing or empty.
pub const OTHER_TYPE: &str = "Other";

/// Distinct sub-item names kept before an unnamed pack label is truncated.
const MAX_PACK_NAME_PARTS: usize = 5;

//--------------------------------------    Output types   -----------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemImages {
    pub icon: Option<String>,
    pub featured: Option<String>,
    pub small_icon: Option<String>,
}

/// A bundle member. Metadata only, members are never independently purchasable rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleMember {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub rarity: String,
    pub images: ItemImages,
}

/// The accessory attached to an outfit in a paired-cosmetic entry. Shown on the detail view,
/// never as its own row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub rarity: String,
    pub description: String,
    pub images: ItemImages,
}

/// One row of the normalized catalog. Field names follow the JSON contract the frontend already
/// consumes, hence the mixed casing on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopItem {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub rarity: String,
    pub vbucks: Vbucks,
    pub regular_price: Vbucks,
    pub images: ItemImages,
    pub giftable: bool,
    pub refundable: bool,
    #[serde(rename = "inDate")]
    pub in_date: String,
    #[serde(rename = "outDate")]
    pub out_date: String,
    pub is_bundle: bool,
    pub bundle_items: Vec<BundleMember>,
    pub has_related_items: bool,
    pub related_items: Vec<RelatedItem>,
    #[serde(rename = "vehicleId", skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
}

/// The cached, normalized shop. The serialized shape matches the document the original backend
/// persisted, so existing cache files and frontend consumers keep working.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSnapshot {
    pub date: String,
    pub total_items: usize,
    pub items: Vec<ShopItem>,
    #[serde(rename = "vbuckIcon", default)]
    pub vbuck_icon: String,
    #[serde(default)]
    pub raw_data: Value,
    pub last_updated: DateTime<Utc>,
}

impl ShopSnapshot {
    /// Age of the snapshot relative to `now`. Clock skew yields a zero age rather than a panic.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        (now - self.last_updated).max(chrono::Duration::zero())
    }
}

//--------------------------------------    Normalization  -----------------------------------------------------------

/// Normalize one upstream shop payload into a snapshot stamped with `fetched_at`.
///
/// Items appear in entry order; within an entry, cosmetics precede vehicles. Normalizing the same
/// payload twice produces identical item lists, only `last_updated` varies.
pub fn normalize_shop(shop: &ShopData, raw: Value, fetched_at: DateTime<Utc>) -> ShopSnapshot {
    let canonical = canonical_prices(&shop.entries);
    if !canonical.is_empty() {
        debug!("Canonical price census covers {} single-offer sub-items", canonical.len());
    }
    let mut items = Vec::with_capacity(shop.entries.len());
    for entry in &shop.entries {
        items.extend(classify_entry(entry));
    }
    let vehicles = items.iter().filter(|i| i.vehicle_id.is_some()).count();
    info!("Normalized shop for {}: {} items ({} vehicles)", shop.date, items.len(), vehicles);
    ShopSnapshot {
        date: shop.date.clone(),
        total_items: items.len(),
        items,
        vbuck_icon: shop.vbuck_icon.clone(),
        raw_data: raw,
        last_updated: fetched_at,
    }
}

/// The whole-catalog price census. For every sub-item that appears alone in an entry, the most
/// frequently observed final price wins; ties go to the price observed first.
///
/// The mapping is logged for diagnostics but is deliberately NOT applied when items are emitted.
/// Entries keep their own prices, matching the behavior the storefront has always had. Changing
/// that is a product decision, not a refactor.
pub fn canonical_prices(entries: &[ShopEntry]) -> HashMap<String, Vbucks> {
    let mut observed: HashMap<String, Vec<(Vbucks, usize)>> = HashMap::new();
    for entry in entries.iter().filter(|e| e.sub_item_count() == 1) {
        let id = entry
            .br_items
            .first()
            .map(|i| i.id.clone())
            .or_else(|| entry.cars.first().map(vehicle_item_id))
            .unwrap_or_default();
        if id.is_empty() {
            continue;
        }
        let counts = observed.entry(id).or_default();
        match counts.iter_mut().find(|(price, _)| *price == entry.final_price) {
            Some((_, n)) => *n += 1,
            None => counts.push((entry.final_price, 1)),
        }
    }
    observed
        .into_iter()
        .filter_map(|(id, counts)| {
            if counts.len() > 1 {
                debug!("Sub-item {id} listed at {} different prices: {counts:?}", counts.len());
            }
            // max_by_key keeps the last maximum, so scan manually to keep the first observed.
            let mut best: Option<(Vbucks, usize)> = None;
            for (price, n) in counts {
                if best.map(|(_, m)| n > m).unwrap_or(true) {
                    best = Some((price, n));
                }
            }
            best.map(|(price, _)| (id, price))
        })
        .collect()
}

/// Apply the entry classification steps in order. The first matching step consumes the entry.
fn classify_entry(entry: &ShopEntry) -> Vec<ShopItem> {
    let count = entry.sub_item_count();
    if count == 0 {
        return Vec::new();
    }
    if count > 1 {
        if let Some(bundle) = entry.bundle.as_ref() {
            let name = if bundle.name.trim().is_empty() { "Pack".to_string() } else { bundle.name.clone() };
            return vec![bundle_item(entry, name, bundle.image.clone(), bundle.info.clone())];
        }
    }
    if entry.cars.is_empty() && entry.br_items.len() == 2 {
        if let Some(item) = paired_cosmetic(entry) {
            return vec![item];
        }
    }
    if count > 1 {
        return vec![bundle_item(entry, unnamed_pack_name(entry), None, String::new())];
    }
    single_items(entry)
}

// Step 1 and step 3 share the emitted shape, only the label and image source differ.
fn bundle_item(entry: &ShopEntry, name: String, bundle_image: Option<String>, description: String) -> ShopItem {
    let image = bundle_image
        .filter(|i| !i.is_empty())
        .or_else(|| first_render_image(entry))
        .or_else(|| first_sub_item_image(entry));
    let id = entry
        .offer_id
        .clone()
        .filter(|o| !o.is_empty())
        .unwrap_or_else(|| format!("pack-{}", slugify(&name)));
    let mut members: Vec<BundleMember> = entry.br_items.iter().map(cosmetic_member).collect();
    members.extend(entry.cars.iter().map(vehicle_member));
    ShopItem {
        id,
        name,
        description,
        item_type: "Pack".to_string(),
        rarity: "Pack".to_string(),
        vbucks: entry.final_price,
        regular_price: entry.regular_price,
        images: ItemImages { icon: image.clone(), featured: image, small_icon: None },
        giftable: entry.giftable,
        refundable: entry.refundable,
        in_date: entry.in_date.clone(),
        out_date: entry.out_date.clone(),
        is_bundle: true,
        bundle_items: members,
        ..Default::default()
    }
}

// Step 2. Exactly two cosmetics where one is an outfit and the other an accessory.
fn paired_cosmetic(entry: &ShopEntry) -> Option<ShopItem> {
    let (a, b) = (&entry.br_items[0], &entry.br_items[1]);
    let (outfit, accessory) = if is_outfit(a) && is_accessory(b) {
        (a, b)
    } else if is_outfit(b) && is_accessory(a) {
        (b, a)
    } else {
        return None;
    };
    let mut item = cosmetic_item(entry, outfit);
    item.has_related_items = true;
    item.related_items = vec![RelatedItem {
        id: accessory.id.clone(),
        name: accessory.name.clone(),
        item_type: display_type(&accessory.item_type),
        rarity: display_rarity(&accessory.rarity),
        description: accessory.description.clone(),
        images: cosmetic_images(&accessory.images),
    }];
    Some(item)
}

// Step 4. One row per cosmetic, then one per vehicle.
fn single_items(entry: &ShopEntry) -> Vec<ShopItem> {
    let mut items: Vec<ShopItem> = entry.br_items.iter().map(|i| cosmetic_item(entry, i)).collect();
    items.extend(entry.cars.iter().map(|c| vehicle_item(entry, c)));
    items
}

fn cosmetic_item(entry: &ShopEntry, item: &BrItem) -> ShopItem {
    ShopItem {
        id: item.id.clone(),
        name: item.name.clone(),
        description: item.description.clone(),
        item_type: display_type(&item.item_type),
        rarity: display_rarity(&item.rarity),
        vbucks: entry.final_price,
        regular_price: entry.regular_price,
        images: cosmetic_images(&item.images),
        giftable: entry.giftable,
        refundable: entry.refundable,
        in_date: entry.in_date.clone(),
        out_date: entry.out_date.clone(),
        ..Default::default()
    }
}

fn vehicle_item(entry: &ShopEntry, car: &CarItem) -> ShopItem {
    let images = car.images.clone().unwrap_or_default();
    ShopItem {
        id: vehicle_item_id(car),
        name: car.name.clone(),
        description: car.description.clone(),
        item_type: display_type(&car.item_type),
        rarity: display_rarity(&car.rarity),
        vbucks: entry.final_price,
        regular_price: entry.regular_price,
        images: ItemImages {
            icon: images.small.clone().or_else(|| images.large.clone()),
            featured: images.large.clone().or_else(|| images.small.clone()),
            small_icon: images.small,
        },
        giftable: entry.giftable,
        refundable: entry.refundable,
        in_date: entry.in_date.clone(),
        out_date: entry.out_date.clone(),
        vehicle_id: Some(if car.vehicle_id.is_empty() { car.id.clone() } else { car.vehicle_id.clone() }),
        ..Default::default()
    }
}

fn cosmetic_member(item: &BrItem) -> BundleMember {
    BundleMember {
        id: item.id.clone(),
        name: item.name.clone(),
        item_type: display_type(&item.item_type),
        rarity: display_rarity(&item.rarity),
        images: cosmetic_images(&item.images),
    }
}

fn vehicle_member(car: &CarItem) -> BundleMember {
    let images = car.images.clone().unwrap_or_default();
    BundleMember {
        id: vehicle_item_id(car),
        name: car.name.clone(),
        item_type: display_type(&car.item_type),
        rarity: display_rarity(&car.rarity),
        images: ItemImages {
            icon: images.small.clone().or_else(|| images.large.clone()),
            featured: images.large.or(images.small.clone()),
            small_icon: images.small,
        },
    }
}

fn vehicle_item_id(car: &CarItem) -> String {
    if car.id.is_empty() {
        car.vehicle_id.clone()
    } else {
        car.id.clone()
    }
}

/// Label for an unnamed multi-item pack: up to five distinct sub-item names joined with " + ",
/// with a "+ N autre(s)" suffix when truncated.
fn unnamed_pack_name(entry: &ShopEntry) -> String {
    let mut names: Vec<&str> = Vec::new();
    for name in entry.br_items.iter().map(|i| i.name.as_str()).chain(entry.cars.iter().map(|c| c.name.as_str())) {
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    if names.is_empty() {
        return "Pack".to_string();
    }
    let extra = names.len().saturating_sub(MAX_PACK_NAME_PARTS);
    names.truncate(MAX_PACK_NAME_PARTS);
    let mut label = names.join(" + ");
    if extra > 0 {
        label.push_str(&format!(" + {extra} autre(s)"));
    }
    label
}

fn first_render_image(entry: &ShopEntry) -> Option<String> {
    entry
        .new_display_asset
        .as_ref()
        .and_then(|asset| asset.render_images.iter().find_map(|r| r.image.clone()))
        .filter(|i| !i.is_empty())
}

fn first_sub_item_image(entry: &ShopEntry) -> Option<String> {
    let cosmetic = entry
        .br_items
        .iter()
        .filter_map(|i| i.images.as_ref())
        .find_map(|images| images.featured.clone().or_else(|| images.icon.clone()));
    cosmetic.or_else(|| {
        entry
            .cars
            .iter()
            .filter_map(|c| c.images.as_ref())
            .find_map(|images| images.large.clone().or_else(|| images.small.clone()))
    })
}

fn cosmetic_images(images: &Option<CosmeticImages>) -> ItemImages {
    let images = images.clone().unwrap_or_default();
    ItemImages { icon: images.icon, featured: images.featured, small_icon: images.small_icon }
}

fn display_type(item_type: &Option<ItemType>) -> String {
    match item_type.as_ref().map(|t| t.display_value.trim()) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => OTHER_TYPE.to_string(),
    }
}

fn display_rarity(rarity: &Option<Rarity>) -> String {
    match rarity.as_ref().map(|r| r.display_value.trim()) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => OTHER_TYPE.to_string(),
    }
}

fn type_kind(item: &BrItem) -> String {
    item.item_type
        .as_ref()
        .map(|t| if t.value.trim().is_empty() { t.display_value.trim() } else { t.value.trim() })
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn is_outfit(item: &BrItem) -> bool {
    matches!(type_kind(item).as_str(), "outfit" | "character")
}

fn is_accessory(item: &BrItem) -> bool {
    matches!(
        type_kind(item).as_str(),
        "backpack" | "backbling" | "back bling" | "pickaxe" | "glider" | "emote" | "wrap" | "music" | "musicpack"
    )
}
