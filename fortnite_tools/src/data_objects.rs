//! Serde representations of the upstream fortnite-api.com `/v2/shop` payload.
//!
//! Only the fields the normalizer consumes are modelled explicitly; everything else rides along in
//! the snapshot's `raw_data` field untouched.

use fis_common::Vbucks;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top level response envelope. `data` is absent when the upstream reports an error.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopResponse {
    pub status: i64,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// The `data` object of a successful response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopData {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub entries: Vec<ShopEntry>,
    #[serde(default)]
    pub vbuck_icon: String,
}

/// One storefront offer. An entry sells 1..N sub-items (cosmetics and/or vehicles) for one price.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShopEntry {
    pub final_price: Vbucks,
    pub regular_price: Vbucks,
    pub offer_id: Option<String>,
    pub bundle: Option<BundleInfo>,
    pub br_items: Vec<BrItem>,
    pub cars: Vec<CarItem>,
    pub new_display_asset: Option<NewDisplayAsset>,
    pub giftable: bool,
    pub refundable: bool,
    pub in_date: String,
    pub out_date: String,
}

impl ShopEntry {
    /// Total number of purchasable sub-items in the entry.
    pub fn sub_item_count(&self) -> usize {
        self.br_items.len() + self.cars.len()
    }
}

/// The explicit bundle tag upstream attaches to named bundles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewDisplayAsset {
    pub render_images: Vec<RenderImage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderImage {
    pub image: Option<String>,
}

/// A Battle Royale cosmetic sub-item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrItem {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub rarity: Option<Rarity>,
    pub images: Option<CosmeticImages>,
}

/// A Rocket Racing vehicle sub-item. Its image set uses `small`/`large` rather than the
/// cosmetic `icon`/`featured` pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarItem {
    pub id: String,
    pub vehicle_id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub rarity: Option<Rarity>,
    pub images: Option<VehicleImages>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemType {
    pub value: String,
    pub display_value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rarity {
    pub value: String,
    pub display_value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CosmeticImages {
    pub icon: Option<String>,
    pub featured: Option<String>,
    pub small_icon: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleImages {
    pub small: Option<String>,
    pub large: Option<String>,
}

/// A successfully fetched shop payload: the typed view used by the normalizer plus the raw
/// upstream `data` value retained for compatibility.
#[derive(Debug, Clone)]
pub struct ShopPayload {
    pub shop: ShopData,
    pub raw: Value,
}
