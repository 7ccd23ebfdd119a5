use std::{collections::HashMap, sync::Mutex};

use fis_common::{Fcfa, Vbucks};

pub const DEFAULT_COST_PER_VBUCK_USD: f64 = 0.00357;
pub const DEFAULT_MARGIN: f64 = 0.50;
pub const DEFAULT_USD_TO_XOF: f64 = 580.0;

/// Estimates an FCFA selling price for a V-Bucks amount.
///
/// cost = vbucks * cost_per_vbuck_usd, marked up by `margin`, converted at `usd_to_xof` and
/// rounded to the nearest 100 FCFA. Estimates are memoized per instance; there is no process-wide
/// cache, so two estimators with different parameters never interfere.
pub struct PriceEstimator {
    cost_per_vbuck_usd: f64,
    margin: f64,
    usd_to_xof: f64,
    cache: Mutex<HashMap<i64, Fcfa>>,
}

impl Default for PriceEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_COST_PER_VBUCK_USD, DEFAULT_MARGIN, DEFAULT_USD_TO_XOF)
    }
}

impl PriceEstimator {
    pub fn new(cost_per_vbuck_usd: f64, margin: f64, usd_to_xof: f64) -> Self {
        Self { cost_per_vbuck_usd, margin, usd_to_xof, cache: Mutex::new(HashMap::new()) }
    }

    pub fn estimate(&self, vbucks: Vbucks) -> Fcfa {
        if let Ok(cache) = self.cache.lock() {
            if let Some(price) = cache.get(&vbucks.value()) {
                return *price;
            }
        }
        let usd = vbucks.value() as f64 * self.cost_per_vbuck_usd * (1.0 + self.margin);
        let xof = usd * self.usd_to_xof;
        let price = Fcfa::from(((xof / 100.0).round() as i64) * 100);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(vbucks.value(), price);
        }
        price
    }
}
