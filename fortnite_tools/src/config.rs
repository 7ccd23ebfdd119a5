use std::time::Duration;

use fis_common::Secret;
use log::*;

pub const DEFAULT_SHOP_URL: &str = "https://fortnite-api.com/v2/shop";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct FortniteApiConfig {
    pub shop_url: String,
    pub api_key: Option<Secret<String>>,
    pub language: String,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub backoff_factor: f64,
}

impl Default for FortniteApiConfig {
    fn default() -> Self {
        Self {
            shop_url: DEFAULT_SHOP_URL.to_string(),
            api_key: None,
            language: "fr".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
        }
    }
}

impl FortniteApiConfig {
    pub fn new_from_env_or_default() -> Self {
        let shop_url = std::env::var("FIS_FORTNITE_API_URL").unwrap_or_else(|_| {
            info!("FIS_FORTNITE_API_URL not set, using {DEFAULT_SHOP_URL}");
            DEFAULT_SHOP_URL.to_string()
        });
        let api_key = match std::env::var("FIS_FORTNITE_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Some(Secret::new(key)),
            _ => {
                warn!("FIS_FORTNITE_API_KEY not set. Shop requests will be sent unauthenticated");
                None
            },
        };
        let language = std::env::var("FIS_FORTNITE_LANGUAGE").unwrap_or_else(|_| {
            info!("FIS_FORTNITE_LANGUAGE not set, using fr");
            "fr".to_string()
        });
        let timeout = std::env::var("FIS_FORTNITE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let max_attempts = std::env::var("FIS_FORTNITE_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
            .max(1);
        let backoff_factor = std::env::var("FIS_FORTNITE_BACKOFF_FACTOR")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(DEFAULT_BACKOFF_FACTOR);
        Self { shop_url, api_key, language, timeout: Duration::from_secs(timeout), max_attempts, backoff_factor }
    }
}
