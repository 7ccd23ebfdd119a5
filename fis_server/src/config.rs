use std::env;

use fortnite_tools::FortniteApiConfig;
use log::*;
use lygos_tools::LygosConfig;

const DEFAULT_FIS_HOST: &str = "127.0.0.1";
const DEFAULT_FIS_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/fis_store.db";
const DEFAULT_SHOP_TTL_SECS: u64 = fis_engine::catalog::DEFAULT_SHOP_TTL_SECS;
const DEFAULT_SHOP_CACHE_PATH: &str = fis_engine::catalog::DEFAULT_SNAPSHOT_PATH;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// How long a stored shop snapshot is served without consulting the upstream API, in seconds.
    pub shop_ttl_secs: u64,
    /// Where the last good shop snapshot is persisted.
    pub shop_cache_path: String,
    /// fortnite-api.com client configuration.
    pub fortnite: FortniteApiConfig,
    /// Lygos payment gateway configuration.
    pub lygos: LygosConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_FIS_HOST.to_string(),
            port: DEFAULT_FIS_PORT,
            database_url: String::default(),
            shop_ttl_secs: DEFAULT_SHOP_TTL_SECS,
            shop_cache_path: DEFAULT_SHOP_CACHE_PATH.to_string(),
            fortnite: FortniteApiConfig::default(),
            lygos: LygosConfig::new_from_env_or_default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("FIS_HOST").ok().unwrap_or_else(|| DEFAULT_FIS_HOST.into());
        let port = env::var("FIS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for FIS_PORT. {e} Using the default, {DEFAULT_FIS_PORT}, instead."
                    );
                    DEFAULT_FIS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_FIS_PORT);
        let database_url = env::var("FIS_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ FIS_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}, instead.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let shop_ttl_secs = env::var("FIS_SHOP_TTL_SECS")
            .map_err(|_| {
                info!("🪛️ FIS_SHOP_TTL_SECS is not set. Using the default value of {DEFAULT_SHOP_TTL_SECS} s.")
            })
            .and_then(|s| {
                s.parse::<u64>().map_err(|e| warn!("🪛️ Invalid configuration value for FIS_SHOP_TTL_SECS. {e}"))
            })
            .ok()
            .unwrap_or(DEFAULT_SHOP_TTL_SECS);
        let shop_cache_path = env::var("FIS_SHOP_CACHE_PATH").ok().unwrap_or_else(|| {
            info!("🪛️ FIS_SHOP_CACHE_PATH is not set. Using the default, {DEFAULT_SHOP_CACHE_PATH}.");
            DEFAULT_SHOP_CACHE_PATH.to_string()
        });
        let fortnite = FortniteApiConfig::new_from_env_or_default();
        let lygos = LygosConfig::new_from_env_or_default();
        Self { host, port, database_url, shop_ttl_secs, shop_cache_path, fortnite, lygos }
    }
}
