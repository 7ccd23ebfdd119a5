use fis_common::Secret;
use log::*;

pub const DEFAULT_GATEWAY_URL: &str = "https://api.lygosapp.com/v1/gateway";
pub const DEFAULT_SHOP_NAME: &str = "FortniteItems";
pub const DEFAULT_STOREFRONT_URL: &str = "https://fortniteitems.netlify.app";

#[derive(Debug, Clone)]
pub struct LygosConfig {
    pub gateway_url: String,
    pub api_key: Secret<String>,
    pub shop_name: String,
    pub success_url: String,
    pub failure_url: String,
    pub support_contact: String,
}

impl LygosConfig {
    pub fn new_from_env_or_default() -> Self {
        let gateway_url = std::env::var("FIS_LYGOS_API_URL").unwrap_or_else(|_| {
            info!("FIS_LYGOS_API_URL not set, using {DEFAULT_GATEWAY_URL}");
            DEFAULT_GATEWAY_URL.to_string()
        });
        let api_key = Secret::new(std::env::var("FIS_LYGOS_API_KEY").unwrap_or_else(|_| {
            warn!("FIS_LYGOS_API_KEY not set, using (probably useless) default");
            "lygosapp-00000000-0000-0000-0000-000000000000".to_string()
        }));
        let shop_name = std::env::var("FIS_SHOP_NAME").unwrap_or_else(|_| DEFAULT_SHOP_NAME.to_string());
        let storefront_url = std::env::var("FIS_STOREFRONT_URL").unwrap_or_else(|_| {
            info!("FIS_STOREFRONT_URL not set, using {DEFAULT_STOREFRONT_URL}");
            DEFAULT_STOREFRONT_URL.to_string()
        });
        let support_contact =
            std::env::var("FIS_SUPPORT_CONTACT").unwrap_or_else(|_| "+229 65 62 36 91".to_string());
        Self {
            gateway_url,
            api_key,
            shop_name,
            success_url: format!("{storefront_url}/success.html"),
            failure_url: format!("{storefront_url}/payment-failed.html"),
            support_contact,
        }
    }
}
