use std::{sync::Arc, time::Duration};

use fis_common::Fcfa;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client,
};
use serde_json::Value;

use crate::{
    config::LygosConfig,
    data_objects::{NewPaymentSession, PaymentSession},
    LygosApiError,
};

#[derive(Clone)]
pub struct LygosApi {
    config: LygosConfig,
    client: Arc<Client>,
}

impl LygosApi {
    pub fn new(config: LygosConfig) -> Result<Self, LygosApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let key = HeaderValue::from_str(config.api_key.reveal().as_str())
            .map_err(|e| LygosApiError::Initialization(e.to_string()))?;
        headers.insert("api-key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LygosApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Create a payment session for `order_id` and return the hosted checkout link.
    ///
    /// A reachable gateway that declines the request maps to [`LygosApiError::Refused`];
    /// transport failures map to [`LygosApiError::Unreachable`].
    pub async fn create_session(
        &self,
        order_id: &str,
        amount: Fcfa,
        item_names: &[String],
    ) -> Result<PaymentSession, LygosApiError> {
        let summary = item_names.join(", ");
        let body = NewPaymentSession {
            amount,
            shop_name: self.config.shop_name.clone(),
            message: format!("Commande {} - {summary} | Support: {}", self.config.shop_name, self.config.support_contact),
            success_url: self.config.success_url.clone(),
            failure_url: self.config.failure_url.clone(),
            order_id: order_id.to_string(),
        };
        debug!("Creating payment session for order {order_id} ({amount})");
        let response = self
            .client
            .post(&self.config.gateway_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LygosApiError::Unreachable(e.to_string()))?;
        let status = response.status();
        let data: Value = response.json().await.map_err(|e| LygosApiError::JsonError(e.to_string()))?;
        let link = data["link"].as_str().unwrap_or_default();
        if status.is_success() && !link.is_empty() {
            info!("Payment session created for order {order_id}");
            Ok(PaymentSession { order_id: order_id.to_string(), link: link.to_string() })
        } else {
            let message = data["message"]
                .as_str()
                .unwrap_or("Erreur lors de la création du paiement")
                .to_string();
            Err(LygosApiError::Refused { status: status.as_u16(), message })
        }
    }
}
