use std::fmt::Display;

use fis_common::Fcfa;
use fis_engine::db_types::MessageSender;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

/// One cart line as the storefront sends it. Everything except the name is along for the ride; the
/// full cart is stored verbatim in the order's `items_data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// The body for `POST /api/create-payment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub amount: Fcfa,
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub customer: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentResponse {
    pub success: bool,
    pub payment_link: String,
    pub order_id: String,
}

/// The body for `POST /api/submit-order`: the storefront posts the completed checkout details
/// after the customer returns from the payment page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOrderRequest {
    pub order_id: String,
    pub amount: Fcfa,
    #[serde(default)]
    pub customer: Value,
    #[serde(default)]
    pub items: Value,
    #[serde(default)]
    pub payment_link: Option<String>,
}

/// The body for `POST /api/order/{id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageRequest {
    pub sender: MessageSender,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopQuery {
    #[serde(default)]
    pub refresh: Option<String>,
}
