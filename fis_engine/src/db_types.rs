use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use fis_common::Fcfa;
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::Type;
use thiserror::Error;

//--------------------------------------        OrderId        -------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------   OrderStatusType     -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// The order is newly created. A payment session may exist but nothing has settled.
    New,
    /// The payment gateway has confirmed the payment.
    Paid,
    /// The payment gateway reported a failed payment.
    Failed,
    /// The goods have been gifted to the customer's Epic account.
    Delivered,
    /// The order has been cancelled by the customer or an admin.
    Cancelled,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::New => write!(f, "New"),
            OrderStatusType::Paid => write!(f, "Paid"),
            OrderStatusType::Failed => write!(f, "Failed"),
            OrderStatusType::Delivered => write!(f, "Delivered"),
            OrderStatusType::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl From<String> for OrderStatusType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to New");
            OrderStatusType::New
        })
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid conversion: {0}")]
pub struct ConversionError(pub String);

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Paid" => Ok(Self::Paid),
            "Failed" => Ok(Self::Failed),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------        Order        ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_id: OrderId,
    pub amount: Fcfa,
    pub status: OrderStatusType,
    /// Opaque customer details captured at checkout (Epic name, email, platform).
    pub customer_data: Value,
    /// Opaque cart contents captured at checkout.
    pub items_data: Value,
    pub payment_link: Option<String>,
    pub payment_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       NewOrder       --------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    /// The order id generated when the payment session was created.
    pub order_id: OrderId,
    /// The total order amount in FCFA.
    pub amount: Fcfa,
    pub customer_data: Value,
    pub items_data: Value,
    /// The hosted checkout link, when a payment session was created for this order.
    pub payment_link: Option<String>,
}

impl NewOrder {
    pub fn new(order_id: OrderId, amount: Fcfa) -> Self {
        Self { order_id, amount, customer_data: Value::Null, items_data: Value::Null, payment_link: None }
    }

    pub fn with_customer_data(mut self, customer_data: Value) -> Self {
        self.customer_data = customer_data;
        self
    }

    pub fn with_items_data(mut self, items_data: Value) -> Self {
        self.items_data = items_data;
        self
    }

    pub fn with_payment_link(mut self, link: String) -> Self {
        self.payment_link = Some(link);
        self
    }
}

//--------------------------------------    MessageSender     --------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Admin,
}

impl Display for MessageSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageSender::User => write!(f, "user"),
            MessageSender::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for MessageSender {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            s => Err(ConversionError(format!("Invalid message sender: {s}"))),
        }
    }
}

impl From<String> for MessageSender {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid message sender: {value}. But this conversion cannot fail. Defaulting to user");
            MessageSender::User
        })
    }
}

//--------------------------------------       Message        --------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub order_id: OrderId,
    pub sender: MessageSender,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub order_id: OrderId,
    pub sender: MessageSender,
    pub content: String,
}

//--------------------------------------  InsertOrderResult   --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOrderResult {
    Inserted(i64),
    AlreadyExists(i64),
}
