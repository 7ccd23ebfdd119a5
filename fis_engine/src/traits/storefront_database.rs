use thiserror::Error;

use crate::{
    db_types::{InsertOrderResult, Message, NewMessage, NewOrder, Order, OrderId, OrderStatusType},
    order_objects::OrderWithChat,
};

#[derive(Debug, Clone, Error)]
pub enum StorefrontApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// The persistence contract for orders and their chat threads. [`crate::SqliteDatabase`] is the
/// production implementation.
#[allow(async_fn_in_trait)]
pub trait StorefrontDatabase {
    /// Insert the order unless one with the same order id already exists.
    async fn insert_order(&self, order: NewOrder) -> Result<InsertOrderResult, StorefrontApiError>;

    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, StorefrontApiError>;

    /// All orders, newest first, each with its chat summary.
    async fn fetch_orders(&self) -> Result<Vec<OrderWithChat>, StorefrontApiError>;

    /// Set the order status (bumping `updated_at`), recording the gateway reference when given.
    /// Returns `None` when no order with that id exists.
    async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatusType,
        payment_ref: Option<&str>,
    ) -> Result<Option<Order>, StorefrontApiError>;

    async fn fetch_messages_for_order(&self, order_id: &OrderId) -> Result<Vec<Message>, StorefrontApiError>;

    async fn insert_message(&self, message: NewMessage) -> Result<Message, StorefrontApiError>;
}
