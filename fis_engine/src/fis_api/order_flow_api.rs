use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{InsertOrderResult, Message, NewMessage, NewOrder, Order, OrderId, OrderStatusType},
    fis_api::errors::OrderFlowError,
    order_objects::OrderWithChat,
    traits::StorefrontDatabase,
};

/// `OrderFlowApi` is the primary API for handling order lifecycles in response to checkout
/// submissions and payment-gateway events.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> OrderFlowApi<B>
where B: StorefrontDatabase
{
    /// Record an order. Submitting the same order id twice is a no-op that returns the stored
    /// order, so checkout retries and double-posted webhooks are harmless.
    pub async fn submit_order(&self, order: NewOrder) -> Result<Order, OrderFlowError> {
        let order_id = order.order_id.clone();
        match self.db.insert_order(order).await? {
            InsertOrderResult::Inserted(id) => debug!("Order {order_id} saved with row id {id}"),
            InsertOrderResult::AlreadyExists(id) => {
                debug!("Order {order_id} was already recorded (row id {id}). Keeping the stored version")
            },
        }
        self.db
            .fetch_order_by_order_id(&order_id)
            .await?
            .ok_or_else(|| OrderFlowError::OrderNotFound(order_id))
    }

    /// Apply a settled payment outcome to an order.
    ///
    /// Returns the updated order, or `None` when no order with that id exists; the caller decides
    /// whether that is worth more than a warning (webhook handlers acknowledge regardless, since
    /// gateways retry on error responses).
    pub async fn apply_payment_outcome(
        &self,
        order_id: &OrderId,
        status: OrderStatusType,
        payment_ref: Option<&str>,
    ) -> Result<Option<Order>, OrderFlowError> {
        let updated = self.db.update_order_status(order_id, status, payment_ref).await?;
        match &updated {
            Some(order) => info!("Order {order_id} transitioned to {} by payment event", order.status),
            None => warn!("Payment event for unknown order {order_id}. Ignoring"),
        }
        Ok(updated)
    }

    pub async fn orders(&self) -> Result<Vec<OrderWithChat>, OrderFlowError> {
        Ok(self.db.fetch_orders().await?)
    }

    pub async fn order_by_id(&self, order_id: &OrderId) -> Result<Option<Order>, OrderFlowError> {
        Ok(self.db.fetch_order_by_order_id(order_id).await?)
    }

    /// The chat thread for an order, oldest first. Unknown orders are an error rather than an
    /// empty thread.
    pub async fn messages_for_order(&self, order_id: &OrderId) -> Result<Vec<Message>, OrderFlowError> {
        self.ensure_order_exists(order_id).await?;
        Ok(self.db.fetch_messages_for_order(order_id).await?)
    }

    pub async fn add_message(&self, message: NewMessage) -> Result<Message, OrderFlowError> {
        self.ensure_order_exists(&message.order_id).await?;
        Ok(self.db.insert_message(message).await?)
    }

    async fn ensure_order_exists(&self, order_id: &OrderId) -> Result<(), OrderFlowError> {
        self.db
            .fetch_order_by_order_id(order_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| OrderFlowError::OrderNotFound(order_id.clone()))
    }
}
