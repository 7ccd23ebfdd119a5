//! Glue between Lygos payment events and the order flow.

use fis_engine::{
    db_types::{OrderId, OrderStatusType},
    traits::StorefrontDatabase,
    OrderFlowApi,
};
use log::*;
use lygos_tools::{PaymentEvent, PaymentEventStatus};

use crate::data_objects::JsonResponse;

/// The order status a payment event maps to. `None` for statuses we do not act on
/// (e.g. "pending" or "processing" progress notifications).
pub fn order_status_for_event(event: &PaymentEvent) -> Option<OrderStatusType> {
    match event.status_kind() {
        PaymentEventStatus::Successful => Some(OrderStatusType::Paid),
        PaymentEventStatus::Failed => Some(OrderStatusType::Failed),
        PaymentEventStatus::Unknown => None,
    }
}

/// Apply a payment event to its order.
///
/// The result is always acknowledged with a 2xx response body, whatever happened; Lygos retries
/// on error responses and a retry will not make an unknown order appear.
pub async fn apply_payment_event<B: StorefrontDatabase>(event: PaymentEvent, api: &OrderFlowApi<B>) -> JsonResponse {
    let order_id = OrderId(event.order_id.clone());
    let Some(status) = order_status_for_event(&event) else {
        info!("💰️ Ignoring payment event with unhandled status '{}' for order {order_id}", event.status);
        return JsonResponse::success("Event acknowledged; status not actionable.");
    };
    match api.apply_payment_outcome(&order_id, status, event.reference.as_deref()).await {
        Ok(Some(order)) => {
            info!("💰️ Order {order_id} is now {}.", order.status);
            JsonResponse::success(format!("Order marked as {}.", order.status))
        },
        Ok(None) => {
            warn!("💰️ Payment event for unknown order {order_id}. Acknowledging anyway.");
            JsonResponse::failure("Unknown order id.")
        },
        Err(e) => {
            warn!("💰️ Could not apply payment event for order {order_id}. {e}");
            JsonResponse::failure("Could not process payment event.")
        },
    }
}
