use actix_web::{http::StatusCode, web, web::ServiceConfig};
use fis_engine::{db_types::OrderStatusType, OrderFlowApi};
use serde_json::{json, Value};

use super::{
    helpers::{post_request, sample_order},
    mocks::MockStorefrontDb,
};
use crate::routes::LygosWebhookRoute;

fn configure(db: MockStorefrontDb) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(LygosWebhookRoute::<MockStorefrontDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    }
}

#[actix_web::test]
async fn successful_payment_marks_the_order_paid() {
    let _ = env_logger::try_init().ok();
    let mut db = MockStorefrontDb::new();
    db.expect_update_order_status()
        .withf(|id, status, payment_ref| {
            id.as_str() == "order-1" && *status == OrderStatusType::Paid && payment_ref == &Some("LYGOS_REF_42")
        })
        .returning(|_, _, _| Ok(Some(sample_order("order-1", OrderStatusType::Paid))));
    let body = json!({"order_id": "order-1", "status": "successful", "reference": "LYGOS_REF_42"});
    let (status, body) = post_request("/webhook/lygos", body, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["success"], true);
}

#[actix_web::test]
async fn failed_payment_marks_the_order_failed() {
    let _ = env_logger::try_init().ok();
    let mut db = MockStorefrontDb::new();
    db.expect_update_order_status()
        .withf(|_, status, _| *status == OrderStatusType::Failed)
        .returning(|_, _, _| Ok(Some(sample_order("order-1", OrderStatusType::Failed))));
    let body = json!({"order_id": "order-1", "status": "failed"});
    let (status, body) = post_request("/webhook/lygos", body, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["success"], true);
}

#[actix_web::test]
async fn unknown_orders_are_still_acknowledged() {
    let _ = env_logger::try_init().ok();
    let mut db = MockStorefrontDb::new();
    db.expect_update_order_status().returning(|_, _, _| Ok(None));
    let body = json!({"order_id": "ghost", "status": "successful"});
    let (status, body) = post_request("/webhook/lygos", body, configure(db)).await;
    // Lygos retries on non-2xx responses, so the event is acknowledged regardless.
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["success"], false);
}

#[actix_web::test]
async fn progress_events_do_not_touch_the_order() {
    let _ = env_logger::try_init().ok();
    let mut db = MockStorefrontDb::new();
    // No update_order_status expectation: calling it would fail the test.
    db.expect_update_order_status().times(0);
    let body = json!({"order_id": "order-1", "status": "processing"});
    let (status, body) = post_request("/webhook/lygos", body, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["success"], true);
}

#[actix_web::test]
async fn missing_fields_are_a_400() {
    let _ = env_logger::try_init().ok();
    let db = MockStorefrontDb::new();
    let body = json!({"order_id": "order-1"});
    let (status, _) = post_request("/webhook/lygos", body, configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
