use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use fis_engine::{
    db_types::{InsertOrderResult, Message, MessageSender, OrderStatusType},
    order_objects::OrderWithChat,
    OrderFlowApi,
};
use serde_json::{json, Value};

use super::{
    helpers::{get_request, post_request, sample_order},
    mocks::MockStorefrontDb,
};
use crate::routes::{HealthRoute, OrderByIdRoute, OrderMessagesRoute, OrdersRoute, PostOrderMessageRoute, SubmitOrderRoute};

fn configure(db: MockStorefrontDb) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(HealthRoute::<MockStorefrontDb>::new())
            .service(OrdersRoute::<MockStorefrontDb>::new())
            .service(OrderByIdRoute::<MockStorefrontDb>::new())
            .service(OrderMessagesRoute::<MockStorefrontDb>::new())
            .service(PostOrderMessageRoute::<MockStorefrontDb>::new())
            .service(SubmitOrderRoute::<MockStorefrontDb>::new())
            .app_data(web::Data::new(OrderFlowApi::new(db)));
    }
}

#[actix_web::test]
async fn health_check_touches_the_database() {
    let _ = env_logger::try_init().ok();
    let mut db = MockStorefrontDb::new();
    db.expect_fetch_order_by_order_id().returning(|_| Ok(None));
    let (status, body) = get_request("/health", configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}

#[actix_web::test]
async fn order_listing_includes_chat_summaries() {
    let _ = env_logger::try_init().ok();
    let mut db = MockStorefrontDb::new();
    db.expect_fetch_orders().returning(|| {
        Ok(vec![OrderWithChat {
            order: sample_order("order-1", OrderStatusType::Paid),
            message_count: 2,
            last_message: Some("Dans l'heure.".to_string()),
        }])
    });
    let (status, body) = get_request("/orders", configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed[0]["order_id"], "order-1");
    assert_eq!(parsed[0]["status"], "Paid");
    assert_eq!(parsed[0]["message_count"], 2);
    assert_eq!(parsed[0]["last_message"], "Dans l'heure.");
}

#[actix_web::test]
async fn fetch_a_single_order() {
    let _ = env_logger::try_init().ok();
    let mut db = MockStorefrontDb::new();
    db.expect_fetch_order_by_order_id()
        .withf(|id| id.as_str() == "order-1")
        .returning(|_| Ok(Some(sample_order("order-1", OrderStatusType::New))));
    let (status, body) = get_request("/order/order-1", configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["order_id"], "order-1");
    assert_eq!(parsed["amount"], 9000);
}

#[actix_web::test]
async fn unknown_order_is_a_404() {
    let _ = env_logger::try_init().ok();
    let mut db = MockStorefrontDb::new();
    db.expect_fetch_order_by_order_id().returning(|_| Ok(None));
    let (status, body) = get_request("/order/ghost", configure(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert!(parsed["error"].as_str().unwrap().contains("ghost"));
}

#[actix_web::test]
async fn chat_on_unknown_order_is_a_404() {
    let _ = env_logger::try_init().ok();
    let mut db = MockStorefrontDb::new();
    db.expect_fetch_order_by_order_id().returning(|_| Ok(None));
    let body = json!({"sender": "user", "content": "Bonjour"});
    let (status, _) = post_request("/order/ghost/messages", body, configure(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn post_and_read_chat_messages() {
    let _ = env_logger::try_init().ok();
    let mut db = MockStorefrontDb::new();
    db.expect_fetch_order_by_order_id().returning(|_| Ok(Some(sample_order("order-1", OrderStatusType::Paid))));
    db.expect_insert_message().returning(|m| {
        Ok(Message {
            id: 7,
            order_id: m.order_id,
            sender: m.sender,
            content: m.content,
            is_read: false,
            created_at: Utc.with_ymd_and_hms(2026, 8, 20, 14, 0, 0).unwrap(),
        })
    });
    let body = json!({"sender": "admin", "content": "Dans l'heure."});
    let (status, body) = post_request("/order/order-1/messages", body, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["sender"], "admin");
    assert_eq!(parsed["content"], "Dans l'heure.");
    assert_eq!(parsed["is_read"], false);

    let mut db = MockStorefrontDb::new();
    db.expect_fetch_order_by_order_id().returning(|_| Ok(Some(sample_order("order-1", OrderStatusType::Paid))));
    db.expect_fetch_messages_for_order().returning(|id| {
        Ok(vec![Message {
            id: 7,
            order_id: id.clone(),
            sender: MessageSender::Admin,
            content: "Dans l'heure.".to_string(),
            is_read: false,
            created_at: Utc.with_ymd_and_hms(2026, 8, 20, 14, 0, 0).unwrap(),
        }])
    });
    let (status, body) = get_request("/order/order-1/messages", configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn resubmitted_orders_return_the_stored_version() {
    let _ = env_logger::try_init().ok();
    let mut db = MockStorefrontDb::new();
    db.expect_insert_order().returning(|_| Ok(InsertOrderResult::AlreadyExists(1)));
    db.expect_fetch_order_by_order_id().returning(|_| Ok(Some(sample_order("order-1", OrderStatusType::Paid))));
    let body = json!({"order_id": "order-1", "amount": 123456, "customer": {}, "items": []});
    let (status, body) = post_request("/submit-order", body, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    // The stored order wins over the resubmitted body.
    assert_eq!(parsed["amount"], 9000);
    assert_eq!(parsed["status"], "Paid");
}
