use actix_web::{http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use chrono::{TimeZone, Utc};
use fis_engine::db_types::{Order, OrderId, OrderStatusType};
use serde_json::{json, Value};

pub async fn get_request<C>(path: &str, configure: C) -> (StatusCode, String)
where C: FnOnce(&mut ServiceConfig) {
    let req = TestRequest::get().uri(path).to_request();
    let service = test::init_service(App::new().configure(configure)).await;
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, body)
}

pub async fn post_request<C>(path: &str, body: Value, configure: C) -> (StatusCode, String)
where C: FnOnce(&mut ServiceConfig) {
    let req = TestRequest::post().uri(path).set_json(body).to_request();
    let service = test::init_service(App::new().configure(configure)).await;
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, body)
}

pub fn sample_order(order_id: &str, status: OrderStatusType) -> Order {
    Order {
        id: 1,
        order_id: OrderId(order_id.to_string()),
        amount: 9000.into(),
        status,
        customer_data: json!({"fortniteName": "PlayerXYZ"}),
        items_data: json!([{"name": "2800 V-Bucks"}]),
        payment_link: Some("https://pay.lygosapp.com/session/abc".to_string()),
        payment_ref: None,
        created_at: Utc.with_ymd_and_hms(2026, 8, 20, 13, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 8, 20, 13, 30, 0).unwrap(),
    }
}
