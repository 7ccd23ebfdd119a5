//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Any long, non-cpu-bound operation (I/O, database queries, upstream
//! API calls) must be expressed as futures or asynchronous functions so that worker threads can interleave requests.
use actix_web::{web, HttpResponse};
use fis_common::helpers::parse_boolean_flag;
use fis_engine::{
    db_types::{NewMessage, NewOrder, OrderId},
    traits::{ShopFetcher, SnapshotStore, StorefrontDatabase},
    CatalogApi,
    OrderFlowApi,
};
use log::*;
use lygos_tools::{LygosApi, PaymentEvent};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    data_objects::{CreatePaymentRequest, CreatePaymentResponse, NewMessageRequest, ShopQuery, SubmitOrderRequest},
    errors::ServerError,
    integrations::lygos::apply_payment_event,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
route!(health => Get "/health" impl StorefrontDatabase);
/// Liveness probe. A cheap indexed lookup doubles as a database connectivity check.
pub async fn health<B: StorefrontDatabase>(api: web::Data<OrderFlowApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received health check request");
    api.order_by_id(&OrderId("health-check".to_string())).await?;
    Ok(HttpResponse::Ok().body("👍️\n"))
}

// ----------------------------------------------   Shop  ----------------------------------------------------
route!(shop => Get "/shop" impl ShopFetcher, SnapshotStore);
/// Route handler for the shop endpoint.
///
/// Serves the cached item-shop snapshot, refreshing it from upstream when it has aged past the
/// TTL or when `?refresh=1` is supplied. A failed refresh falls back to the stored snapshot when
/// one exists; only a failure with nothing stored becomes a 502.
pub async fn shop<TShopFetcher, TSnapshotStore>(
    query: web::Query<ShopQuery>,
    api: web::Data<CatalogApi<TShopFetcher, TSnapshotStore>>,
) -> Result<HttpResponse, ServerError>
where
    TShopFetcher: ShopFetcher,
    TSnapshotStore: SnapshotStore,
{
    let force_refresh = parse_boolean_flag(query.into_inner().refresh, false);
    debug!("🛒️ GET shop (force_refresh: {force_refresh})");
    let snapshot = api.get_shop(force_refresh).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

route!(shop_refresh => Post "/shop/refresh" impl ShopFetcher, SnapshotStore);
/// Out-of-band refresh trigger. Unconditionally re-fetches the shop; failures propagate instead
/// of falling back to the stored snapshot, so the caller learns the refresh did not happen.
pub async fn shop_refresh<TShopFetcher, TSnapshotStore>(
    api: web::Data<CatalogApi<TShopFetcher, TSnapshotStore>>,
) -> Result<HttpResponse, ServerError>
where
    TShopFetcher: ShopFetcher,
    TSnapshotStore: SnapshotStore,
{
    debug!("🛒️ POST shop refresh");
    let snapshot = api.refresh_shop().await?;
    info!("🛒️ Shop snapshot refreshed ({} items)", snapshot.total_items);
    Ok(HttpResponse::Ok().json(snapshot))
}

// ----------------------------------------------   Payments  ----------------------------------------------------
route!(create_payment => Post "/create-payment" impl StorefrontDatabase);
/// Create a Lygos payment session for a cart and record the resulting order.
///
/// A fresh UUID becomes the order id, the gateway gets the cart summary for the hosted checkout
/// page, and the order is stored as `New` with the returned payment link. A gateway refusal maps
/// to a 400 with the gateway's message; an unreachable gateway to a 502.
pub async fn create_payment<B: StorefrontDatabase>(
    body: web::Json<CreatePaymentRequest>,
    lygos: web::Data<LygosApi>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    let order_id = Uuid::new_v4().to_string();
    let item_names = request.items.iter().map(|i| i.name.clone()).collect::<Vec<_>>();
    debug!("💰️ POST create payment of {} for order {order_id} ({})", request.amount, item_names.join(", "));
    let session = lygos.create_session(&order_id, request.amount, &item_names).await?;
    let items_data = serde_json::to_value(&request.items).unwrap_or(Value::Null);
    let order = NewOrder::new(OrderId(order_id.clone()), request.amount)
        .with_customer_data(request.customer)
        .with_items_data(items_data)
        .with_payment_link(session.link.clone());
    api.submit_order(order).await?;
    info!("💰️ Payment session created and order {order_id} recorded");
    Ok(HttpResponse::Ok().json(CreatePaymentResponse { success: true, payment_link: session.link, order_id }))
}

route!(lygos_webhook => Post "/webhook/lygos" impl StorefrontDatabase);
/// The Lygos payment webhook.
///
/// Webhook responses must always be in the 200 range, otherwise Lygos will retry. Failures are
/// reported in the response body instead.
pub async fn lygos_webhook<B: StorefrontDatabase>(
    body: web::Json<PaymentEvent>,
    api: web::Data<OrderFlowApi<B>>,
) -> HttpResponse {
    let event = body.into_inner();
    debug!("💰️ Received payment webhook for order {} with status '{}'", event.order_id, event.status);
    let result = apply_payment_event(event, api.as_ref()).await;
    HttpResponse::Ok().json(result)
}

// ----------------------------------------------   Orders  ----------------------------------------------------
route!(submit_order => Post "/submit-order" impl StorefrontDatabase);
/// Record a completed checkout. Resubmitting an order id returns the stored order unchanged, so
/// storefront retries are harmless.
pub async fn submit_order<B: StorefrontDatabase>(
    body: web::Json<SubmitOrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST submit order {}", request.order_id);
    let mut order = NewOrder::new(OrderId(request.order_id), request.amount)
        .with_customer_data(request.customer)
        .with_items_data(request.items);
    if let Some(link) = request.payment_link {
        order = order.with_payment_link(link);
    }
    let order = api.submit_order(order).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(orders => Get "/orders" impl StorefrontDatabase);
/// All orders, newest first, each with its chat summary (message count and last message).
pub async fn orders<B: StorefrontDatabase>(api: web::Data<OrderFlowApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET orders");
    let orders = api.orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(order_by_id => Get "/order/{order_id}" impl StorefrontDatabase);
pub async fn order_by_id<B: StorefrontDatabase>(
    path: web::Path<OrderId>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    debug!("💻️ GET order {order_id}");
    let order = api
        .order_by_id(&order_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Order {order_id} does not exist")))?;
    Ok(HttpResponse::Ok().json(order))
}

// ----------------------------------------------   Chat  ----------------------------------------------------
route!(order_messages => Get "/order/{order_id}/messages" impl StorefrontDatabase);
/// The chat thread for an order, oldest first. Unknown orders are a 404, not an empty thread.
pub async fn order_messages<B: StorefrontDatabase>(
    path: web::Path<OrderId>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    debug!("💻️ GET messages for order {order_id}");
    let messages = api.messages_for_order(&order_id).await?;
    Ok(HttpResponse::Ok().json(messages))
}

route!(post_order_message => Post "/order/{order_id}/messages" impl StorefrontDatabase);
pub async fn post_order_message<B: StorefrontDatabase>(
    path: web::Path<OrderId>,
    body: web::Json<NewMessageRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    let NewMessageRequest { sender, content } = body.into_inner();
    debug!("💻️ POST message from {sender} on order {order_id}");
    let message = api.add_message(NewMessage { order_id, sender, content }).await?;
    Ok(HttpResponse::Ok().json(message))
}
