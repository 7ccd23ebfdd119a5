use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use fis_engine::{CatalogApi, FileSnapshotStore, OrderFlowApi, SqliteDatabase};
use fortnite_tools::FortniteApi;
use log::info;
use lygos_tools::LygosApi;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        CreatePaymentRoute,
        HealthRoute,
        LygosWebhookRoute,
        OrderByIdRoute,
        OrderMessagesRoute,
        OrdersRoute,
        PostOrderMessageRoute,
        ShopRefreshRoute,
        ShopRoute,
        SubmitOrderRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🗃️ Database ready at {}", config.database_url);
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let fortnite_api =
        FortniteApi::new(config.fortnite.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let lygos_api = LygosApi::new(config.lygos.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone());
        let store = FileSnapshotStore::new(config.shop_cache_path.clone());
        let catalog_api =
            CatalogApi::new(fortnite_api.clone(), store, Duration::from_secs(config.shop_ttl_secs));
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("fis::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(lygos_api.clone()));
        let api_scope = web::scope("/api")
            .service(ShopRoute::<FortniteApi, FileSnapshotStore>::new())
            .service(ShopRefreshRoute::<FortniteApi, FileSnapshotStore>::new())
            .service(CreatePaymentRoute::<SqliteDatabase>::new())
            .service(LygosWebhookRoute::<SqliteDatabase>::new())
            .service(SubmitOrderRoute::<SqliteDatabase>::new())
            .service(OrdersRoute::<SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new())
            .service(OrderMessagesRoute::<SqliteDatabase>::new())
            .service(PostOrderMessageRoute::<SqliteDatabase>::new());
        app.service(HealthRoute::<SqliteDatabase>::new()).service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
