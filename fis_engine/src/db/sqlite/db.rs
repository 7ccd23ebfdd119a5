use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::{db_url, messages, new_pool, orders, SqliteDatabaseError};
use crate::{
    db_types::{InsertOrderResult, Message, NewMessage, NewOrder, Order, OrderId, OrderStatusType},
    order_objects::OrderWithChat,
    traits::{StorefrontApiError, StorefrontDatabase},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the url from `FIS_DATABASE_URL`.
    pub async fn new(max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Applies any outstanding schema migrations.
    pub async fn migrate(&self) -> Result<(), SqliteDatabaseError> {
        sqlx::migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl StorefrontDatabase for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<InsertOrderResult, StorefrontApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let result = orders::idempotent_insert(order, &mut conn).await?;
        if let InsertOrderResult::Inserted(id) = &result {
            debug!("Order saved in the DB with id {id}");
        }
        Ok(result)
    }

    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        Ok(orders::fetch_order_by_order_id(order_id, &mut conn).await?)
    }

    async fn fetch_orders(&self) -> Result<Vec<OrderWithChat>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        Ok(orders::fetch_orders_with_chat(&mut conn).await?)
    }

    async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatusType,
        payment_ref: Option<&str>,
    ) -> Result<Option<Order>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        Ok(orders::update_order_status(order_id, status, payment_ref, &mut conn).await?)
    }

    async fn fetch_messages_for_order(&self, order_id: &OrderId) -> Result<Vec<Message>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        Ok(messages::fetch_messages(order_id, &mut conn).await?)
    }

    async fn insert_message(&self, message: NewMessage) -> Result<Message, StorefrontApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        Ok(messages::insert_message(message, &mut conn).await?)
    }
}
