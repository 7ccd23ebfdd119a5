use chrono::{DateTime, Utc};
use fis_common::Fcfa;
use log::*;
use serde_json::Value;
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{InsertOrderResult, NewOrder, Order, OrderId, OrderStatusType},
    order_objects::OrderWithChat,
};

const ORDER_COLUMNS: &str =
    "id, order_id, amount, status, customer_data, items_data, payment_link, payment_ref, created_at, updated_at";

/// Raw row shape. Status and the JSON columns are stored as text and converted defensively on the
/// way out, so one bad row cannot poison a whole listing.
#[derive(Debug, FromRow)]
pub(crate) struct OrderRow {
    id: i64,
    order_id: String,
    amount: Fcfa,
    status: String,
    customer_data: String,
    items_data: String,
    payment_link: Option<String>,
    payment_ref: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            order_id: OrderId(row.order_id),
            amount: row.amount,
            status: OrderStatusType::from(row.status),
            customer_data: parse_json_column(&row.customer_data, "customer_data", row.id),
            items_data: parse_json_column(&row.items_data, "items_data", row.id),
            payment_link: row.payment_link,
            payment_ref: row.payment_ref,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn parse_json_column(raw: &str, column: &str, id: i64) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        error!("Order row {id} has invalid JSON in {column}: {e}. Substituting null");
        Value::Null
    })
}

pub async fn idempotent_insert(
    order: NewOrder,
    conn: &mut SqliteConnection,
) -> Result<InsertOrderResult, SqliteDatabaseError> {
    let result = match order_exists(&order.order_id, conn).await? {
        Some(id) => InsertOrderResult::AlreadyExists(id),
        None => insert_order(order, conn).await?,
    };
    Ok(result)
}

async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<InsertOrderResult, SqliteDatabaseError> {
    let id: i64 = sqlx::query_scalar(
        r#"
            INSERT INTO orders (order_id, amount, status, customer_data, items_data, payment_link)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id;
        "#,
    )
    .bind(order.order_id.as_str())
    .bind(order.amount)
    .bind(OrderStatusType::New.to_string())
    .bind(order.customer_data.to_string())
    .bind(order.items_data.to_string())
    .bind(order.payment_link)
    .fetch_one(conn)
    .await?;
    Ok(InsertOrderResult::Inserted(id))
}

pub async fn fetch_order_by_order_id(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, SqliteDatabaseError> {
    let query = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = ? ORDER BY id DESC LIMIT 1");
    let row: Option<OrderRow> = sqlx::query_as(&query).bind(order_id.as_str()).fetch_optional(conn).await?;
    Ok(row.map(Order::from))
}

pub async fn order_exists(order_id: &OrderId, conn: &mut SqliteConnection) -> Result<Option<i64>, SqliteDatabaseError> {
    let id: Option<i64> = sqlx::query_scalar("SELECT id FROM orders WHERE order_id = ? LIMIT 1")
        .bind(order_id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(id)
}

#[derive(Debug, FromRow)]
struct OrderWithChatRow {
    #[sqlx(flatten)]
    order: OrderRow,
    message_count: i64,
    last_message: Option<String>,
}

/// All orders, newest first, with the chat summary the admin listing shows.
pub async fn fetch_orders_with_chat(conn: &mut SqliteConnection) -> Result<Vec<OrderWithChat>, SqliteDatabaseError> {
    let query = format!(
        r#"
        SELECT {ORDER_COLUMNS},
            (SELECT COUNT(*) FROM messages m WHERE m.order_id = orders.order_id) AS message_count,
            (SELECT content FROM messages m WHERE m.order_id = orders.order_id ORDER BY m.id DESC LIMIT 1)
                AS last_message
        FROM orders
        ORDER BY created_at DESC, id DESC;
    "#
    );
    let rows: Vec<OrderWithChatRow> = sqlx::query_as(&query).fetch_all(conn).await?;
    let orders = rows
        .into_iter()
        .map(|row| OrderWithChat {
            order: Order::from(row.order),
            message_count: row.message_count,
            last_message: row.last_message,
        })
        .collect();
    Ok(orders)
}

/// Set the status (and gateway reference, when given) for the order, bumping `updated_at`.
/// Returns the updated order, or `None` when no such order exists.
pub async fn update_order_status(
    order_id: &OrderId,
    status: OrderStatusType,
    payment_ref: Option<&str>,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, SqliteDatabaseError> {
    let result = sqlx::query(
        r#"
            UPDATE orders
            SET status = ?, payment_ref = COALESCE(?, payment_ref), updated_at = CURRENT_TIMESTAMP
            WHERE order_id = ?;
        "#,
    )
    .bind(status.to_string())
    .bind(payment_ref)
    .bind(order_id.as_str())
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }
    debug!("Order {order_id} is now {status}");
    fetch_order_by_order_id(order_id, conn).await
}
