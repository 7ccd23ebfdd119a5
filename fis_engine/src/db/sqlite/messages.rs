use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{Message, MessageSender, NewMessage, OrderId},
};

#[derive(Debug, FromRow)]
struct MessageRow {
    id: i64,
    order_id: String,
    sender: String,
    content: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: row.id,
            order_id: OrderId(row.order_id),
            sender: MessageSender::from(row.sender),
            content: row.content,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

pub async fn insert_message(message: NewMessage, conn: &mut SqliteConnection) -> Result<Message, SqliteDatabaseError> {
    let row: MessageRow = sqlx::query_as(
        r#"
            INSERT INTO messages (order_id, sender, content)
            VALUES (?, ?, ?)
            RETURNING id, order_id, sender, content, is_read, created_at;
        "#,
    )
    .bind(message.order_id.as_str())
    .bind(message.sender.to_string())
    .bind(message.content)
    .fetch_one(conn)
    .await?;
    Ok(Message::from(row))
}

/// The chat thread for one order, oldest first.
pub async fn fetch_messages(order_id: &OrderId, conn: &mut SqliteConnection) -> Result<Vec<Message>, SqliteDatabaseError> {
    let rows: Vec<MessageRow> = sqlx::query_as(
        "SELECT id, order_id, sender, content, is_read, created_at FROM messages WHERE order_id = ? ORDER BY id ASC",
    )
    .bind(order_id.as_str())
    .fetch_all(conn)
    .await?;
    Ok(rows.into_iter().map(Message::from).collect())
}
