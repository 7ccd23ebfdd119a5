use fis_engine::{OrderFlowApi, SqliteDatabase};
use prettytable::{row, Table};

pub async fn list_orders() -> anyhow::Result<()> {
    let db = SqliteDatabase::new(5).await?;
    let api = OrderFlowApi::new(db);
    let orders = api.orders().await?;
    if orders.is_empty() {
        println!("No orders recorded.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_titles(row!["Order id", "Status", "Amount", "Created", "Messages", "Last message"]);
    for entry in &orders {
        let order = &entry.order;
        table.add_row(row![
            order.order_id.as_str(),
            order.status,
            order.amount,
            order.created_at.format("%Y-%m-%d %H:%M"),
            entry.message_count,
            entry.last_message.as_deref().unwrap_or("-"),
        ]);
    }
    table.printstd();
    println!("{} orders.", orders.len());
    Ok(())
}
