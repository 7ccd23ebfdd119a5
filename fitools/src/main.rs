use clap::{Parser, Subcommand};

mod orders;
mod shop;

use crate::{
    orders::list_orders,
    shop::{fetch_shop, refresh_shop},
};

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Operator tools for the FortniteItems storefront")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect or refresh the cached item shop
    #[clap(subcommand)]
    Shop(ShopCommand),
    /// Inspect the order database
    #[clap(subcommand)]
    Orders(OrdersCommand),
}

#[derive(Debug, Subcommand)]
pub enum ShopCommand {
    /// Print today's item shop, served from the cache when it is fresh
    Fetch {
        /// Bypass the cache and fetch from upstream even if the snapshot is fresh
        #[arg(short, long)]
        refresh: bool,
    },
    /// Unconditionally re-fetch the shop and replace the cached snapshot
    Refresh,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List all orders, newest first, with their chat summaries
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    match cli.command {
        Command::Shop(ShopCommand::Fetch { refresh }) => fetch_shop(refresh).await,
        Command::Shop(ShopCommand::Refresh) => refresh_shop().await,
        Command::Orders(OrdersCommand::List) => list_orders().await,
    }
}
