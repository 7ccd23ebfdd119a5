//! FortniteItems Storefront Engine
//!
//! Core logic for the FortniteItems storefront backend, independent of the HTTP layer. The crate
//! is divided into three sections:
//! 1. Database management ([`mod@db`]). SQLite is the only supported backend at present. Use the
//!    public APIs rather than the database types directly; the exception is `db_types`, which is
//!    public because the rows it defines appear in API responses.
//! 2. The catalog API ([`CatalogApi`]): the item-shop cache with TTL, stale-on-error fallback and
//!    durable snapshot storage.
//! 3. The order flow API ([`OrderFlowApi`]): order creation, payment-event transitions and the
//!    per-order chat thread.
mod db;

pub mod db_types;
mod fis_api;

pub mod catalog;
pub mod traits;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{SqliteDatabase, SqliteDatabaseError};
pub use fis_api::{
    errors::OrderFlowError,
    order_flow_api::OrderFlowApi,
    order_objects::{self, OrderWithChat},
};

pub use catalog::{CatalogApi, CatalogError, FileSnapshotStore};
