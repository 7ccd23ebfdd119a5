//! # FortniteItems server
//!
//! The HTTP layer of the FortniteItems storefront backend. It is responsible for:
//! * Serving the (cached) Fortnite item shop to the storefront.
//! * Creating Lygos payment sessions and recording the resulting orders.
//! * Receiving payment webhooks from Lygos and transitioning order statuses.
//! * The per-order chat thread between customers and the shop admin.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! All routes live under `/api`, except for `/health`. See [routes] for the full list.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
