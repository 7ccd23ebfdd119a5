mod api;
mod config;
mod data_objects;
mod error;

pub use api::LygosApi;
pub use config::LygosConfig;
pub use data_objects::{NewPaymentSession, PaymentEvent, PaymentEventStatus, PaymentSession};
pub use error::LygosApiError;
