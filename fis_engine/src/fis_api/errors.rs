use thiserror::Error;

use crate::{db_types::OrderId, traits::StorefrontApiError};

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order {0} was not found")]
    OrderNotFound(OrderId),
}

impl From<StorefrontApiError> for OrderFlowError {
    fn from(e: StorefrontApiError) -> Self {
        match e {
            StorefrontApiError::DatabaseError(msg) => OrderFlowError::DatabaseError(msg),
        }
    }
}
