use thiserror::Error;

use crate::traits::StorefrontApiError;

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database error: {0}")]
    QueryError(#[from] sqlx::Error),
    #[error("Could not run migrations: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

impl From<SqliteDatabaseError> for StorefrontApiError {
    fn from(e: SqliteDatabaseError) -> Self {
        StorefrontApiError::DatabaseError(e.to_string())
    }
}
