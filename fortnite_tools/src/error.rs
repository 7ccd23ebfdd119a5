use thiserror::Error;

#[derive(Debug, Error)]
pub enum FortniteApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not fetch the item shop: {0}")]
    FetchFailed(String),
}
