use fortnite_tools::FortniteApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Upstream unreachable, non-success status or unparseable body, with no stored snapshot to
    /// fall back on.
    #[error("Could not fetch the item shop: {0}")]
    FetchFailed(String),
}

impl From<FortniteApiError> for CatalogError {
    fn from(e: FortniteApiError) -> Self {
        CatalogError::FetchFailed(e.to_string())
    }
}
