use thiserror::Error;

#[derive(Debug, Error)]
pub enum LygosApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not reach the Lygos gateway: {0}")]
    Unreachable(String),
    #[error("Lygos refused the payment session ({status}): {message}")]
    Refused { status: u16, message: String },
    #[error("Could not deserialize the gateway response: {0}")]
    JsonError(String),
}
