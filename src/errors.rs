use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Missing required configuration: {}", .0.join(", "))]
    ConfigMissing(Vec<String>),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Failed to fetch page: {0}")]
    FetchError(String),

    #[error("Failed to access state store: {0}")]
    StoreError(String),

    #[error("Failed to send message: {0}")]
    NotifyError(String),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Failed to invoke model: {0}")]
    ModelInvocationError(String),
}

impl WatchError {
    /// HTTP status reported back to the caller when this error ends an invocation.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            WatchError::InvalidSignature | WatchError::BadRequest(_) => 400,
            _ => 500,
        }
    }
}
