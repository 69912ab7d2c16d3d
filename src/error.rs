//! Common error types for safesight

use thiserror::Error;

/// Common result type for safesight operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the service
///
/// Each variant maps to exactly one HTTP status at the API boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// Client sent unusable data (empty upload, malformed body)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The classification service failed or reported an error
    #[error("Classification service error: {0}")]
    ExternalService(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad or missing admin credentials
    #[error("Unauthorized")]
    Auth,

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crate::vision::VisionError> for Error {
    fn from(err: crate::vision::VisionError) -> Self {
        match &err {
            crate::vision::VisionError::EmptyImage => Error::InvalidInput(err.to_string()),
            _ => Error::ExternalService(err.to_string()),
        }
    }
}
