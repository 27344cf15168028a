//! Common error types for the Lugarden tools

use thiserror::Error;

/// Common result type for Lugarden operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Lugarden tools
#[derive(Error, Debug)]
pub enum Error {
    /// Store could not be reached or a query failed at the transport level.
    ///
    /// Carries the store's own message unmodified.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::StoreUnavailable(err.to_string())
    }
}

impl Error {
    /// True for failures raised by the record store itself
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Error::StoreUnavailable(_))
    }
}
