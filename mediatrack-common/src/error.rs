//! Common error types for mediatrack

use thiserror::Error;

/// Common result type for mediatrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the store layer and the HTTP service
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or malformed required field. The message is the
    /// user-facing text returned to the client.
    #[error("{0}")]
    Validation(String),

    /// Upload exceeds the configured size cap
    #[error("El archivo supera el tamaño máximo permitido.")]
    PayloadTooLarge,

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
