//! Error types for veles-registry.

use thiserror::Error;

/// Errors from registry map persistence.
#[derive(Debug, Error)]
pub enum Error {
    /// A full name did not match the `registry:item` form.
    #[error("invalid registry item name: {0:?}")]
    InvalidName(String),

    /// Stream codec error.
    #[error("{0}")]
    Stream(#[from] veles_stream::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, Error>;
