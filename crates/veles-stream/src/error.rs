//! Error types for veles-stream.

use thiserror::Error;

/// Errors produced by the stream codec.
#[derive(Debug, Error)]
pub enum Error {
    /// The source ran out before the requested bytes (or terminator) were available.
    #[error("end of stream reached at position {position}")]
    EndOfStream { position: u64 },

    /// A page refill found fewer bytes than the cache metadata promised.
    #[error("unexpected end of stream while refilling page at offset {offset}")]
    UnexpectedEndOfStream { offset: u64 },

    /// A search pattern was empty.
    #[error("search pattern must not be empty")]
    InvalidPattern,

    /// A bit-field read requested more than 32 bits.
    #[error("bit field of {bits} bits is too wide (maximum 32)")]
    FieldTooWide { bits: u32 },

    /// A sentinel-terminated string ended before its terminator.
    #[error("string terminator {terminator:#04x} not found before end of input")]
    UnterminatedString { terminator: u8 },

    /// The result would not fit the requested return shape.
    #[error("remaining length {len} cannot be returned as a single buffer")]
    InvalidOperation { len: u64 },

    /// I/O error from the backing source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the stream Error type.
pub type Result<T> = std::result::Result<T, Error>;
