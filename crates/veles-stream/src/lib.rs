//! Buffered byte-stream codec.
//!
//! This crate turns a flat byte source (a file or an in-memory buffer)
//! into typed primitive values with guaranteed little-endian encoding:
//!
//! - [`ByteReader`] - random-access decode with seeking, peeking, bounded
//!   pattern search, and a paged cache over large files
//! - [`ByteWriter`] - append-only encode into a growable buffer, flushed
//!   wholesale to a file
//! - [`BitReader`] - sub-byte bit fields, most-significant bit first
//! - [`codec`] - the shared value/byte conversion layer
//! - [`ByteSerializable`] - record types built from these primitives

mod bits;
mod error;
mod reader;
mod serialize;
mod writer;

pub mod codec;

pub use bits::BitReader;
pub use error::{Error, Result};
pub use reader::{ByteReader, BLOCK_SIZE};
pub use serialize::ByteSerializable;
pub use writer::ByteWriter;

/// Re-export zerocopy traits for typed struct reads
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
