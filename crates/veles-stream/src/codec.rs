//! Primitive codec: fixed-width values to and from little-endian bytes.
//!
//! Every multi-byte value in the stream format is little-endian on the wire
//! regardless of host byte order. The [`Primitive`] trait is the shared
//! byte/value seam used by both [`ByteReader`](crate::ByteReader) and
//! [`ByteWriter`](crate::ByteWriter).

use byteorder::{ByteOrder, LittleEndian};

use crate::{Error, Result};

/// Default sentinel byte terminating a string encoding.
pub const DEFAULT_TERMINATOR: u8 = 0x00;

/// A fixed-width value with a canonical little-endian byte encoding.
///
/// `decode` and `encode` require a slice of at least [`Self::SIZE`] bytes;
/// shorter slices are a caller bug and panic. Bounds checking lives in the
/// reader and writer, not here.
pub trait Primitive: Copy {
    /// Encoded width in bytes.
    const SIZE: usize;

    /// Interpret the first `SIZE` bytes of `bytes` as a value.
    fn decode(bytes: &[u8]) -> Self;

    /// Write the value into the first `SIZE` bytes of `out`.
    fn encode(self, out: &mut [u8]);
}

macro_rules! impl_primitive {
    ($($ty:ty, $size:expr, $read:ident, $write:ident;)*) => {
        $(
            impl Primitive for $ty {
                const SIZE: usize = $size;

                #[inline]
                fn decode(bytes: &[u8]) -> Self {
                    LittleEndian::$read(bytes)
                }

                #[inline]
                fn encode(self, out: &mut [u8]) {
                    LittleEndian::$write(out, self)
                }
            }
        )*
    };
}

impl_primitive! {
    u16, 2, read_u16, write_u16;
    i16, 2, read_i16, write_i16;
    u32, 4, read_u32, write_u32;
    i32, 4, read_i32, write_i32;
    u64, 8, read_u64, write_u64;
    i64, 8, read_i64, write_i64;
    f32, 4, read_f32, write_f32;
    f64, 8, read_f64, write_f64;
}

/// Decode 3 bytes as an unsigned 24-bit integer.
#[inline]
pub fn decode_u24(bytes: &[u8]) -> u32 {
    LittleEndian::read_u24(bytes)
}

/// Decode 3 bytes as a signed 24-bit integer, sign-extending bit 23.
#[inline]
pub fn decode_i24(bytes: &[u8]) -> i32 {
    LittleEndian::read_i24(bytes)
}

/// Encode the low 24 bits of `value` into 3 bytes.
#[inline]
pub fn encode_u24(out: &mut [u8], value: u32) {
    LittleEndian::write_u24(out, value)
}

/// Encode a signed 24-bit integer into 3 bytes (the sign lives in bit 23).
#[inline]
pub fn encode_i24(out: &mut [u8], value: i32) {
    LittleEndian::write_i24(out, value)
}

/// Append the bytes of `s`, then `terminator` if one was supplied.
pub fn encode_str(out: &mut Vec<u8>, s: &str, terminator: Option<u8>) {
    out.extend_from_slice(s.as_bytes());
    if let Some(t) = terminator {
        out.push(t);
    }
}

/// Decode a sentinel-terminated string from the front of `bytes`.
///
/// Returns the string (terminator exclusive) and the number of bytes
/// consumed including the terminator. Fails with
/// [`Error::UnterminatedString`] if the terminator never appears.
/// Each byte widens to one char; the format assumes ASCII-range names.
pub fn decode_str(bytes: &[u8], terminator: u8) -> Result<(String, usize)> {
    let end = memchr::memchr(terminator, bytes)
        .ok_or(Error::UnterminatedString { terminator })?;
    Ok((widen(&bytes[..end]), end + 1))
}

/// Decode exactly `len` bytes from the front of `bytes` as a string, no
/// terminator semantics.
pub fn decode_str_exact(bytes: &[u8], len: usize) -> Result<String> {
    if bytes.len() < len {
        return Err(Error::EndOfStream {
            position: bytes.len() as u64,
        });
    }
    Ok(widen(&bytes[..len]))
}

#[inline]
fn widen(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
