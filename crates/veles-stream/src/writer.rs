//! Append-only byte writer.

use std::fs;
use std::path::Path;

use crate::codec::{self, Primitive};
use crate::Result;

/// Accumulates an ordered byte sequence in memory.
///
/// Values are encoded through the primitive codec (little-endian on the
/// wire) and appended; once written, bytes are never removed. The buffer
/// is materialized either as a snapshot via [`to_bytes`](Self::to_bytes)
/// or flushed wholesale to a file via [`save`](Self::save).
///
/// # Example
///
/// ```
/// use veles_stream::ByteWriter;
///
/// let mut writer = ByteWriter::new();
/// writer.write_u32(0x12345678);
/// writer.write_string("hi", Some(0x00));
/// assert_eq!(writer.to_bytes(), [0x78, 0x56, 0x34, 0x12, b'h', b'i', 0x00]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create an empty writer.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with a pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Append raw bytes as-is.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append one encoded primitive value.
    pub fn write_value<T: Primitive>(&mut self, value: T) {
        let mut scratch = [0u8; 8];
        value.encode(&mut scratch[..T::SIZE]);
        self.buf.extend_from_slice(&scratch[..T::SIZE]);
    }

    /// Append a sequence of values, preserving iteration order.
    pub fn write_all_values<T: Primitive>(&mut self, values: impl IntoIterator<Item = T>) {
        for value in values {
            self.write_value(value);
        }
    }

    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.write_value(value);
    }

    #[inline]
    pub fn write_i16(&mut self, value: i16) {
        self.write_value(value);
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.write_value(value);
    }

    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.write_value(value);
    }

    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        self.write_value(value);
    }

    #[inline]
    pub fn write_i64(&mut self, value: i64) {
        self.write_value(value);
    }

    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.write_value(value);
    }

    #[inline]
    pub fn write_f64(&mut self, value: f64) {
        self.write_value(value);
    }

    /// Append the low 24 bits of `value` as 3 bytes.
    pub fn write_u24(&mut self, value: u32) {
        let mut scratch = [0u8; 3];
        codec::encode_u24(&mut scratch, value);
        self.buf.extend_from_slice(&scratch);
    }

    /// Append a signed 24-bit integer as 3 bytes.
    pub fn write_i24(&mut self, value: i32) {
        let mut scratch = [0u8; 3];
        codec::encode_i24(&mut scratch, value);
        self.buf.extend_from_slice(&scratch);
    }

    /// Append the bytes of `s`, then `terminator` if one was supplied.
    pub fn write_string(&mut self, s: &str, terminator: Option<u8>) {
        codec::encode_str(&mut self.buf, s, terminator);
    }

    /// Non-destructive snapshot of everything written so far.
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }

    /// Consume the writer and take the accumulated buffer.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Flush the whole buffer to a file in one pass.
    ///
    /// Missing parent directories are created first. The file handle is
    /// scoped to this call and released on every exit path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &self.buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_primitives_in_order() {
        let mut writer = ByteWriter::new();
        writer.write_u16(0x1234);
        writer.write_u8(0xAB);
        writer.write_i32(-2);

        assert_eq!(
            writer.to_bytes(),
            [0x34, 0x12, 0xAB, 0xFE, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(writer.len(), 7);
    }

    #[test]
    fn test_write_sequence_preserves_order() {
        let mut writer = ByteWriter::new();
        writer.write_all_values([0x0102u16, 0x0304, 0x0506]);
        assert_eq!(writer.to_bytes(), [0x02, 0x01, 0x04, 0x03, 0x06, 0x05]);
    }

    #[test]
    fn test_write_24_bit() {
        let mut writer = ByteWriter::new();
        writer.write_u24(0x123456);
        writer.write_i24(-1);
        assert_eq!(writer.to_bytes(), [0x56, 0x34, 0x12, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_write_string_terminators() {
        let mut writer = ByteWriter::new();
        writer.write_string("hi", Some(0x00));
        writer.write_string("raw", None);
        assert_eq!(writer.to_bytes(), b"hi\0raw");
    }

    #[test]
    fn test_snapshot_is_non_destructive() {
        let mut writer = ByteWriter::new();
        writer.write_u8(1);
        let first = writer.to_bytes();
        writer.write_u8(2);
        assert_eq!(first, [1]);
        assert_eq!(writer.to_bytes(), [1, 2]);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.bin");

        let mut writer = ByteWriter::new();
        writer.write_u32(0xCAFEBABE);
        writer.save(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), [0xBE, 0xBA, 0xFE, 0xCA]);
    }
}
