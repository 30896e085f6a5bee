//! Bit-level reader over a byte buffer.

use crate::{Error, Result};

/// Reads a byte buffer one bit (or bit field) at a time, most-significant
/// bit first within each byte. Forward-only, no seeking.
///
/// Past the end of the buffer, [`read_bit`](Self::read_bit) returns `false`
/// instead of failing. This soft end-of-stream is a deliberate compatibility
/// decision and the one place in this crate where exhaustion is not an
/// error; every other component fails hard.
///
/// # Example
///
/// ```
/// use veles_stream::BitReader;
///
/// let mut bits = BitReader::new(&[0b1011_0101]);
/// assert_eq!(bits.read_bits(3).unwrap(), 0b101);
/// assert_eq!(bits.read_bits(5).unwrap(), 0b10101);
/// ```
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    cur_bit: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new bit reader over a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, cur_bit: 0 }
    }

    /// Current bit cursor (0-based, counts every bit consumed).
    #[inline]
    pub const fn position(&self) -> usize {
        self.cur_bit
    }

    /// Total number of bits in the underlying buffer.
    #[inline]
    pub const fn bit_len(&self) -> usize {
        self.data.len() * 8
    }

    /// Whether the cursor has passed the last real bit.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.cur_bit >= self.bit_len()
    }

    /// Read one bit, advancing the cursor.
    ///
    /// Returns `false` once the cursor passes the end of the buffer (soft
    /// end-of-stream, see the type docs).
    pub fn read_bit(&mut self) -> bool {
        let cur_byte = self.cur_bit / 8;
        let bit_offset = self.cur_bit % 8;

        self.cur_bit += 1;

        match self.data.get(cur_byte) {
            Some(&byte) => (byte >> (7 - bit_offset)) & 1 == 1,
            None => false,
        }
    }

    /// Read a field of `bits` bits (at most 32), most-significant bit first.
    ///
    /// Bits past the end of the buffer read as zero.
    pub fn read_bits(&mut self, bits: u32) -> Result<u32> {
        if bits > 32 {
            return Err(Error::FieldTooWide { bits });
        }

        let mut v = 0u32;
        for _ in 0..bits {
            v <<= 1;
            if self.read_bit() {
                v |= 1;
            }
        }
        Ok(v)
    }
}
