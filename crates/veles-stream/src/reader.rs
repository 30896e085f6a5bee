//! Buffered random-access byte reader.
//!
//! [`ByteReader`] decodes typed values from either an in-memory slice or a
//! file. File mode keeps a single [`BLOCK_SIZE`] page of the file resident
//! and refills it synchronously whenever the logical position leaves it;
//! memory mode addresses the slice directly with no paging.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use zerocopy::FromBytes;

use crate::codec::{self, Primitive};
use crate::{Error, Result};

/// Size of the resident page in file mode. System-wide, not configurable.
pub const BLOCK_SIZE: usize = 4096;

/// The one resident page of a file-backed reader.
#[derive(Debug)]
struct Page {
    buf: Box<[u8; BLOCK_SIZE]>,
    /// Which `BLOCK_SIZE`-aligned region of the file this page mirrors.
    index: u64,
    /// Valid bytes in `buf`; the last page of a file may be short.
    len: usize,
}

#[derive(Debug)]
enum Source<'a> {
    Memory(&'a [u8]),
    File { handle: File, len: u64, page: Page },
}

/// A buffered reader decoding typed values from a byte source.
///
/// The logical position is a 0-based offset in `[0, len]`; `position ==
/// len` is end-of-stream. Every read advances it, `seek` moves it
/// explicitly, and every `try_*` variant restores it on failure so
/// speculative parsing never corrupts the cursor.
///
/// A reader opened with [`open`](Self::open) owns its file handle
/// exclusively; dropping the reader releases the handle and the page
/// buffer.
///
/// # Example
///
/// ```
/// use veles_stream::ByteReader;
///
/// let data = [0x78, 0x56, 0x34, 0x12, b'h', b'i', 0x00];
/// let mut reader = ByteReader::new(&data);
///
/// assert_eq!(reader.next_u32().unwrap(), 0x12345678);
/// assert_eq!(reader.next_string(0x00).unwrap(), "hi");
/// assert!(reader.is_at_end());
/// ```
#[derive(Debug)]
pub struct ByteReader<'a> {
    source: Source<'a>,
    position: u64,
}

/// Read one page's worth of bytes from the file into the page buffer.
fn fill_page(handle: &mut File, len: u64, page: &mut Page, index: u64) -> Result<()> {
    let offset = index * BLOCK_SIZE as u64;
    if offset >= len {
        return Err(Error::UnexpectedEndOfStream { offset });
    }
    let count = (len - offset).min(BLOCK_SIZE as u64) as usize;

    handle.seek(SeekFrom::Start(offset))?;
    handle.read_exact(&mut page.buf[..count]).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            // the file shrank underneath us
            Error::UnexpectedEndOfStream { offset }
        } else {
            Error::Io(e)
        }
    })?;

    page.index = index;
    page.len = count;
    Ok(())
}

impl<'a> ByteReader<'a> {
    /// Create a reader over an in-memory buffer (direct, no paging).
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            source: Source::Memory(data),
            position: 0,
        }
    }

    /// Open a file-backed reader, taking exclusive ownership of the handle.
    ///
    /// An empty file opens successfully; the first read reports
    /// [`Error::EndOfStream`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<ByteReader<'static>> {
        let mut handle = File::open(path)?;
        let len = handle.metadata()?.len();

        let mut page = Page {
            buf: Box::new([0; BLOCK_SIZE]),
            index: 0,
            len: 0,
        };
        if len > 0 {
            fill_page(&mut handle, len, &mut page, 0)?;
        }

        Ok(ByteReader {
            source: Source::File { handle, len, page },
            position: 0,
        })
    }

    /// Total length of the backing source in bytes.
    #[inline]
    pub fn len(&self) -> u64 {
        match &self.source {
            Source::Memory(data) => data.len() as u64,
            Source::File { len, .. } => *len,
        }
    }

    /// Whether the backing source has no bytes at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current logical position.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Bytes left between the position and the end of the source.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.len() - self.position
    }

    /// Whether the position has reached the end of the source.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.len()
    }

    /// Move the logical position to `pos`.
    ///
    /// Equal positions are a no-op; a page refill happens only when the
    /// target lies on a different page than the resident one. `pos == len`
    /// is valid (end-of-stream); anything beyond fails with
    /// [`Error::EndOfStream`].
    pub fn seek(&mut self, pos: u64) -> Result<()> {
        if pos == self.position {
            return Ok(());
        }
        if pos > self.len() {
            return Err(Error::EndOfStream { position: pos });
        }

        if let Source::File { handle, len, page } = &mut self.source {
            // pos == len on a page-aligned file parks at the end of the
            // last real page rather than a page that does not exist
            let mut target = pos / BLOCK_SIZE as u64;
            if pos == *len && pos > 0 && pos % BLOCK_SIZE as u64 == 0 {
                target -= 1;
            }
            if target != page.index {
                fill_page(handle, *len, page, target)?;
            }
        }

        self.position = pos;
        Ok(())
    }

    /// Advance the position by `count` bytes (may cross many pages).
    #[inline]
    pub fn skip(&mut self, count: u64) -> Result<()> {
        self.seek(self.position + count)
    }

    /// Restore the position after a failed `try_*` call. An I/O failure
    /// during the restoring refill has no channel to surface here.
    fn restore(&mut self, pos: u64) {
        let _ = self.seek(pos);
    }

    /// Consume and return one byte.
    ///
    /// Exhausting the resident page refills the next sequential page
    /// transparently; only the absolute end of the source fails.
    pub fn next(&mut self) -> Result<u8> {
        match &mut self.source {
            Source::Memory(data) => match data.get(self.position as usize) {
                Some(&b) => {
                    self.position += 1;
                    Ok(b)
                }
                None => Err(Error::EndOfStream {
                    position: self.position,
                }),
            },
            Source::File { handle, len, page } => {
                let local = (self.position - page.index * BLOCK_SIZE as u64) as usize;
                if local < page.len {
                    let b = page.buf[local];
                    self.position += 1;
                    return Ok(b);
                }

                // resident page exhausted: one refill, then surface EndOfStream
                if self.position >= *len {
                    return Err(Error::EndOfStream {
                        position: self.position,
                    });
                }
                let next_index = self.position / BLOCK_SIZE as u64;
                if next_index == page.index {
                    return Err(Error::EndOfStream {
                        position: self.position,
                    });
                }
                fill_page(handle, *len, page, next_index)?;

                let local = (self.position - page.index * BLOCK_SIZE as u64) as usize;
                let b = page.buf[local];
                self.position += 1;
                Ok(b)
            }
        }
    }

    /// [`next`](Self::next) that reports failure as `None`, position unchanged.
    #[inline]
    pub fn try_next(&mut self) -> Option<u8> {
        self.next().ok()
    }

    /// Return the byte at the current position without consuming it.
    pub fn peek(&mut self) -> Result<u8> {
        let b = self.next()?;
        // a boundary-crossing next() leaves position at the new page's
        // start + 1, so stepping back stays within the resident page
        self.position -= 1;
        Ok(b)
    }

    #[inline]
    pub fn try_peek(&mut self) -> Option<u8> {
        self.peek().ok()
    }

    /// Consume `length` bytes.
    ///
    /// On failure the position may be left partially advanced; use
    /// [`try_next_bytes`](Self::try_next_bytes) for all-or-nothing reads.
    pub fn next_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(length);
        for _ in 0..length {
            bytes.push(self.next()?);
        }
        Ok(bytes)
    }

    /// All-or-nothing [`next_bytes`](Self::next_bytes): on failure the
    /// position is restored and `None` is returned.
    pub fn try_next_bytes(&mut self, length: usize) -> Option<Vec<u8>> {
        let pos = self.position;
        match self.next_bytes(length) {
            Ok(bytes) => Some(bytes),
            Err(_) => {
                self.restore(pos);
                None
            }
        }
    }

    /// Decode one primitive value at the current position.
    pub fn next_value<T: Primitive>(&mut self) -> Result<T> {
        let mut scratch = [0u8; 8];
        for slot in scratch[..T::SIZE].iter_mut() {
            *slot = self.next()?;
        }
        Ok(T::decode(&scratch[..T::SIZE]))
    }

    /// [`next_value`](Self::next_value) restoring the position on failure.
    pub fn try_next_value<T: Primitive>(&mut self) -> Option<T> {
        let pos = self.position;
        match self.next_value() {
            Ok(v) => Some(v),
            Err(_) => {
                self.restore(pos);
                None
            }
        }
    }

    #[inline]
    pub fn next_u16(&mut self) -> Result<u16> {
        self.next_value()
    }

    #[inline]
    pub fn try_next_u16(&mut self) -> Option<u16> {
        self.try_next_value()
    }

    #[inline]
    pub fn next_i16(&mut self) -> Result<i16> {
        self.next_value()
    }

    #[inline]
    pub fn try_next_i16(&mut self) -> Option<i16> {
        self.try_next_value()
    }

    #[inline]
    pub fn next_u32(&mut self) -> Result<u32> {
        self.next_value()
    }

    #[inline]
    pub fn try_next_u32(&mut self) -> Option<u32> {
        self.try_next_value()
    }

    #[inline]
    pub fn next_i32(&mut self) -> Result<i32> {
        self.next_value()
    }

    #[inline]
    pub fn try_next_i32(&mut self) -> Option<i32> {
        self.try_next_value()
    }

    #[inline]
    pub fn next_u64(&mut self) -> Result<u64> {
        self.next_value()
    }

    #[inline]
    pub fn try_next_u64(&mut self) -> Option<u64> {
        self.try_next_value()
    }

    #[inline]
    pub fn next_i64(&mut self) -> Result<i64> {
        self.next_value()
    }

    #[inline]
    pub fn try_next_i64(&mut self) -> Option<i64> {
        self.try_next_value()
    }

    #[inline]
    pub fn next_f32(&mut self) -> Result<f32> {
        self.next_value()
    }

    #[inline]
    pub fn try_next_f32(&mut self) -> Option<f32> {
        self.try_next_value()
    }

    #[inline]
    pub fn next_f64(&mut self) -> Result<f64> {
        self.next_value()
    }

    #[inline]
    pub fn try_next_f64(&mut self) -> Option<f64> {
        self.try_next_value()
    }

    /// Decode 3 bytes as an unsigned 24-bit integer.
    pub fn next_u24(&mut self) -> Result<u32> {
        let mut scratch = [0u8; 3];
        for slot in scratch.iter_mut() {
            *slot = self.next()?;
        }
        Ok(codec::decode_u24(&scratch))
    }

    pub fn try_next_u24(&mut self) -> Option<u32> {
        let pos = self.position;
        match self.next_u24() {
            Ok(v) => Some(v),
            Err(_) => {
                self.restore(pos);
                None
            }
        }
    }

    /// Decode 3 bytes as a signed 24-bit integer (bit 23 sign-extends).
    pub fn next_i24(&mut self) -> Result<i32> {
        let mut scratch = [0u8; 3];
        for slot in scratch.iter_mut() {
            *slot = self.next()?;
        }
        Ok(codec::decode_i24(&scratch))
    }

    pub fn try_next_i24(&mut self) -> Option<i32> {
        let pos = self.position;
        match self.next_i24() {
            Ok(v) => Some(v),
            Err(_) => {
                self.restore(pos);
                None
            }
        }
    }

    /// Decode a fixed-layout struct using zerocopy.
    pub fn next_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.next_bytes(size)?;
        T::read_from_bytes(&bytes).map_err(|_| Error::UnexpectedEndOfStream {
            offset: self.position,
        })
    }

    /// Consume bytes up to and including `terminator`; the returned bytes
    /// exclude it. Fails with [`Error::EndOfStream`] if the terminator
    /// never appears.
    pub fn next_terminated(&mut self, terminator: u8) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        loop {
            match self.try_next() {
                Some(b) if b == terminator => return Ok(bytes),
                Some(b) => bytes.push(b),
                None => {
                    return Err(Error::EndOfStream {
                        position: self.position,
                    })
                }
            }
        }
    }

    /// Read a sentinel-terminated string (terminator exclusive, consumed).
    pub fn next_string(&mut self, terminator: u8) -> Result<String> {
        let bytes = self.next_terminated(terminator)?;
        Ok(bytes.into_iter().map(|b| b as char).collect())
    }

    pub fn try_next_string(&mut self, terminator: u8) -> Option<String> {
        let pos = self.position;
        match self.next_string(terminator) {
            Ok(s) => Some(s),
            Err(_) => {
                self.restore(pos);
                None
            }
        }
    }

    /// Read exactly `length` bytes as a string, no terminator semantics.
    pub fn next_string_len(&mut self, length: usize) -> Result<String> {
        let bytes = self.next_bytes(length)?;
        Ok(bytes.into_iter().map(|b| b as char).collect())
    }

    pub fn try_next_string_len(&mut self, length: usize) -> Option<String> {
        let pos = self.position;
        match self.next_string_len(length) {
            Ok(s) => Some(s),
            Err(_) => {
                self.restore(pos);
                None
            }
        }
    }

    /// Advance to the next exact occurrence of `pattern`.
    ///
    /// Returns the number of bytes skipped before the match. With
    /// `skip_over` the position ends just past the match, otherwise it is
    /// rewound to the match start so the pattern is not consumed. Reaching
    /// the end without a match returns the total bytes consumed when
    /// `return_at_end` is set and fails with [`Error::EndOfStream`]
    /// otherwise. An empty pattern is [`Error::InvalidPattern`].
    ///
    /// The search keeps a rolling window of `pattern.len()` bytes, so no
    /// already-consumed byte is ever re-read from the source.
    pub fn skip_until(
        &mut self,
        pattern: &[u8],
        skip_over: bool,
        return_at_end: bool,
    ) -> Result<u64> {
        if pattern.is_empty() {
            return Err(Error::InvalidPattern);
        }

        // pre-fill the rolling window
        let mut window = vec![0u8; pattern.len()];
        for (i, slot) in window.iter_mut().enumerate() {
            match self.try_next() {
                Some(b) => *slot = b,
                None if return_at_end => return Ok(i as u64),
                None => {
                    return Err(Error::EndOfStream {
                        position: self.position,
                    })
                }
            }
        }

        let mut rolled: u64 = 0;
        loop {
            // the window start rotates with every byte rolled in; compare
            // before pulling more so a match flush against the end is found
            let start = (rolled % pattern.len() as u64) as usize;
            let matched = pattern
                .iter()
                .enumerate()
                .all(|(i, &p)| window[(start + i) % pattern.len()] == p);
            if matched {
                if !skip_over {
                    self.seek(self.position - pattern.len() as u64)?;
                }
                return Ok(rolled);
            }

            match self.try_next() {
                Some(b) => {
                    window[(rolled % pattern.len() as u64) as usize] = b;
                    rolled += 1;
                }
                None if return_at_end => return Ok(rolled + pattern.len() as u64),
                None => {
                    return Err(Error::EndOfStream {
                        position: self.position,
                    })
                }
            }
        }
    }

    /// [`skip_until`](Self::skip_until) restoring the position on failure.
    pub fn try_skip_until(&mut self, pattern: &[u8], skip_over: bool) -> Option<u64> {
        let pos = self.position;
        match self.skip_until(pattern, skip_over, false) {
            Ok(n) => Some(n),
            Err(_) => {
                self.restore(pos);
                None
            }
        }
    }

    /// Like [`skip_until`](Self::skip_until) but returns the skipped bytes
    /// themselves, re-read from the call-time position. Finishes at the
    /// same position `skip_until` would.
    pub fn read_until(
        &mut self,
        pattern: &[u8],
        skip_over: bool,
        return_at_end: bool,
    ) -> Result<Vec<u8>> {
        let start = self.position;
        let skipped = self.skip_until(pattern, skip_over, return_at_end)?;
        let end = self.position;

        self.seek(start)?;
        let bytes = self.next_bytes(skipped as usize)?;
        self.seek(end)?;
        Ok(bytes)
    }

    pub fn try_read_until(&mut self, pattern: &[u8], skip_over: bool) -> Option<Vec<u8>> {
        let pos = self.position;
        match self.read_until(pattern, skip_over, false) {
            Ok(bytes) => Some(bytes),
            Err(_) => {
                self.restore(pos);
                None
            }
        }
    }

    /// Read everything from the current position to the end of the source.
    ///
    /// Fails with [`Error::InvalidOperation`] if the remaining length
    /// cannot index a single in-memory buffer.
    pub fn remaining_bytes(&mut self) -> Result<Vec<u8>> {
        let n = self.remaining();
        let n = usize::try_from(n).map_err(|_| Error::InvalidOperation { len: n })?;
        self.next_bytes(n)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn temp_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    /// Deterministic non-repeating-ish test payload.
    fn payload(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_memory_sequential_reads() {
        let data = [1u8, 2, 3];
        let mut reader = ByteReader::new(&data);

        assert_eq!(reader.next().unwrap(), 1);
        assert_eq!(reader.next().unwrap(), 2);
        assert_eq!(reader.next().unwrap(), 3);
        assert!(matches!(
            reader.next(),
            Err(Error::EndOfStream { position: 3 })
        ));
    }

    #[test]
    fn test_typed_decode_little_endian() {
        let data = [0x78, 0x56, 0x34, 0x12];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.next_u32().unwrap(), 0x12345678);
    }

    #[test]
    fn test_24_bit_decodes() {
        let data = [0xFF, 0xFF, 0xFF];
        assert_eq!(ByteReader::new(&data).next_u24().unwrap(), 0xFFFFFF);
        assert_eq!(ByteReader::new(&data).next_i24().unwrap(), -1);
    }

    #[test]
    fn test_peek_has_no_side_effect() {
        let data = [0xAA, 0xBB];
        let mut reader = ByteReader::new(&data);

        assert_eq!(reader.peek().unwrap(), 0xAA);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.next().unwrap(), 0xAA);
    }

    #[test]
    fn test_seek_and_skip() {
        let data = payload(32);
        let mut reader = ByteReader::new(&data);

        reader.seek(10).unwrap();
        assert_eq!(reader.next().unwrap(), data[10]);
        reader.skip(5).unwrap();
        assert_eq!(reader.next().unwrap(), data[16]);

        assert!(reader.seek(33).is_err());
        reader.seek(32).unwrap();
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_paging_transparency() {
        let data = payload(BLOCK_SIZE * 2 + 700);
        let file = temp_file(&data);
        let mut reader = ByteReader::open(file.path()).unwrap();

        assert_eq!(reader.len(), data.len() as u64);
        for (i, &expected) in data.iter().enumerate() {
            assert_eq!(reader.next().unwrap(), expected, "byte {i}");
        }
        assert!(reader.next().is_err());
    }

    #[test]
    fn test_file_seek_matches_direct_index() {
        let data = payload(BLOCK_SIZE * 3);
        let file = temp_file(&data);
        let mut reader = ByteReader::open(file.path()).unwrap();

        for &pos in &[0usize, 1, BLOCK_SIZE - 1, BLOCK_SIZE, BLOCK_SIZE * 2 + 17] {
            reader.seek(pos as u64).unwrap();
            assert_eq!(reader.next().unwrap(), data[pos], "offset {pos}");
        }

        // seeking backwards across pages works too
        reader.seek(3).unwrap();
        assert_eq!(reader.next().unwrap(), data[3]);
    }

    #[test]
    fn test_peek_at_page_boundary() {
        let data = payload(BLOCK_SIZE + 8);
        let file = temp_file(&data);
        let mut reader = ByteReader::open(file.path()).unwrap();

        reader.seek(BLOCK_SIZE as u64).unwrap();
        reader.seek(0).unwrap();
        reader.skip(BLOCK_SIZE as u64).unwrap();
        assert_eq!(reader.peek().unwrap(), data[BLOCK_SIZE]);
        assert_eq!(reader.position(), BLOCK_SIZE as u64);
        assert_eq!(reader.next().unwrap(), data[BLOCK_SIZE]);
    }

    #[test]
    fn test_empty_file_opens() {
        let file = temp_file(&[]);
        let mut reader = ByteReader::open(file.path()).unwrap();

        assert!(reader.is_empty());
        assert!(reader.is_at_end());
        assert!(matches!(
            reader.next(),
            Err(Error::EndOfStream { position: 0 })
        ));
    }

    #[test]
    fn test_try_next_bytes_rolls_back() {
        let data = [1u8, 2, 3];
        let mut reader = ByteReader::new(&data);

        assert!(reader.try_next_bytes(8).is_none());
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.try_next_bytes(3).unwrap(), [1, 2, 3]);
    }

    #[test]
    fn test_try_value_rolls_back_across_page_boundary() {
        let data = payload(BLOCK_SIZE + 4);
        let file = temp_file(&data);
        let mut reader = ByteReader::open(file.path()).unwrap();

        let start = (BLOCK_SIZE - 2) as u64;
        reader.seek(start).unwrap();

        // 6 bytes remain; the failed u64 read crossed into the last page
        // and the rollback must land back on the first one
        assert!(reader.try_next_u64().is_none());
        assert_eq!(reader.position(), start);
        assert_eq!(reader.next().unwrap(), data[BLOCK_SIZE - 2]);
    }

    #[test]
    fn test_strings() {
        let data = b"hi\0world";
        let mut reader = ByteReader::new(data);

        assert_eq!(reader.next_string(0x00).unwrap(), "hi");
        assert_eq!(reader.next_string_len(5).unwrap(), "world");

        // no terminator left: fails and try_ form restores
        reader.seek(3).unwrap();
        assert!(reader.next_string(0x00).is_err());
        reader.seek(3).unwrap();
        assert!(reader.try_next_string(0x00).is_none());
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_pattern_walk() {
        let data = b"ABCXYZABC";
        let mut reader = ByteReader::new(data);

        assert_eq!(reader.skip_until(b"ABC", true, false).unwrap(), 0);
        assert_eq!(reader.position(), 3);

        assert_eq!(reader.skip_until(b"ABC", true, false).unwrap(), 3);
        assert_eq!(reader.position(), 9);

        assert_eq!(reader.skip_until(b"ABC", true, true).unwrap(), 0);
    }

    #[test]
    fn test_skip_until_without_skip_over() {
        let data = b"ABCXYZABC";
        let mut reader = ByteReader::new(data);

        assert_eq!(reader.skip_until(b"XYZ", false, false).unwrap(), 3);
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.next().unwrap(), b'X');
    }

    #[test]
    fn test_skip_until_return_at_end_counts_consumed() {
        let mut reader = ByteReader::new(b"ABCD");
        assert_eq!(reader.skip_until(b"XY", true, true).unwrap(), 4);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_skip_until_rejects_empty_pattern() {
        let mut reader = ByteReader::new(b"data");
        assert!(matches!(
            reader.skip_until(b"", true, false),
            Err(Error::InvalidPattern)
        ));
    }

    #[test]
    fn test_skip_until_failure_leaves_position_for_try() {
        let mut reader = ByteReader::new(b"ABCXYZ");
        assert!(reader.try_skip_until(b"QQQ", true).is_none());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_until_returns_skipped_bytes() {
        let data = b"ABCXYZABC";
        let mut reader = ByteReader::new(data);

        assert_eq!(reader.read_until(b"ABC", true, false).unwrap(), b"");
        assert_eq!(reader.position(), 3);

        assert_eq!(reader.read_until(b"ABC", true, false).unwrap(), b"XYZ");
        assert_eq!(reader.position(), 9);
    }

    #[test]
    fn test_read_until_across_pages() {
        let mut data = payload(BLOCK_SIZE + 100);
        let marker = b"\xDE\xAD\xBE\xEF";
        data.splice(
            BLOCK_SIZE + 10..BLOCK_SIZE + 10,
            marker.iter().copied(),
        );
        let file = temp_file(&data);
        let mut reader = ByteReader::open(file.path()).unwrap();

        let skipped = reader.read_until(marker, true, false).unwrap();
        assert_eq!(skipped.len(), BLOCK_SIZE + 10);
        assert_eq!(skipped, data[..BLOCK_SIZE + 10]);
        assert_eq!(reader.position(), (BLOCK_SIZE + 14) as u64);
    }

    #[test]
    fn test_remaining_bytes() {
        let data = payload(64);
        let mut reader = ByteReader::new(&data);

        reader.seek(60).unwrap();
        assert_eq!(reader.remaining_bytes().unwrap(), data[60..]);
        assert!(reader.is_at_end());
        assert_eq!(reader.remaining_bytes().unwrap(), []);
    }

    #[test]
    fn test_next_struct() {
        #[derive(Debug, PartialEq, zerocopy::FromBytes)]
        #[repr(C)]
        struct Header {
            magic: u32,
            count: u16,
            flags: u16,
        }

        let data = [0x78, 0x56, 0x34, 0x12, 0x02, 0x00, 0x01, 0x00];
        let mut reader = ByteReader::new(&data);
        let header: Header = reader.next_struct().unwrap();

        assert_eq!(
            header,
            Header {
                magic: 0x12345678,
                count: 2,
                flags: 1,
            }
        );
        assert!(reader.is_at_end());
    }
}
