//! Record-level serialization seam over the reader/writer pair.

use crate::{ByteReader, ByteWriter, Result};

/// A record type with a byte encoding built from the stream primitives.
///
/// `serialize` appends the record's encoding to a writer; `deserialize`
/// consumes the same encoding from a reader positioned at its start.
pub trait ByteSerializable: Sized {
    /// Append this record's byte encoding to `writer`.
    fn serialize(&self, writer: &mut ByteWriter);

    /// Decode one record from the reader's current position.
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self>;
}
