//! Registry map persistence.
//!
//! A map file is a flat sequence of records, each a `u32` packed id
//! followed by a sentinel-terminated name whose bytes are XOR-masked with
//! [`NAME_MASK`]. The masking is obfuscation, not encryption, and
//! round-trips exactly; ASCII names mask into `0x80..=0xFE`, so a masked
//! byte can never collide with the `0x00` terminator.

use std::path::Path;

use rustc_hash::FxHashMap;
use veles_stream::{codec, ByteReader, ByteSerializable, ByteWriter};

use crate::name::is_name_valid;
use crate::{Error, PackedId, Result};

/// XOR mask applied to every name byte on disk.
pub const NAME_MASK: u8 = 0xB0;

/// One persisted `(id, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistryRecord {
    pub id: PackedId,
    pub name: String,
}

impl ByteSerializable for RegistryRecord {
    fn serialize(&self, writer: &mut ByteWriter) {
        writer.write_u32(self.id.raw());
        for b in self.name.bytes() {
            writer.write_u8(b ^ NAME_MASK);
        }
        writer.write_u8(codec::DEFAULT_TERMINATOR);
    }

    fn deserialize(reader: &mut ByteReader<'_>) -> veles_stream::Result<Self> {
        let id = PackedId::from_raw(reader.next_u32()?);
        let masked = reader.next_terminated(codec::DEFAULT_TERMINATOR)?;
        let name = masked.into_iter().map(|b| (b ^ NAME_MASK) as char).collect();
        Ok(Self { id, name })
    }
}

/// Write a flat record sequence to `path`, replacing any existing file.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[RegistryRecord]) -> Result<()> {
    let mut writer = ByteWriter::new();
    for record in records {
        record.serialize(&mut writer);
    }
    writer.save(path)?;
    Ok(())
}

/// Read every record from a map file.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<RegistryRecord>> {
    let mut reader = ByteReader::open(path)?;
    let mut records = Vec::new();
    while !reader.is_at_end() {
        records.push(RegistryRecord::deserialize(&mut reader)?);
    }
    Ok(records)
}

/// Maps ids stored in a map file to their live counterparts.
///
/// Built by [`load`](Self::load): each stored name is resolved to a
/// current id by the caller-supplied resolver, and names the resolver no
/// longer knows are collected instead of failing the load.
#[derive(Debug, Default, Clone)]
pub struct IdMap {
    map: FxHashMap<u32, u32>,
}

impl IdMap {
    /// Look up the live id for a stored one.
    pub fn get(&self, stored: PackedId) -> Option<PackedId> {
        self.map.get(&stored.raw()).copied().map(PackedId::from_raw)
    }

    /// Number of resolved entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Persist `(id, full name)` pairs as a map file.
    ///
    /// Every name must be a valid `registry:item` full name.
    pub fn save<P: AsRef<Path>>(
        path: P,
        items: impl IntoIterator<Item = (PackedId, String)>,
    ) -> Result<()> {
        let mut writer = ByteWriter::new();
        for (id, name) in items {
            if !is_name_valid(&name) {
                return Err(Error::InvalidName(name));
            }
            RegistryRecord { id, name }.serialize(&mut writer);
        }
        writer.save(path)?;
        Ok(())
    }

    /// Load a map file, resolving each stored name to a live id.
    ///
    /// Returns the map plus the names the resolver could not place.
    pub fn load<P: AsRef<Path>>(
        path: P,
        mut resolve: impl FnMut(&str) -> Option<PackedId>,
    ) -> Result<(IdMap, Vec<String>)> {
        let mut map = FxHashMap::default();
        let mut missing = Vec::new();

        for record in read_records(path)? {
            match resolve(&record.name) {
                Some(live) => {
                    map.insert(record.id.raw(), live.raw());
                }
                None => missing.push(record.name),
            }
        }

        Ok((IdMap { map }, missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trip() {
        let record = RegistryRecord {
            id: PackedId::new(2, 7),
            name: "core:stone".to_string(),
        };

        let mut writer = ByteWriter::new();
        record.serialize(&mut writer);

        let bytes = writer.to_bytes();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(RegistryRecord::deserialize(&mut reader).unwrap(), record);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_name_is_masked_on_disk() {
        let record = RegistryRecord {
            id: PackedId::new(0, 1),
            name: "a".to_string(),
        };

        let mut writer = ByteWriter::new();
        record.serialize(&mut writer);

        let bytes = writer.to_bytes();
        assert_eq!(bytes[4], b'a' ^ NAME_MASK);
        assert_eq!(bytes[5], 0x00);
        // masked ASCII lands above 0x7F, never on the terminator
        assert!(bytes[4] >= 0x80);
    }

    #[test]
    fn test_records_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.map");

        let records = vec![
            RegistryRecord {
                id: PackedId::new(0, 1),
                name: "core:stone".to_string(),
            },
            RegistryRecord {
                id: PackedId::new(0, 2),
                name: "core:iron_ore".to_string(),
            },
            RegistryRecord {
                id: PackedId::new(1, 0),
                name: "mobs:slime".to_string(),
            },
        ];

        write_records(&path, &records).unwrap();
        assert_eq!(read_records(&path).unwrap(), records);
    }

    #[test]
    fn test_id_map_load_remaps_and_collects_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.map");

        IdMap::save(
            &path,
            [
                (PackedId::new(0, 1), "core:stone".to_string()),
                (PackedId::new(0, 2), "core:gone".to_string()),
            ],
        )
        .unwrap();

        // "core:stone" moved to a new id, "core:gone" no longer exists
        let (map, missing) = IdMap::load(&path, |name| match name {
            "core:stone" => Some(PackedId::new(0, 9)),
            _ => None,
        })
        .unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(PackedId::new(0, 1)), Some(PackedId::new(0, 9)));
        assert_eq!(map.get(PackedId::new(0, 2)), None);
        assert_eq!(missing, ["core:gone"]);
    }

    #[test]
    fn test_save_rejects_invalid_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.map");

        let result = IdMap::save(&path, [(PackedId::new(0, 1), "not a name".to_string())]);
        assert!(matches!(result, Err(Error::InvalidName(_))));
    }
}
