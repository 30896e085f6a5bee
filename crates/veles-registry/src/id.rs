//! Packed registry item identifiers.

use std::fmt;

/// A registry item id packed into one `u32`: the registry id in the high
/// 16 bits, the item id in the low 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PackedId(u32);

impl PackedId {
    /// Pack a `(registry, item)` pair.
    #[inline]
    pub const fn new(registry: u16, item: u16) -> Self {
        Self((registry as u32) << 16 | item as u32)
    }

    /// Reconstruct from the raw packed value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw packed value, as stored on disk.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The registry half (high 16 bits).
    #[inline]
    pub const fn registry(self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// The item half (low 16 bits).
    #[inline]
    pub const fn item(self) -> u16 {
        self.0 as u16
    }
}

impl From<u32> for PackedId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<PackedId> for u32 {
    fn from(id: PackedId) -> Self {
        id.0
    }
}

impl fmt::Display for PackedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.registry(), self.item())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing() {
        let id = PackedId::new(3, 0x0102);
        assert_eq!(id.raw(), 0x0003_0102);
        assert_eq!(id.registry(), 3);
        assert_eq!(id.item(), 0x0102);
    }

    #[test]
    fn test_raw_round_trip() {
        let id = PackedId::new(u16::MAX, u16::MAX);
        assert_eq!(PackedId::from_raw(id.raw()), id);
        assert_eq!(id.raw(), u32::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(PackedId::new(2, 41).to_string(), "2:41");
    }
}
