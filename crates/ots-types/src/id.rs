use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// 48-bit identifier of an object hosted by a service instance.
///
/// IDs are unique within one directory and immutable once assigned. The
/// directory orders its entries by ascending `ObjectId`, so the derived `Ord`
/// is the traversal order used by the list control point.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Size of an object ID on the wire.
    pub const SIZE: usize = 6;

    /// ID of the directory listing object. Never assigned to user objects.
    pub const DIRECTORY_LISTING: Self = Self(0);

    /// Lowest ID a user object can have.
    pub const MIN: Self = Self(0x0000_0000_0100);

    /// Highest representable ID.
    pub const MAX: Self = Self(0xFFFF_FFFF_FFFF);

    /// Create an ID from a raw value, rejecting anything wider than 48 bits.
    pub fn new(raw: u64) -> Result<Self, TypeError> {
        if raw > Self::MAX.0 {
            return Err(TypeError::IdOutOfRange(raw));
        }
        Ok(Self(raw))
    }

    /// Decode the 6-byte little-endian wire form.
    pub fn from_le_bytes(bytes: [u8; Self::SIZE]) -> Self {
        let mut wide = [0u8; 8];
        wide[..Self::SIZE].copy_from_slice(&bytes);
        Self(u64::from_le_bytes(wide))
    }

    /// Encode to the 6-byte little-endian wire form.
    pub fn to_le_bytes(self) -> [u8; Self::SIZE] {
        let wide = self.0.to_le_bytes();
        let mut bytes = [0u8; Self::SIZE];
        bytes.copy_from_slice(&wide[..Self::SIZE]);
        bytes
    }

    /// The raw 48-bit value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns `true` for the directory listing object ID.
    pub fn is_directory_listing(self) -> bool {
        self == Self::DIRECTORY_LISTING
    }

    /// The ID `offset` positions above this one, if still within 48 bits.
    pub fn checked_add(self, offset: u64) -> Option<Self> {
        self.0
            .checked_add(offset)
            .filter(|raw| *raw <= Self::MAX.0)
            .map(Self)
    }

    /// Fixed-width diagnostic form: `0x` followed by 12 upper-case hex digits.
    pub fn to_hex(self) -> String {
        let be = self.0.to_be_bytes();
        format!("0x{}", hex::encode_upper(&be[2..]))
    }

    /// Parse the diagnostic form, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != Self::SIZE {
            return Err(TypeError::InvalidLength {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }
        let mut wide = [0u8; 8];
        wide[2..].copy_from_slice(&bytes);
        Ok(Self(u64::from_be_bytes(wide)))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<u64> for ObjectId {
    type Error = TypeError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ObjectId> for u64 {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}
