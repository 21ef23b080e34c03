use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Longest object name, in bytes of UTF-8.
pub const MAX_NAME_LEN: usize = 120;

/// Bluetooth base UUID, into which 16-bit SIG UUIDs are expanded.
const BLUETOOTH_BASE_UUID: u128 = 0x0000_0000_0000_1000_8000_0080_5F9B_34FB;

// ---------------------------------------------------------------------------
// ObjectProperties
// ---------------------------------------------------------------------------

/// OTS object properties.
///
/// # Layout
///
/// - Bit 0: Delete
/// - Bit 1: Execute
/// - Bit 2: Read
/// - Bit 3: Write
/// - Bit 4: Append
/// - Bit 5: Truncate
/// - Bit 6: Patch
/// - Bit 7: Mark
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectProperties(u32);

impl ObjectProperties {
    pub const NONE: Self = Self(0);
    pub const DELETE: Self = Self(1 << 0);
    pub const EXECUTE: Self = Self(1 << 1);
    pub const READ: Self = Self(1 << 2);
    pub const WRITE: Self = Self(1 << 3);
    pub const APPEND: Self = Self(1 << 4);
    pub const TRUNCATE: Self = Self(1 << 5);
    pub const PATCH: Self = Self(1 << 6);
    pub const MARK: Self = Self(1 << 7);

    const NAMES: [(Self, &'static str); 8] = [
        (Self::DELETE, "delete"),
        (Self::EXECUTE, "execute"),
        (Self::READ, "read"),
        (Self::WRITE, "write"),
        (Self::APPEND, "append"),
        (Self::TRUNCATE, "truncate"),
        (Self::PATCH, "patch"),
        (Self::MARK, "mark"),
    ];

    /// Create from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Set every bit of `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear every bit of `other`.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for ObjectProperties {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Debug for ObjectProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "ObjectProperties({})", names.join("|"))
    }
}

// ---------------------------------------------------------------------------
// ObjectType
// ---------------------------------------------------------------------------

/// The type of an object, expressed as a UUID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    /// A 16-bit Bluetooth SIG assigned UUID.
    Uuid16(u16),
    /// A full 128-bit UUID.
    Uuid128(Uuid),
}

impl ObjectType {
    /// "Unspecified" object type.
    pub const UNSPECIFIED: Self = Self::Uuid16(0x2ACA);

    /// The full 128-bit form. 16-bit UUIDs are expanded with the Bluetooth
    /// base UUID.
    pub fn to_uuid(self) -> Uuid {
        match self {
            Self::Uuid16(short) => Uuid::from_u128(BLUETOOTH_BASE_UUID | (u128::from(short) << 96)),
            Self::Uuid128(uuid) => uuid,
        }
    }
}

impl Default for ObjectType {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

// ---------------------------------------------------------------------------
// ObjectSize
// ---------------------------------------------------------------------------

/// Current and allocated size of an object, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSize {
    pub current: u32,
    pub allocated: u32,
}

impl ObjectSize {
    /// Create a size, checking `current <= allocated`.
    pub fn new(current: u32, allocated: u32) -> Result<Self, TypeError> {
        let size = Self { current, allocated };
        size.validate()?;
        Ok(size)
    }

    /// A size whose current length equals its allocation.
    pub fn full(allocated: u32) -> Self {
        Self {
            current: allocated,
            allocated,
        }
    }

    pub fn validate(&self) -> Result<(), TypeError> {
        if self.current > self.allocated {
            return Err(TypeError::InvalidSize {
                current: self.current,
                allocated: self.allocated,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ObjectMetadata
// ---------------------------------------------------------------------------

/// Identity-independent description of an object.
///
/// The directory owns one of these per entry; the ID itself is assigned by
/// the directory when the object is registered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub name: String,
    pub object_type: ObjectType,
    pub size: ObjectSize,
    pub properties: ObjectProperties,
}

impl ObjectMetadata {
    /// Create metadata for an object of the unspecified type.
    pub fn new(name: impl Into<String>, size: ObjectSize, properties: ObjectProperties) -> Self {
        Self {
            name: name.into(),
            object_type: ObjectType::UNSPECIFIED,
            size,
            properties,
        }
    }

    /// Builder-style override of the object type.
    pub fn with_type(mut self, object_type: ObjectType) -> Self {
        self.object_type = object_type;
        self
    }

    /// Check the name length and size invariants.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.name.is_empty() {
            return Err(TypeError::InvalidName("name is empty".into()));
        }
        if self.name.len() > MAX_NAME_LEN {
            return Err(TypeError::InvalidName(format!(
                "{} bytes exceeds the {MAX_NAME_LEN} byte limit",
                self.name.len()
            )));
        }
        self.size.validate()
    }
}
