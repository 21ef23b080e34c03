//! Feature bits a service instance advertises to peers.

use serde::{Deserialize, Serialize};

/// Object Action Control Point features.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OacpFeatures(u32);

impl OacpFeatures {
    pub const NONE: Self = Self(0);
    pub const CREATE: Self = Self(1 << 0);
    pub const DELETE: Self = Self(1 << 1);
    pub const CHECKSUM: Self = Self(1 << 2);
    pub const EXECUTE: Self = Self(1 << 3);
    pub const READ: Self = Self(1 << 4);
    pub const WRITE: Self = Self(1 << 5);
    pub const APPEND: Self = Self(1 << 6);
    pub const TRUNCATE: Self = Self(1 << 7);
    pub const PATCH: Self = Self(1 << 8);
    pub const ABORT: Self = Self(1 << 9);

    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for OacpFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Object List Control Point features.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OlcpFeatures(u32);

impl OlcpFeatures {
    pub const NONE: Self = Self(0);
    pub const GO_TO: Self = Self(1 << 0);
    pub const ORDER: Self = Self(1 << 1);
    pub const NUMBER_REQ: Self = Self(1 << 2);
    pub const CLEAR_MARKING: Self = Self(1 << 3);

    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for OlcpFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Combined OTS feature characteristic value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub oacp: OacpFeatures,
    pub olcp: OlcpFeatures,
}

impl Features {
    /// Encode as the 8-byte feature characteristic value (OACP then OLCP,
    /// each little-endian).
    pub fn to_bytes(self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.oacp.bits().to_le_bytes());
        out[4..].copy_from_slice(&self.olcp.bits().to_le_bytes());
        out
    }
}

impl Default for Features {
    /// Read, write and patch content; go-to navigation.
    fn default() -> Self {
        Self {
            oacp: OacpFeatures::READ | OacpFeatures::WRITE | OacpFeatures::PATCH,
            olcp: OlcpFeatures::GO_TO,
        }
    }
}
