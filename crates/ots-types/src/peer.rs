use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle of the connected peer that issued a request.
///
/// Passed through to the transfer callbacks so an application can tell
/// peers apart; the engine itself keeps no per-peer state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(u16);

impl PeerId {
    /// Stand-in for requests that originate locally rather than from a peer.
    pub const LOCAL: Self = Self(u16::MAX);

    pub const fn new(handle: u16) -> Self {
        Self(handle)
    }

    pub const fn handle(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeerId({self})")
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::LOCAL {
            f.write_str("local")
        } else {
            write!(f, "conn#{}", self.0)
        }
    }
}
