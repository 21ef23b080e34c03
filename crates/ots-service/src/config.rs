use std::path::Path;

use ots_directory::memory::DEFAULT_CAPACITY;
use ots_store::PoolConfig;
use ots_types::{Features, ObjectId};
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// How much of a read request the pool-backed transfer delivers per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FragmentPolicy {
    /// Deliver the full request, bounded only by the allocation.
    Unbounded,
    /// Cap delivery for even-numbered object IDs, forcing the peer through a
    /// multi-part transfer.
    EvenIdCap { max_len: u32 },
}

impl FragmentPolicy {
    /// Length to deliver for a request of `requested` bytes on object `id`.
    pub fn limit(self, id: ObjectId, requested: u32) -> u32 {
        match self {
            Self::Unbounded => requested,
            Self::EvenIdCap { max_len } if id.as_u64() % 2 == 0 => requested.min(max_len),
            Self::EvenIdCap { .. } => requested,
        }
    }
}

impl Default for FragmentPolicy {
    fn default() -> Self {
        Self::EvenIdCap { max_len: 20 }
    }
}

/// Configuration of one service instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Feature bits advertised to peers.
    pub features: Features,
    /// Maximum number of objects in the directory.
    pub max_objects: usize,
    /// Shape of the content pool.
    pub pool: PoolConfig,
    /// Read fragmentation applied by the pool-backed transfer.
    pub fragment_policy: FragmentPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            features: Features::default(),
            max_objects: DEFAULT_CAPACITY,
            pool: PoolConfig::default(),
            fragment_policy: FragmentPolicy::default(),
        }
    }
}

impl ServiceConfig {
    /// Parse a TOML document. Missing keys take their default values.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> ServiceResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ServiceError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text).map_err(|e| ServiceError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
