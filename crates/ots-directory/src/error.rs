//! Error types for directory operations.

use ots_types::ObjectId;
use thiserror::Error;

/// Errors that can occur during directory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The directory holds no objects.
    #[error("directory is empty")]
    Empty,

    /// No entry has the given ID.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// Traversal from the given ID would step past the first or last entry.
    #[error("no object beyond {0} in that direction")]
    OutOfBounds(ObjectId),

    /// Every directory slot is taken.
    #[error("directory full: {capacity} objects")]
    Full { capacity: usize },

    /// An entry with this ID is already registered.
    #[error("object already exists: {0}")]
    AlreadyExists(ObjectId),
}

/// Convenience type alias for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;
