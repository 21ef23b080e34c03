//! The [`ObjectDirectory`] trait defining the directory interface.

use ots_store::ContentHandle;
use ots_types::{ObjectId, ObjectMetadata};

use crate::entry::DirectoryEntry;
use crate::error::Result;

/// Ordered index of active objects.
///
/// Traversal is relative to ascending ID order. The error of each traversal
/// operation is part of its contract:
///
/// - `first`/`last` fail with `Empty` when no objects exist.
/// - `next`/`prev` fail with `OutOfBounds` at the last/first entry, and with
///   `NotFound` if `current` is not registered.
/// - `get` fails with `NotFound` for an unknown ID.
pub trait ObjectDirectory: Send {
    /// Entry with the lowest ID.
    fn first(&self) -> Result<&DirectoryEntry>;

    /// Entry with the highest ID.
    fn last(&self) -> Result<&DirectoryEntry>;

    /// Entry immediately after `current` in ID order.
    fn next(&self, current: ObjectId) -> Result<&DirectoryEntry>;

    /// Entry immediately before `current` in ID order.
    fn prev(&self, current: ObjectId) -> Result<&DirectoryEntry>;

    /// Entry with the given ID.
    fn get(&self, id: ObjectId) -> Result<&DirectoryEntry>;

    /// Mutable access to an entry's metadata.
    fn metadata_mut(&mut self, id: ObjectId) -> Result<&mut ObjectMetadata>;

    /// The ID the next `insert` should use, without registering anything.
    ///
    /// Fails with `Full` when no ID is available.
    fn next_free_id(&self) -> Result<ObjectId>;

    /// Register an object under `id`.
    fn insert(&mut self, id: ObjectId, metadata: ObjectMetadata, handle: ContentHandle)
        -> Result<()>;

    /// Remove and return the entry with the given ID.
    fn remove(&mut self, id: ObjectId) -> Result<DirectoryEntry>;

    /// Number of registered objects.
    fn len(&self) -> usize;

    /// Maximum number of objects.
    fn capacity(&self) -> usize;

    /// Returns `true` if no objects are registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All IDs in ascending order.
    fn ids(&self) -> Vec<ObjectId>;
}
