//! In-memory object directory.
//!
//! [`InMemoryDirectory`] keeps entries in a `BTreeMap` keyed by ID, which
//! gives ascending-order traversal directly. The number of entries is bounded
//! by the capacity chosen at construction.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use ots_store::ContentHandle;
use ots_types::{ObjectId, ObjectMetadata};
use tracing::debug;

use crate::entry::DirectoryEntry;
use crate::error::{DirectoryError, Result};
use crate::traits::ObjectDirectory;

/// Default number of objects a directory can hold.
pub const DEFAULT_CAPACITY: usize = 10;

/// A bounded, ordered implementation of [`ObjectDirectory`].
///
/// IDs are `ObjectId::MIN + index` for an index below the capacity; a new
/// object takes the lowest index not held by a live object, so IDs of
/// deleted objects are reused.
#[derive(Debug)]
pub struct InMemoryDirectory {
    entries: BTreeMap<ObjectId, DirectoryEntry>,
    capacity: usize,
}

impl InMemoryDirectory {
    /// Create an empty directory holding at most `capacity` objects.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity,
        }
    }

    /// Iterate over entries in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.entries.values()
    }

    fn id_for_index(index: usize) -> Option<ObjectId> {
        ObjectId::MIN.checked_add(index as u64)
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ObjectDirectory for InMemoryDirectory {
    fn first(&self) -> Result<&DirectoryEntry> {
        self.entries
            .values()
            .next()
            .ok_or(DirectoryError::Empty)
    }

    fn last(&self) -> Result<&DirectoryEntry> {
        self.entries
            .values()
            .next_back()
            .ok_or(DirectoryError::Empty)
    }

    fn next(&self, current: ObjectId) -> Result<&DirectoryEntry> {
        if !self.entries.contains_key(&current) {
            return Err(DirectoryError::NotFound(current));
        }
        self.entries
            .range((Excluded(current), Unbounded))
            .map(|(_, entry)| entry)
            .next()
            .ok_or(DirectoryError::OutOfBounds(current))
    }

    fn prev(&self, current: ObjectId) -> Result<&DirectoryEntry> {
        if !self.entries.contains_key(&current) {
            return Err(DirectoryError::NotFound(current));
        }
        self.entries
            .range(..current)
            .map(|(_, entry)| entry)
            .next_back()
            .ok_or(DirectoryError::OutOfBounds(current))
    }

    fn get(&self, id: ObjectId) -> Result<&DirectoryEntry> {
        self.entries.get(&id).ok_or(DirectoryError::NotFound(id))
    }

    fn metadata_mut(&mut self, id: ObjectId) -> Result<&mut ObjectMetadata> {
        self.entries
            .get_mut(&id)
            .map(|entry| &mut entry.metadata)
            .ok_or(DirectoryError::NotFound(id))
    }

    fn next_free_id(&self) -> Result<ObjectId> {
        (0..self.capacity)
            .filter_map(Self::id_for_index)
            .find(|id| !self.entries.contains_key(id))
            .ok_or(DirectoryError::Full {
                capacity: self.capacity,
            })
    }

    fn insert(
        &mut self,
        id: ObjectId,
        metadata: ObjectMetadata,
        handle: ContentHandle,
    ) -> Result<()> {
        if self.entries.contains_key(&id) {
            return Err(DirectoryError::AlreadyExists(id));
        }
        if self.entries.len() >= self.capacity {
            return Err(DirectoryError::Full {
                capacity: self.capacity,
            });
        }
        debug!(%id, name = %metadata.name, "object registered");
        self.entries.insert(
            id,
            DirectoryEntry {
                id,
                metadata,
                handle,
            },
        );
        Ok(())
    }

    fn remove(&mut self, id: ObjectId) -> Result<DirectoryEntry> {
        let entry = self
            .entries
            .remove(&id)
            .ok_or(DirectoryError::NotFound(id))?;
        debug!(%id, "object unregistered");
        Ok(entry)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn ids(&self) -> Vec<ObjectId> {
        self.entries.keys().copied().collect()
    }
}
