//! Object directory for the Object Transfer Service.
//!
//! The directory is the ordered index of every object a service instance
//! hosts. Entries are keyed by a 48-bit [`ObjectId`](ots_types::ObjectId)
//! and traversed in ascending ID order; this is the order the list control
//! point walks with first/last/next/previous.
//!
//! # Architecture
//!
//! - The directory owns identity and metadata. Content lives in a
//!   [`ContentStore`](ots_store::ContentStore); each entry links to its buffer
//!   through a [`ContentHandle`](ots_store::ContentHandle).
//! - IDs are assigned by the directory, starting at `ObjectId::MIN`, and never
//!   change while the object exists.
//! - An empty directory is a valid state. Traversal fails distinctly for "no
//!   objects at all", "boundary reached" and "unknown ID".
//!
//! # Modules
//!
//! - [`error`] -- [`DirectoryError`]
//! - [`entry`] -- [`DirectoryEntry`]
//! - [`traits`] -- the [`ObjectDirectory`] trait
//! - [`memory`] -- [`InMemoryDirectory`], a bounded ordered map

pub mod entry;
pub mod error;
pub mod memory;
pub mod traits;

pub use entry::DirectoryEntry;
pub use error::{DirectoryError, Result};
pub use memory::InMemoryDirectory;
pub use traits::ObjectDirectory;
