//! Fixed-capacity content storage for OTS objects.
//!
//! Object content lives in a pool of N equally sized buffers allocated once at
//! construction. A buffer is either free or in use; it moves free → used when
//! an object is created and used → free when the object is deleted. The two
//! sets are disjoint and together always cover the whole pool.
//!
//! # Storage Backends
//!
//! All backends implement the [`ContentStore`] trait:
//!
//! - [`SlotPool`] -- slot arena with an index-based free stack
//!
//! # Design Rules
//!
//! 1. No allocation after construction; the pool never grows.
//! 2. A [`ContentHandle`] names a slot *and* the allocation that produced it.
//!    Handles outlive their allocation only as stale values that every
//!    operation rejects.
//! 3. Releasing a buffer twice is an error, never a silent corruption of the
//!    free/used partition.
//! 4. Every read and write is bounds-checked against the allocated size.

pub mod error;
pub mod handle;
pub mod pool;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use handle::ContentHandle;
pub use pool::{PoolConfig, SlotPool};
pub use traits::ContentStore;
