use crate::handle::ContentHandle;

/// Errors from content store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Every buffer in the pool is in use.
    #[error("content pool exhausted: all {capacity} buffers in use")]
    Exhausted { capacity: usize },

    /// The requested allocation does not fit in one buffer.
    #[error("requested allocation of {requested} bytes exceeds buffer size {slot_size}")]
    TooLarge { requested: usize, slot_size: usize },

    /// The handle names a slot that does not exist in this pool.
    #[error("invalid content handle {0}")]
    InvalidHandle(ContentHandle),

    /// The handle's buffer has already been released.
    #[error("content handle {0} released twice")]
    DoubleRelease(ContentHandle),

    /// The handle refers to an earlier allocation of a reused buffer.
    #[error("stale content handle {0}")]
    StaleHandle(ContentHandle),

    /// An access falls outside the allocated region of the buffer.
    #[error("access of {len} bytes at offset {offset} exceeds allocated size {allocated}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        allocated: usize,
    },
}

impl StoreError {
    /// Returns `true` for errors that mean "no room for a new object".
    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. } | Self::TooLarge { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
