use crate::error::StoreResult;
use crate::handle::ContentHandle;

/// Fixed-capacity store of object content buffers.
///
/// All implementations must satisfy these invariants:
/// - Free and used buffers form a partition of the pool at all times.
/// - `allocate` either moves exactly one buffer free → used or changes nothing.
/// - `release` moves exactly one buffer used → free, and rejects a handle
///   whose buffer is already free or has been reallocated since.
/// - `read`/`write` never touch bytes outside the allocated region.
///
/// Methods take `&mut self`: a store is mutated from one context only.
pub trait ContentStore: Send {
    /// Reserve a buffer of `size` bytes and run `init` over its allocated
    /// region before returning the handle.
    fn allocate_with(
        &mut self,
        size: usize,
        init: &mut dyn FnMut(&mut [u8]),
    ) -> StoreResult<ContentHandle>;

    /// Return a buffer to the free set.
    fn release(&mut self, handle: ContentHandle) -> StoreResult<()>;

    /// Borrow `len` bytes starting at `offset`.
    fn read(&self, handle: ContentHandle, offset: usize, len: usize) -> StoreResult<&[u8]>;

    /// Copy `data` into the buffer starting at `offset`.
    fn write(&mut self, handle: ContentHandle, offset: usize, data: &[u8]) -> StoreResult<()>;

    /// Allocated size of the buffer behind `handle`.
    fn allocated(&self, handle: ContentHandle) -> StoreResult<usize>;

    /// Total number of buffers.
    fn capacity(&self) -> usize;

    /// Number of buffers currently free.
    fn free_count(&self) -> usize;

    /// Size of each buffer in bytes.
    fn slot_size(&self) -> usize;

    /// Reserve a zero-filled buffer of `size` bytes.
    fn allocate(&mut self, size: usize) -> StoreResult<ContentHandle> {
        self.allocate_with(size, &mut |_| {})
    }

    /// Number of buffers currently in use.
    fn used_count(&self) -> usize {
        self.capacity() - self.free_count()
    }
}
