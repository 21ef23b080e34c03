//! [`PooledTransfer`]: an [`ObjectTransfer`] backed by a [`ContentStore`].

use ots_store::{ContentHandle, ContentStore, SlotPool};
use ots_types::{ObjectId, ObjectMetadata, PeerId};
use tracing::{debug, info};

use crate::config::FragmentPolicy;
use crate::error::TransferError;
use crate::transfer::{ObjectTransfer, ReadChunk, ReadRequest};

/// Transfer implementation that keeps object content in a fixed pool.
///
/// New buffers are filled with `(i + 1) * seed` (wrapping) for byte `i`,
/// so a seed of 1 yields `1, 2, 3, ...`. Without a seed the buffer stays
/// zeroed. Reads are shortened according to the [`FragmentPolicy`].
#[derive(Debug)]
pub struct PooledTransfer<S: ContentStore = SlotPool> {
    store: S,
    policy: FragmentPolicy,
}

impl<S: ContentStore> PooledTransfer<S> {
    pub fn new(store: S, policy: FragmentPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> FragmentPolicy {
        self.policy
    }
}

fn seeded_fill(seed: u32) -> impl FnMut(&mut [u8]) {
    move |buf: &mut [u8]| {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = (i as u32).wrapping_add(1).wrapping_mul(seed) as u8;
        }
    }
}

impl<S: ContentStore> ObjectTransfer for PooledTransfer<S> {
    fn created(
        &mut self,
        peer: PeerId,
        id: ObjectId,
        metadata: &mut ObjectMetadata,
        init_seed: Option<u32>,
    ) -> Result<ContentHandle, TransferError> {
        let size = metadata.size.allocated as usize;
        let handle = match init_seed {
            Some(seed) => self.store.allocate_with(size, &mut seeded_fill(seed))?,
            None => self.store.allocate(size)?,
        };
        info!(%peer, %id, name = %metadata.name, %handle, "object created");
        Ok(handle)
    }

    fn deleted(
        &mut self,
        peer: PeerId,
        id: ObjectId,
        handle: ContentHandle,
    ) -> Result<(), TransferError> {
        self.store.release(handle)?;
        info!(%peer, %id, "object deleted");
        Ok(())
    }

    fn selected(&mut self, peer: PeerId, id: ObjectId, handle: ContentHandle) {
        info!(%peer, %id, %handle, "object selected");
    }

    fn read(
        &mut self,
        peer: PeerId,
        id: ObjectId,
        handle: ContentHandle,
        request: Option<ReadRequest>,
    ) -> Result<ReadChunk<'_>, TransferError> {
        let Some(ReadRequest { offset, len }) = request else {
            info!(%peer, %id, "object read complete");
            return Ok(ReadChunk::Complete);
        };

        let offset = offset as usize;
        let available = self.store.allocated(handle)?.saturating_sub(offset);
        let len = (self.policy.limit(id, len) as usize).min(available);
        let data = self.store.read(handle, offset, len)?;
        debug!(%peer, %id, offset, len, "object read");
        Ok(ReadChunk::Data(data))
    }

    fn write(
        &mut self,
        peer: PeerId,
        id: ObjectId,
        handle: ContentHandle,
        data: &[u8],
        offset: u32,
        remaining: u32,
    ) -> Result<(), TransferError> {
        self.store.write(handle, offset as usize, data)?;
        debug!(%peer, %id, offset, len = data.len(), remaining, "object written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ots_store::{PoolConfig, StoreError};
    use ots_types::{ObjectProperties, ObjectSize};

    const PEER: PeerId = PeerId::new(0);

    /// Helper: pool-backed transfer with room for `slots` 100-byte objects.
    fn transfer(slots: usize, policy: FragmentPolicy) -> PooledTransfer {
        PooledTransfer::new(
            SlotPool::new(&PoolConfig {
                slot_count: slots,
                slot_size: 100,
            }),
            policy,
        )
    }

    fn meta(allocated: u32) -> ObjectMetadata {
        ObjectMetadata::new("obj", ObjectSize::full(allocated), ObjectProperties::READ)
    }

    fn id(raw: u64) -> ObjectId {
        ObjectId::new(raw).unwrap()
    }

    // ---- Create / delete ----

    #[test]
    fn created_fills_with_seed() {
        let mut t = transfer(1, FragmentPolicy::Unbounded);
        let h = t.created(PEER, id(0x101), &mut meta(100), Some(2)).unwrap();
        let data = t.read(PEER, id(0x101), h, Some(ReadRequest::new(0, 4))).unwrap().data();
        assert_eq!(data, &[2, 4, 6, 8]);
    }

    #[test]
    fn seeded_fill_wraps() {
        let mut t = transfer(1, FragmentPolicy::Unbounded);
        let h = t.created(PEER, id(0x101), &mut meta(100), Some(1)).unwrap();
        let data = t.read(PEER, id(0x101), h, Some(ReadRequest::new(0, 100))).unwrap().data();
        assert_eq!(data[0], 1);
        assert_eq!(data[99], 100);

        let mut t = transfer(1, FragmentPolicy::Unbounded);
        let h = t.created(PEER, id(0x101), &mut meta(100), Some(3)).unwrap();
        let data = t.read(PEER, id(0x101), h, Some(ReadRequest::new(85, 1))).unwrap().data();
        assert_eq!(data, &[(86u32 * 3) as u8]);
    }

    #[test]
    fn created_without_seed_is_zeroed() {
        let mut t = transfer(1, FragmentPolicy::Unbounded);
        let h = t.created(PEER, id(0x101), &mut meta(10), None).unwrap();
        let data = t.read(PEER, id(0x101), h, Some(ReadRequest::new(0, 10))).unwrap().data();
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn created_beyond_pool_is_exhausted() {
        let mut t = transfer(1, FragmentPolicy::Unbounded);
        t.created(PEER, id(0x100), &mut meta(10), None).unwrap();
        let err = t.created(PEER, id(0x101), &mut meta(10), None).unwrap_err();
        assert_eq!(err, TransferError::Store(StoreError::Exhausted { capacity: 1 }));
    }

    #[test]
    fn created_larger_than_buffer_is_rejected() {
        let mut t = transfer(1, FragmentPolicy::Unbounded);
        let err = t.created(PEER, id(0x100), &mut meta(101), None).unwrap_err();
        assert!(matches!(err, TransferError::Store(StoreError::TooLarge { .. })));
        assert_eq!(t.store().free_count(), 1);
    }

    #[test]
    fn deleted_twice_is_rejected() {
        let mut t = transfer(1, FragmentPolicy::Unbounded);
        let h = t.created(PEER, id(0x100), &mut meta(10), None).unwrap();
        t.deleted(PEER, id(0x100), h).unwrap();
        assert_eq!(t.store().free_count(), 1);
        let err = t.deleted(PEER, id(0x100), h).unwrap_err();
        assert_eq!(err, TransferError::Store(StoreError::DoubleRelease(h)));
        assert_eq!(t.store().free_count(), 1);
    }

    // ---- Reads ----

    #[test]
    fn even_id_read_is_capped_at_twenty_bytes() {
        let mut t = transfer(2, FragmentPolicy::default());
        let h = t.created(PEER, id(0x100), &mut meta(100), Some(1)).unwrap();
        let data = t.read(PEER, id(0x100), h, Some(ReadRequest::new(0, 100))).unwrap().data();
        assert_eq!(data.len(), 20);
    }

    #[test]
    fn odd_id_read_returns_full_request() {
        let mut t = transfer(2, FragmentPolicy::default());
        let h = t.created(PEER, id(0x101), &mut meta(100), Some(1)).unwrap();
        let data = t.read(PEER, id(0x101), h, Some(ReadRequest::new(0, 100))).unwrap().data();
        assert_eq!(data.len(), 100);
    }

    #[test]
    fn read_is_bounded_by_allocation() {
        let mut t = transfer(1, FragmentPolicy::Unbounded);
        let h = t.created(PEER, id(0x101), &mut meta(30), Some(1)).unwrap();
        let data = t.read(PEER, id(0x101), h, Some(ReadRequest::new(25, 100))).unwrap().data();
        assert_eq!(data, &[26, 27, 28, 29, 30]);
    }

    #[test]
    fn read_past_allocation_is_rejected() {
        let mut t = transfer(1, FragmentPolicy::Unbounded);
        let h = t.created(PEER, id(0x101), &mut meta(30), None).unwrap();
        let err = t.read(PEER, id(0x101), h, Some(ReadRequest::new(31, 1))).unwrap_err();
        assert!(matches!(err, TransferError::Store(StoreError::OutOfBounds { .. })));
    }

    #[test]
    fn read_without_destination_is_complete_and_changes_nothing() {
        let mut t = transfer(1, FragmentPolicy::Unbounded);
        let h = t.created(PEER, id(0x101), &mut meta(10), Some(5)).unwrap();
        let before = t.store().read(h, 0, 10).unwrap().to_vec();

        assert_eq!(t.read(PEER, id(0x101), h, None).unwrap(), ReadChunk::Complete);
        assert_eq!(t.store().read(h, 0, 10).unwrap(), &before[..]);
    }

    // ---- Writes ----

    #[test]
    fn write_then_read_round_trips() {
        let mut t = transfer(1, FragmentPolicy::Unbounded);
        let h = t.created(PEER, id(0x101), &mut meta(50), None).unwrap();
        t.write(PEER, id(0x101), h, b"hello", 10, 0).unwrap();
        let data = t.read(PEER, id(0x101), h, Some(ReadRequest::new(10, 5))).unwrap().data();
        assert_eq!(data, b"hello");
    }

    #[test]
    fn write_past_allocation_is_rejected() {
        let mut t = transfer(1, FragmentPolicy::Unbounded);
        let h = t.created(PEER, id(0x101), &mut meta(8), None).unwrap();
        let err = t.write(PEER, id(0x101), h, b"abcd", 6, 0).unwrap_err();
        assert!(matches!(err, TransferError::Store(StoreError::OutOfBounds { .. })));
    }
}
