use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::handle::ContentHandle;
use crate::traits::ContentStore;

/// Shape of a [`SlotPool`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of buffers (N).
    pub slot_count: usize,
    /// Size of each buffer in bytes (M).
    pub slot_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            slot_count: 5,
            slot_size: 100,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotState {
    Free,
    Used { allocated: usize },
}

#[derive(Debug)]
struct Slot {
    data: Box<[u8]>,
    state: SlotState,
    generation: u32,
}

/// Arena of fixed-size buffers with an index-based free stack.
///
/// Slot state lives in the slot itself, so a buffer cannot be on the free
/// stack and in use at the same time: `release` checks the state before
/// pushing the index back.
#[derive(Debug)]
pub struct SlotPool {
    slots: Vec<Slot>,
    free: Vec<u16>,
    slot_size: usize,
}

impl SlotPool {
    /// Create a pool with every buffer free.
    ///
    /// Slot count is clamped to `u16::MAX` buffers.
    pub fn new(config: &PoolConfig) -> Self {
        let count = config.slot_count.min(usize::from(u16::MAX));
        let slots = (0..count)
            .map(|_| Slot {
                data: vec![0u8; config.slot_size].into_boxed_slice(),
                state: SlotState::Free,
                generation: 0,
            })
            .collect();
        // Reverse so slot 0 is handed out first.
        let free = (0..count as u16).rev().collect();
        Self {
            slots,
            free,
            slot_size: config.slot_size,
        }
    }

    /// Look up the slot behind a handle that must still be live.
    ///
    /// A slot's generation advances on every allocation, so a handle from an
    /// earlier allocation never matches a reused slot.
    fn live_slot(&self, handle: ContentHandle) -> StoreResult<(&Slot, usize)> {
        let slot = self
            .slots
            .get(handle.slot())
            .ok_or(StoreError::InvalidHandle(handle))?;
        if slot.generation != handle.generation() {
            return Err(StoreError::StaleHandle(handle));
        }
        match slot.state {
            SlotState::Used { allocated } => Ok((slot, allocated)),
            SlotState::Free => Err(StoreError::StaleHandle(handle)),
        }
    }

    fn bounded(offset: usize, len: usize, allocated: usize) -> StoreResult<Range<usize>> {
        match offset.checked_add(len) {
            Some(end) if end <= allocated => Ok(offset..end),
            _ => Err(StoreError::OutOfBounds {
                offset,
                len,
                allocated,
            }),
        }
    }
}

impl Default for SlotPool {
    fn default() -> Self {
        Self::new(&PoolConfig::default())
    }
}

impl ContentStore for SlotPool {
    fn allocate_with(
        &mut self,
        size: usize,
        init: &mut dyn FnMut(&mut [u8]),
    ) -> StoreResult<ContentHandle> {
        if size > self.slot_size {
            return Err(StoreError::TooLarge {
                requested: size,
                slot_size: self.slot_size,
            });
        }
        let index = self.free.pop().ok_or(StoreError::Exhausted {
            capacity: self.slots.len(),
        })?;

        let slot = &mut self.slots[usize::from(index)];
        debug_assert_eq!(slot.state, SlotState::Free);
        slot.data.fill(0);
        init(&mut slot.data[..size]);
        slot.state = SlotState::Used { allocated: size };
        slot.generation = slot.generation.wrapping_add(1);

        let handle = ContentHandle::new(index, slot.generation);
        debug!(%handle, size, free = self.free.len(), "content buffer allocated");
        Ok(handle)
    }

    fn release(&mut self, handle: ContentHandle) -> StoreResult<()> {
        let slot = self
            .slots
            .get_mut(handle.slot())
            .ok_or(StoreError::InvalidHandle(handle))?;
        if slot.generation != handle.generation() {
            warn!(%handle, "release of stale content handle rejected");
            return Err(StoreError::StaleHandle(handle));
        }
        if slot.state == SlotState::Free {
            warn!(%handle, "double release of content handle rejected");
            return Err(StoreError::DoubleRelease(handle));
        }

        slot.state = SlotState::Free;
        // The index came from a live handle, so it fits in u16.
        self.free.push(handle.slot() as u16);
        debug!(%handle, free = self.free.len(), "content buffer released");
        Ok(())
    }

    fn read(&self, handle: ContentHandle, offset: usize, len: usize) -> StoreResult<&[u8]> {
        let (slot, allocated) = self.live_slot(handle)?;
        let range = Self::bounded(offset, len, allocated)?;
        Ok(&slot.data[range])
    }

    fn write(&mut self, handle: ContentHandle, offset: usize, data: &[u8]) -> StoreResult<()> {
        let (_, allocated) = self.live_slot(handle)?;
        let range = Self::bounded(offset, data.len(), allocated)?;
        self.slots[handle.slot()].data[range].copy_from_slice(data);
        Ok(())
    }

    fn allocated(&self, handle: ContentHandle) -> StoreResult<usize> {
        self.live_slot(handle).map(|(_, allocated)| allocated)
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn free_count(&self) -> usize {
        self.free.len()
    }

    fn slot_size(&self) -> usize {
        self.slot_size
    }
}
