use std::fmt;

/// Opaque reference from a directory entry to its backing buffer.
///
/// Carries the slot index plus the generation of the allocation, so a handle
/// kept past its release cannot address whatever object reuses the slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHandle {
    slot: u16,
    generation: u32,
}

impl ContentHandle {
    pub(crate) fn new(slot: u16, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Index of the buffer within its pool.
    pub fn slot(self) -> usize {
        usize::from(self.slot)
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ContentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHandle({self})")
    }
}

impl fmt::Display for ContentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot{}@g{}", self.slot, self.generation)
    }
}
