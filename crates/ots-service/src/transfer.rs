//! The [`ObjectTransfer`] trait: the application's hooks into object
//! lifecycle, selection, and content transfer.

use ots_store::ContentHandle;
use ots_types::{ObjectId, ObjectMetadata, PeerId};

use crate::error::TransferError;

/// Destination of a content read: `len` bytes starting at `offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadRequest {
    pub offset: u32,
    pub len: u32,
}

impl ReadRequest {
    pub fn new(offset: u32, len: u32) -> Self {
        Self { offset, len }
    }
}

/// Outcome of [`ObjectTransfer::read`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadChunk<'a> {
    /// Bytes delivered for this request. May be shorter than requested.
    Data(&'a [u8]),
    /// The read carried no destination: the transfer is complete.
    Complete,
}

impl<'a> ReadChunk<'a> {
    /// Delivered bytes, empty for [`ReadChunk::Complete`].
    pub fn data(self) -> &'a [u8] {
        match self {
            Self::Data(data) => data,
            Self::Complete => &[],
        }
    }
}

/// Application backing for object content.
///
/// One implementation is bound to a service instance at construction. The
/// service calls into it from its single serialization context and hands it
/// only `&mut self`, so a callback cannot reenter the service.
pub trait ObjectTransfer: Send {
    /// Allocate backing storage for a new object.
    ///
    /// `init_seed` is an optional application value used to initialize the
    /// content. The implementation may adjust `metadata` before it is
    /// registered. An error aborts the create with nothing registered.
    fn created(
        &mut self,
        peer: PeerId,
        id: ObjectId,
        metadata: &mut ObjectMetadata,
        init_seed: Option<u32>,
    ) -> Result<ContentHandle, TransferError>;

    /// Release the backing storage of a deleted object.
    ///
    /// An error aborts the delete and leaves the object registered.
    fn deleted(
        &mut self,
        peer: PeerId,
        id: ObjectId,
        handle: ContentHandle,
    ) -> Result<(), TransferError>;

    /// The current object changed to `id`.
    fn selected(&mut self, peer: PeerId, id: ObjectId, handle: ContentHandle);

    /// Deliver content. `None` signals the end of a transfer and must not
    /// touch any content.
    fn read(
        &mut self,
        peer: PeerId,
        id: ObjectId,
        handle: ContentHandle,
        request: Option<ReadRequest>,
    ) -> Result<ReadChunk<'_>, TransferError>;

    /// Store `data` at `offset`. `remaining` is the number of bytes the peer
    /// still has to send after this chunk.
    fn write(
        &mut self,
        peer: PeerId,
        id: ObjectId,
        handle: ContentHandle,
        data: &[u8],
        offset: u32,
        remaining: u32,
    ) -> Result<(), TransferError>;
}
