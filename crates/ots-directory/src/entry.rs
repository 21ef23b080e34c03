use ots_store::ContentHandle;
use ots_types::{ObjectId, ObjectMetadata};

/// One object registered in the directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: ObjectId,
    pub metadata: ObjectMetadata,
    pub handle: ContentHandle,
}
