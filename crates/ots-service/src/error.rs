use std::path::PathBuf;

use ots_directory::DirectoryError;
use ots_store::StoreError;
use ots_types::{ObjectId, TypeError};

/// Errors reported by an [`ObjectTransfer`](crate::ObjectTransfer)
/// implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// The backing store refused the operation.
    #[error("content store: {0}")]
    Store(#[from] StoreError),

    /// The application refused the operation for its own reasons.
    #[error("rejected by application: {0}")]
    Rejected(String),
}

impl TransferError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}

/// Errors from service-level object procedures.
///
/// Control-point failures are not errors of this type: they are reported to
/// the peer as [`OlcpResult`](ots_protocol::OlcpResult) codes in the
/// response indication.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Object metadata failed validation.
    #[error("invalid object metadata: {0}")]
    InvalidMetadata(#[from] TypeError),

    /// The directory refused the operation.
    #[error("directory: {0}")]
    Directory(#[from] DirectoryError),

    /// The transfer callback refused the operation.
    #[error("transfer: {0}")]
    Transfer(#[from] TransferError),

    /// No object is currently selected.
    #[error("no current object selected")]
    NoCurrentObject,

    /// The object lacks a property the operation requires.
    #[error("object {id} does not permit {property}")]
    PropertyNotSet { id: ObjectId, property: &'static str },

    /// Delete requested for an object without the delete property.
    #[error("object {0} cannot be deleted")]
    DeleteNotPermitted(ObjectId),

    /// The requested range lies outside the object.
    #[error("range of {len} bytes at offset {offset} exceeds object size {limit}")]
    InvalidRange { offset: u32, len: u32, limit: u32 },

    /// Configuration could not be read or parsed.
    #[error("configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl ServiceError {
    /// Returns `true` when a create failed for lack of room: pool exhausted,
    /// allocation larger than a buffer, or directory full.
    pub fn is_resource_exhausted(&self) -> bool {
        match self {
            Self::Transfer(TransferError::Store(e)) => e.is_resource_exhausted(),
            Self::Directory(DirectoryError::Full { .. }) => true,
            _ => false,
        }
    }
}

/// Result alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
