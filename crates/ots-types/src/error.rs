use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("object id {0:#x} does not fit in 48 bits")]
    IdOutOfRange(u64),

    #[error("invalid object name: {0}")]
    InvalidName(String),

    #[error("current size {current} exceeds allocated size {allocated}")]
    InvalidSize { current: u32, allocated: u32 },
}
