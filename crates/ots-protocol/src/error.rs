use thiserror::Error;

/// Attribute-layer rejection of a control-point write.
///
/// These precede procedure decoding: no state is mutated and no indication
/// is sent. The peer sees an ordinary ATT write failure carrying [`code`].
///
/// [`code`]: AttError::code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttError {
    #[error("invalid offset {0} for control point write")]
    InvalidOffset(u16),

    #[error("invalid attribute length {actual} (expected {expected})")]
    InvalidAttributeLength { expected: usize, actual: usize },

    #[error("client characteristic configuration improperly configured")]
    CccImproperlyConfigured,
}

impl AttError {
    /// ATT protocol error code.
    pub fn code(self) -> u8 {
        match self {
            Self::InvalidOffset(_) => 0x07,
            Self::InvalidAttributeLength { .. } => 0x0D,
            Self::CccImproperlyConfigured => 0xFD,
        }
    }
}

/// Errors decoding data received from the service side of the control point.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("framing error: {0}")]
    FramingError(String),

    #[error("invalid response opcode: {0:#04x}")]
    InvalidResponseOpcode(u8),

    #[error("invalid result code: {0:#04x}")]
    InvalidResultCode(u8),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
