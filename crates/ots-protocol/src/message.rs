use std::fmt;

use ots_types::ObjectId;

/// Size of an OLCP response indication.
pub const OLCP_RESPONSE_SIZE: usize = 3;

/// OLCP opcode values.
pub mod opcodes {
    pub const FIRST: u8 = 0x01;
    pub const LAST: u8 = 0x02;
    pub const PREVIOUS: u8 = 0x03;
    pub const NEXT: u8 = 0x04;
    pub const GO_TO: u8 = 0x05;
    pub const ORDER: u8 = 0x06;
    pub const REQUEST_NUMBER_OF_OBJECTS: u8 = 0x07;
    pub const CLEAR_MARKING: u8 = 0x08;
    pub const RESPONSE: u8 = 0x70;
}

/// A decoded OLCP procedure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OlcpProcedure {
    First,
    Last,
    Previous,
    Next,
    GoTo(ObjectId),
    /// Carries the requested sort key; never acted upon.
    Order(u8),
    RequestNumberOfObjects,
    ClearMarking,
    /// Any opcode this service does not know.
    Unsupported(u8),
}

impl OlcpProcedure {
    /// Opcode byte echoed back in the response.
    pub fn opcode(&self) -> u8 {
        match self {
            Self::First => opcodes::FIRST,
            Self::Last => opcodes::LAST,
            Self::Previous => opcodes::PREVIOUS,
            Self::Next => opcodes::NEXT,
            Self::GoTo(_) => opcodes::GO_TO,
            Self::Order(_) => opcodes::ORDER,
            Self::RequestNumberOfObjects => opcodes::REQUEST_NUMBER_OF_OBJECTS,
            Self::ClearMarking => opcodes::CLEAR_MARKING,
            Self::Unsupported(op) => *op,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::First => "First",
            Self::Last => "Last",
            Self::Previous => "Previous",
            Self::Next => "Next",
            Self::GoTo(_) => "GoTo",
            Self::Order(_) => "Order",
            Self::RequestNumberOfObjects => "RequestNumberOfObjects",
            Self::ClearMarking => "ClearMarking",
            Self::Unsupported(_) => "Unsupported",
        }
    }

    /// Exact total write length for a known opcode, `None` for unknown ones.
    pub fn expected_len(opcode: u8) -> Option<usize> {
        match opcode {
            opcodes::FIRST
            | opcodes::LAST
            | opcodes::PREVIOUS
            | opcodes::NEXT
            | opcodes::REQUEST_NUMBER_OF_OBJECTS
            | opcodes::CLEAR_MARKING => Some(1),
            opcodes::GO_TO => Some(1 + ObjectId::SIZE),
            opcodes::ORDER => Some(1 + 1),
            _ => None,
        }
    }
}

/// OLCP result codes carried in the response indication.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OlcpResult {
    Success = 0x01,
    ProcNotSupported = 0x02,
    InvalidParameter = 0x03,
    OperationFailed = 0x04,
    OutOfBounds = 0x05,
    TooManyObjects = 0x06,
    NoObject = 0x07,
    ObjectIdNotFound = 0x08,
}

impl OlcpResult {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl TryFrom<u8> for OlcpResult {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, u8> {
        Ok(match code {
            0x01 => Self::Success,
            0x02 => Self::ProcNotSupported,
            0x03 => Self::InvalidParameter,
            0x04 => Self::OperationFailed,
            0x05 => Self::OutOfBounds,
            0x06 => Self::TooManyObjects,
            0x07 => Self::NoObject,
            0x08 => Self::ObjectIdNotFound,
            other => return Err(other),
        })
    }
}

impl fmt::Display for OlcpResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Success => "success",
            Self::ProcNotSupported => "procedure not supported",
            Self::InvalidParameter => "invalid parameter",
            Self::OperationFailed => "operation failed",
            Self::OutOfBounds => "out of bounds",
            Self::TooManyObjects => "too many objects",
            Self::NoObject => "no object",
            Self::ObjectIdNotFound => "object id not found",
        };
        f.write_str(text)
    }
}

/// Response indication: the echoed request opcode and its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OlcpResponse {
    pub request_opcode: u8,
    pub result: OlcpResult,
}

impl OlcpResponse {
    pub fn new(request_opcode: u8, result: OlcpResult) -> Self {
        Self {
            request_opcode,
            result,
        }
    }
}
