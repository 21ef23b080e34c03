//! Wire format of the OTS Object List Control Point (OLCP).
//!
//! A peer writes a procedure to the control point: one opcode byte followed by
//! the procedure's parameters. The service answers with a 3-byte indication
//! `[RESPONSE, request opcode, result code]`. Malformed writes never reach the
//! procedure layer; they are rejected at the attribute layer with an
//! [`AttError`].

pub mod ccc;
pub mod codec;
pub mod error;
pub mod message;

pub use ccc::{indications_enabled, CccValue};
pub use codec::OlcpCodec;
pub use error::{AttError, ProtocolError, ProtocolResult};
pub use message::{opcodes, OlcpProcedure, OlcpResponse, OlcpResult, OLCP_RESPONSE_SIZE};
