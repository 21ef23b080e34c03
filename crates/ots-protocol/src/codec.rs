use bytes::{Buf, BufMut, Bytes, BytesMut};
use ots_types::ObjectId;

use crate::error::{AttError, ProtocolError, ProtocolResult};
use crate::message::{opcodes, OlcpProcedure, OlcpResponse, OlcpResult, OLCP_RESPONSE_SIZE};

/// Codec for OLCP writes and response indications.
pub struct OlcpCodec;

impl OlcpCodec {
    /// Decode a control-point write.
    ///
    /// Known opcodes must match their exact total length, otherwise the write
    /// is rejected with `InvalidAttributeLength`. Unknown opcodes decode to
    /// [`OlcpProcedure::Unsupported`] whatever their length. The input is
    /// never read past its end.
    pub fn decode(data: &[u8]) -> Result<OlcpProcedure, AttError> {
        let Some(&opcode) = data.first() else {
            return Err(AttError::InvalidAttributeLength {
                expected: 1,
                actual: 0,
            });
        };

        let Some(expected) = OlcpProcedure::expected_len(opcode) else {
            tracing::warn!(opcode, "OLCP unsupported procedure type");
            return Ok(OlcpProcedure::Unsupported(opcode));
        };
        if data.len() != expected {
            return Err(AttError::InvalidAttributeLength {
                expected,
                actual: data.len(),
            });
        }

        let mut params = &data[1..];
        let procedure = match opcode {
            opcodes::FIRST => OlcpProcedure::First,
            opcodes::LAST => OlcpProcedure::Last,
            opcodes::PREVIOUS => OlcpProcedure::Previous,
            opcodes::NEXT => OlcpProcedure::Next,
            opcodes::GO_TO => {
                let mut raw = [0u8; ObjectId::SIZE];
                params.copy_to_slice(&mut raw);
                OlcpProcedure::GoTo(ObjectId::from_le_bytes(raw))
            }
            opcodes::ORDER => OlcpProcedure::Order(params.get_u8()),
            opcodes::REQUEST_NUMBER_OF_OBJECTS => OlcpProcedure::RequestNumberOfObjects,
            opcodes::CLEAR_MARKING => OlcpProcedure::ClearMarking,
            other => OlcpProcedure::Unsupported(other),
        };
        Ok(procedure)
    }

    /// Encode a procedure as a peer would write it.
    pub fn encode_request(procedure: &OlcpProcedure) -> Bytes {
        let mut buf = BytesMut::with_capacity(1 + ObjectId::SIZE);
        buf.put_u8(procedure.opcode());
        match procedure {
            OlcpProcedure::GoTo(id) => buf.put_slice(&id.to_le_bytes()),
            OlcpProcedure::Order(key) => buf.put_u8(*key),
            _ => {}
        }
        buf.freeze()
    }

    /// Encode a response indication: `[RESPONSE, request opcode, result]`.
    pub fn encode_response(response: &OlcpResponse) -> Bytes {
        let mut buf = BytesMut::with_capacity(OLCP_RESPONSE_SIZE);
        buf.put_u8(opcodes::RESPONSE);
        buf.put_u8(response.request_opcode);
        buf.put_u8(response.result as u8);
        buf.freeze()
    }

    /// Decode a response indication as a peer receives it.
    pub fn decode_response(data: &[u8]) -> ProtocolResult<OlcpResponse> {
        if data.len() != OLCP_RESPONSE_SIZE {
            return Err(ProtocolError::FramingError(format!(
                "response must be {OLCP_RESPONSE_SIZE} bytes, got {}",
                data.len()
            )));
        }
        let mut buf = data;
        let opcode = buf.get_u8();
        if opcode != opcodes::RESPONSE {
            return Err(ProtocolError::InvalidResponseOpcode(opcode));
        }
        let request_opcode = buf.get_u8();
        let result =
            OlcpResult::try_from(buf.get_u8()).map_err(ProtocolError::InvalidResultCode)?;
        Ok(OlcpResponse::new(request_opcode, result))
    }
}
