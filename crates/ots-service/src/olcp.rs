//! Execution of decoded list control point procedures against a directory.

use ots_directory::{DirectoryEntry, DirectoryError, ObjectDirectory};
use ots_protocol::{OlcpProcedure, OlcpResult};
use ots_types::ObjectId;

/// Map a directory failure to the result code reported to the peer.
pub fn olcp_result_for(err: &DirectoryError) -> OlcpResult {
    match err {
        DirectoryError::NotFound(_) => OlcpResult::ObjectIdNotFound,
        DirectoryError::OutOfBounds(_) => OlcpResult::OutOfBounds,
        DirectoryError::Empty
        | DirectoryError::Full { .. }
        | DirectoryError::AlreadyExists(_) => OlcpResult::NoObject,
    }
}

/// Run `procedure` with the cursor at `current`.
///
/// Returns the entry the cursor should move to. Nothing is mutated here; the
/// caller moves the cursor.
pub fn execute<D: ObjectDirectory + ?Sized>(
    directory: &D,
    current: Option<ObjectId>,
    procedure: OlcpProcedure,
) -> Result<&DirectoryEntry, OlcpResult> {
    let found = match procedure {
        OlcpProcedure::First => directory.first(),
        OlcpProcedure::Last => directory.last(),
        OlcpProcedure::Previous => {
            let current = current.ok_or(OlcpResult::OperationFailed)?;
            directory.prev(current)
        }
        OlcpProcedure::Next => {
            let current = current.ok_or(OlcpResult::OperationFailed)?;
            directory.next(current)
        }
        OlcpProcedure::GoTo(id) => directory.get(id),
        OlcpProcedure::Order(_)
        | OlcpProcedure::RequestNumberOfObjects
        | OlcpProcedure::ClearMarking
        | OlcpProcedure::Unsupported(_) => return Err(OlcpResult::ProcNotSupported),
    };
    found.map_err(|e| olcp_result_for(&e))
}
