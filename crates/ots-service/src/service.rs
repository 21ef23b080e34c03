//! The [`Service`]: one OTS instance with its directory, cursor, transfer
//! callbacks, and indication sink.

use ots_directory::{DirectoryEntry, InMemoryDirectory, ObjectDirectory};
use ots_protocol::{
    indications_enabled, AttError, CccValue, OlcpCodec, OlcpResponse, OlcpResult,
};
use ots_store::ContentHandle;
use ots_types::{Features, ObjectId, ObjectMetadata, ObjectProperties, PeerId};
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::indication::IndicationSink;
use crate::olcp;
use crate::transfer::{ObjectTransfer, ReadRequest};

/// One Object Transfer Service instance.
///
/// The instance owns everything it mutates: the directory, the single
/// current-object cursor, the transfer callbacks, and the indication sink.
/// All methods take `&mut self`, so events are handled one at a time and a
/// callback, which only ever sees its own `&mut T`, cannot reenter.
///
/// The cursor is shared by every connected peer.
pub struct Service<T, I, D = InMemoryDirectory> {
    directory: D,
    transfer: T,
    sink: I,
    features: Features,
    cursor: Option<ObjectId>,
    indications: bool,
}

impl<T: ObjectTransfer, I: IndicationSink> Service<T, I> {
    /// Create a service with an in-memory directory sized from `config`.
    pub fn new(config: &ServiceConfig, transfer: T, sink: I) -> Self {
        Self::with_directory(
            config.features,
            InMemoryDirectory::new(config.max_objects),
            transfer,
            sink,
        )
    }
}

impl<T, I, D> Service<T, I, D>
where
    T: ObjectTransfer,
    I: IndicationSink,
    D: ObjectDirectory,
{
    pub fn with_directory(features: Features, directory: D, transfer: T, sink: I) -> Self {
        Self {
            directory,
            transfer,
            sink,
            features,
            cursor: None,
            indications: false,
        }
    }

    // -----------------------------------------------------------------------
    // List control point
    // -----------------------------------------------------------------------

    /// Record a write to the control point's CCC descriptor.
    pub fn olcp_ccc_changed(&mut self, value: CccValue) {
        self.indications = indications_enabled(value);
        debug!(value = value.0, enabled = self.indications, "OLCP CCC changed");
    }

    /// Handle a write to the list control point.
    ///
    /// Attribute-layer preconditions come first, in order: indications
    /// enabled, zero offset, well-formed procedure. A write that fails one of
    /// them mutates nothing and sends nothing. Otherwise the procedure runs,
    /// the result goes out as an indication, and the full write length is
    /// accepted whatever the result.
    pub fn olcp_write(&mut self, peer: PeerId, data: &[u8], offset: u16) -> Result<usize, AttError> {
        if !self.indications {
            warn!(%peer, "OLCP written without indications enabled");
            return Err(AttError::CccImproperlyConfigured);
        }
        if offset != 0 {
            return Err(AttError::InvalidOffset(offset));
        }
        let procedure = OlcpCodec::decode(data)?;

        let result = match olcp::execute(&self.directory, self.cursor, procedure) {
            Ok(entry) => {
                let (id, handle) = (entry.id, entry.handle);
                self.select(peer, id, handle);
                OlcpResult::Success
            }
            Err(result) => result,
        };
        debug!(%peer, procedure = procedure.name(), %result, "OLCP procedure handled");

        let response = OlcpResponse::new(procedure.opcode(), result);
        if let Err(e) = self.sink.indicate(OlcpCodec::encode_response(&response)) {
            warn!(%peer, error = %e, "OLCP response indication failed");
        }
        Ok(data.len())
    }

    fn select(&mut self, peer: PeerId, id: ObjectId, handle: ContentHandle) {
        if self.cursor == Some(id) {
            return;
        }
        self.cursor = Some(id);
        self.transfer.selected(peer, id, handle);
    }

    // -----------------------------------------------------------------------
    // Object lifecycle
    // -----------------------------------------------------------------------

    /// Create an object and make it the current object.
    ///
    /// The DELETE property is always set on the registered object. If the
    /// transfer cannot back the object, nothing is registered.
    pub fn add_object(
        &mut self,
        peer: PeerId,
        mut metadata: ObjectMetadata,
        init_seed: Option<u32>,
    ) -> ServiceResult<ObjectId> {
        metadata.validate()?;
        let id = self.directory.next_free_id()?;
        let handle = self.transfer.created(peer, id, &mut metadata, init_seed)?;
        metadata.properties.insert(ObjectProperties::DELETE);

        if let Err(e) = self.directory.insert(id, metadata, handle) {
            if let Err(release) = self.transfer.deleted(peer, id, handle) {
                warn!(%id, error = %release, "failed to release content of unregistered object");
            }
            return Err(e.into());
        }
        info!(%peer, %id, objects = self.directory.len(), "object added");
        self.select(peer, id, handle);
        Ok(id)
    }

    /// Delete an object. Clears the cursor if it pointed at the object.
    pub fn delete_object(&mut self, peer: PeerId, id: ObjectId) -> ServiceResult<()> {
        let entry = self.directory.get(id)?;
        if !entry.metadata.properties.contains(ObjectProperties::DELETE) {
            return Err(ServiceError::DeleteNotPermitted(id));
        }
        let handle = entry.handle;

        self.transfer.deleted(peer, id, handle)?;
        self.directory.remove(id)?;
        if self.cursor == Some(id) {
            self.cursor = None;
        }
        info!(%peer, %id, objects = self.directory.len(), "object removed");
        Ok(())
    }

    /// Replace the properties of an object.
    pub fn set_object_properties(
        &mut self,
        id: ObjectId,
        properties: ObjectProperties,
    ) -> ServiceResult<()> {
        self.directory.metadata_mut(id)?.properties = properties;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Content transfer on the current object
    // -----------------------------------------------------------------------

    /// Read up to `len` bytes of the current object starting at `offset`.
    ///
    /// The range must lie within the object's current size. The transfer
    /// may deliver fewer bytes than requested.
    pub fn read_current(&mut self, peer: PeerId, offset: u32, len: u32) -> ServiceResult<&[u8]> {
        let (id, handle, metadata) = self.current_parts()?;
        require(id, &metadata, ObjectProperties::READ, "read")?;
        let limit = metadata.size.current;
        match offset.checked_add(len) {
            Some(end) if end <= limit => {}
            _ => return Err(ServiceError::InvalidRange { offset, len, limit }),
        }

        let chunk = self
            .transfer
            .read(peer, id, handle, Some(ReadRequest::new(offset, len)))?;
        Ok(chunk.data())
    }

    /// Signal the end of a read transfer on the current object.
    pub fn finish_read(&mut self, peer: PeerId) -> ServiceResult<()> {
        let (id, handle, _) = self.current_parts()?;
        self.transfer.read(peer, id, handle, None)?;
        Ok(())
    }

    /// Write `data` into the current object at `offset`.
    ///
    /// Requires WRITE, plus PATCH when `offset` is not zero. The range must
    /// lie within the allocated size; the current size grows to cover it.
    pub fn write_current(
        &mut self,
        peer: PeerId,
        data: &[u8],
        offset: u32,
        remaining: u32,
    ) -> ServiceResult<()> {
        let (id, handle, metadata) = self.current_parts()?;
        require(id, &metadata, ObjectProperties::WRITE, "write")?;
        if offset > 0 {
            require(id, &metadata, ObjectProperties::PATCH, "patch")?;
        }

        let limit = metadata.size.allocated;
        let len = u32::try_from(data.len()).unwrap_or(u32::MAX);
        let end = match offset.checked_add(len) {
            Some(end) if end <= limit => end,
            _ => return Err(ServiceError::InvalidRange { offset, len, limit }),
        };

        self.transfer.write(peer, id, handle, data, offset, remaining)?;
        let size = &mut self.directory.metadata_mut(id)?.size;
        size.current = size.current.max(end);
        Ok(())
    }

    fn current_parts(&self) -> ServiceResult<(ObjectId, ContentHandle, ObjectMetadata)> {
        let entry = self.current_object().ok_or(ServiceError::NoCurrentObject)?;
        Ok((entry.id, entry.handle, entry.metadata.clone()))
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The entry the cursor points at, if any.
    pub fn current_object(&self) -> Option<&DirectoryEntry> {
        self.cursor.and_then(|id| self.directory.get(id).ok())
    }

    pub fn cursor(&self) -> Option<ObjectId> {
        self.cursor
    }

    pub fn indications_enabled(&self) -> bool {
        self.indications
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    pub fn sink(&self) -> &I {
        &self.sink
    }
}

fn require(
    id: ObjectId,
    metadata: &ObjectMetadata,
    property: ObjectProperties,
    name: &'static str,
) -> ServiceResult<()> {
    if metadata.properties.contains(property) {
        Ok(())
    } else {
        Err(ServiceError::PropertyNotSet { id, property: name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FragmentPolicy;
    use crate::error::TransferError;
    use crate::pooled::PooledTransfer;
    use crate::transfer::ReadChunk;
    use bytes::Bytes;
    use ots_directory::DirectoryError;
    use ots_protocol::opcodes;
    use ots_store::{ContentStore, PoolConfig, SlotPool, StoreError};
    use ots_types::ObjectSize;

    const PEER: PeerId = PeerId::new(1);

    /// Calls observed by [`Recorder`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Created(ObjectId),
        Deleted(ObjectId),
        Selected(ObjectId),
        Read(ObjectId, Option<ReadRequest>),
        Write(ObjectId, u32, usize),
    }

    /// Transfer that records every call and delegates to a pool.
    struct Recorder {
        inner: PooledTransfer,
        calls: Vec<Call>,
    }

    impl Recorder {
        fn new(slots: usize) -> Self {
            Self {
                inner: PooledTransfer::new(
                    SlotPool::new(&PoolConfig {
                        slot_count: slots,
                        slot_size: 100,
                    }),
                    FragmentPolicy::default(),
                ),
                calls: Vec::new(),
            }
        }

        fn selections(&self) -> Vec<ObjectId> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Selected(id) => Some(*id),
                    _ => None,
                })
                .collect()
        }
    }

    impl ObjectTransfer for Recorder {
        fn created(
            &mut self,
            peer: PeerId,
            id: ObjectId,
            metadata: &mut ObjectMetadata,
            init_seed: Option<u32>,
        ) -> Result<ContentHandle, TransferError> {
            let handle = self.inner.created(peer, id, metadata, init_seed)?;
            self.calls.push(Call::Created(id));
            Ok(handle)
        }

        fn deleted(
            &mut self,
            peer: PeerId,
            id: ObjectId,
            handle: ContentHandle,
        ) -> Result<(), TransferError> {
            self.calls.push(Call::Deleted(id));
            self.inner.deleted(peer, id, handle)
        }

        fn selected(&mut self, peer: PeerId, id: ObjectId, handle: ContentHandle) {
            self.calls.push(Call::Selected(id));
            self.inner.selected(peer, id, handle);
        }

        fn read(
            &mut self,
            peer: PeerId,
            id: ObjectId,
            handle: ContentHandle,
            request: Option<ReadRequest>,
        ) -> Result<ReadChunk<'_>, TransferError> {
            self.calls.push(Call::Read(id, request));
            self.inner.read(peer, id, handle, request)
        }

        fn write(
            &mut self,
            peer: PeerId,
            id: ObjectId,
            handle: ContentHandle,
            data: &[u8],
            offset: u32,
            remaining: u32,
        ) -> Result<(), TransferError> {
            self.calls.push(Call::Write(id, offset, data.len()));
            self.inner.write(peer, id, handle, data, offset, remaining)
        }
    }

    type TestService = Service<Recorder, Vec<Bytes>>;

    /// Helper: service with indications enabled and room for `slots` objects.
    fn service(slots: usize) -> TestService {
        let mut svc = Service::new(&ServiceConfig::default(), Recorder::new(slots), Vec::new());
        svc.olcp_ccc_changed(CccValue::INDICATE);
        svc
    }

    fn meta(name: &str, properties: ObjectProperties) -> ObjectMetadata {
        ObjectMetadata::new(name, ObjectSize::full(100), properties)
    }

    fn rw() -> ObjectProperties {
        ObjectProperties::READ | ObjectProperties::WRITE | ObjectProperties::PATCH
    }

    /// Helper: service holding `count` read/write objects.
    fn populated(count: usize) -> (TestService, Vec<ObjectId>) {
        let mut svc = service(count.max(1));
        let ids = (0..count)
            .map(|i| svc.add_object(PEER, meta(&format!("obj{i}"), rw()), Some(1)).unwrap())
            .collect();
        (svc, ids)
    }

    fn last_response(svc: &TestService) -> (u8, OlcpResult) {
        let bytes = svc.sink().last().unwrap();
        let resp = OlcpCodec::decode_response(bytes).unwrap();
        (resp.request_opcode, resp.result)
    }

    fn goto(id: ObjectId) -> Vec<u8> {
        let mut data = vec![opcodes::GO_TO];
        data.extend_from_slice(&id.to_le_bytes());
        data
    }

    // -----------------------------------------------------------------------
    // 1. Attribute-layer preconditions
    // -----------------------------------------------------------------------
    #[test]
    fn write_without_indications_is_rejected_silently() {
        let (mut svc, _) = populated(1);
        svc.olcp_ccc_changed(CccValue::DISABLED);
        let calls_before = svc.transfer().calls.len();

        let err = svc.olcp_write(PEER, &[opcodes::FIRST], 0).unwrap_err();
        assert_eq!(err, AttError::CccImproperlyConfigured);
        assert!(svc.sink().is_empty());
        assert_eq!(svc.transfer().calls.len(), calls_before);
    }

    #[test]
    fn notify_value_does_not_enable_indications() {
        let mut svc = service(1);
        svc.olcp_ccc_changed(CccValue::NOTIFY);
        assert!(!svc.indications_enabled());
        assert_eq!(
            svc.olcp_write(PEER, &[opcodes::FIRST], 0),
            Err(AttError::CccImproperlyConfigured)
        );
    }

    #[test]
    fn nonzero_offset_is_rejected() {
        let mut svc = service(1);
        assert_eq!(svc.olcp_write(PEER, &[opcodes::FIRST], 1), Err(AttError::InvalidOffset(1)));
        assert!(svc.sink().is_empty());
    }

    #[test]
    fn wrong_length_is_rejected_before_directory_access() {
        let (mut svc, ids) = populated(2);
        let cursor = svc.cursor();
        let err = svc.olcp_write(PEER, &[opcodes::FIRST, 0x00], 0).unwrap_err();
        assert_eq!(err, AttError::InvalidAttributeLength { expected: 1, actual: 2 });

        let mut short_goto = goto(ids[0]);
        short_goto.pop();
        assert!(svc.olcp_write(PEER, &short_goto, 0).is_err());

        assert!(svc.sink().is_empty());
        assert_eq!(svc.cursor(), cursor);
    }

    // -----------------------------------------------------------------------
    // 2. Navigation
    // -----------------------------------------------------------------------
    #[test]
    fn first_on_empty_directory_is_no_object() {
        let mut svc = service(1);
        assert_eq!(svc.olcp_write(PEER, &[opcodes::FIRST], 0), Ok(1));
        assert_eq!(last_response(&svc), (opcodes::FIRST, OlcpResult::NoObject));
        assert_eq!(svc.cursor(), None);
    }

    #[test]
    fn next_without_cursor_is_operation_failed() {
        let (mut svc, ids) = populated(2);
        svc.delete_object(PEER, ids[1]).unwrap();
        assert_eq!(svc.cursor(), None);
        assert_eq!(svc.directory().len(), 1);

        svc.olcp_write(PEER, &[opcodes::NEXT], 0).unwrap();
        assert_eq!(last_response(&svc), (opcodes::NEXT, OlcpResult::OperationFailed));
        svc.olcp_write(PEER, &[opcodes::PREVIOUS], 0).unwrap();
        assert_eq!(last_response(&svc), (opcodes::PREVIOUS, OlcpResult::OperationFailed));
    }

    #[test]
    fn successful_navigation_selects_once_and_indicates_success() {
        let (mut svc, ids) = populated(3);
        svc.transfer.calls.clear();

        svc.olcp_write(PEER, &[opcodes::FIRST], 0).unwrap();
        assert_eq!(svc.cursor(), Some(ids[0]));
        assert_eq!(svc.transfer().selections(), vec![ids[0]]);
        assert_eq!(svc.sink().len(), 1);
        assert_eq!(last_response(&svc), (opcodes::FIRST, OlcpResult::Success));
    }

    #[test]
    fn reselecting_current_object_does_not_fire_selected() {
        let (mut svc, ids) = populated(2);
        svc.transfer.calls.clear();
        svc.olcp_write(PEER, &goto(ids[1]), 0).unwrap();
        assert_eq!(last_response(&svc), (opcodes::GO_TO, OlcpResult::Success));
        assert!(svc.transfer().selections().is_empty());
    }

    #[test]
    fn boundary_leaves_cursor_unchanged() {
        let (mut svc, ids) = populated(2);
        svc.olcp_write(PEER, &[opcodes::LAST], 0).unwrap();
        svc.olcp_write(PEER, &[opcodes::NEXT], 0).unwrap();
        assert_eq!(last_response(&svc), (opcodes::NEXT, OlcpResult::OutOfBounds));
        assert_eq!(svc.cursor(), Some(ids[1]));

        svc.olcp_write(PEER, &[opcodes::FIRST], 0).unwrap();
        svc.olcp_write(PEER, &[opcodes::PREVIOUS], 0).unwrap();
        assert_eq!(last_response(&svc), (opcodes::PREVIOUS, OlcpResult::OutOfBounds));
        assert_eq!(svc.cursor(), Some(ids[0]));
    }

    #[test]
    fn goto_unknown_id_is_not_found() {
        let (mut svc, ids) = populated(1);
        let unknown = ObjectId::new(0xABCDEF).unwrap();
        svc.olcp_write(PEER, &goto(unknown), 0).unwrap();
        assert_eq!(last_response(&svc), (opcodes::GO_TO, OlcpResult::ObjectIdNotFound));
        assert_eq!(svc.cursor(), Some(ids[0]));
    }

    #[test]
    fn placeholder_and_unknown_procedures_are_not_supported() {
        let (mut svc, _) = populated(1);
        for write in [vec![opcodes::ORDER, 0x01], vec![opcodes::CLEAR_MARKING], vec![0x42, 1, 2]] {
            assert_eq!(svc.olcp_write(PEER, &write, 0), Ok(write.len()));
            assert_eq!(last_response(&svc), (write[0], OlcpResult::ProcNotSupported));
        }
    }

    #[test]
    fn failed_indication_still_accepts_write() {
        struct Refusing;
        impl IndicationSink for Refusing {
            fn indicate(&mut self, _: Bytes) -> Result<(), crate::IndicateError> {
                Err(crate::IndicateError("link lost".into()))
            }
        }
        let mut svc = Service::new(&ServiceConfig::default(), Recorder::new(1), Refusing);
        svc.olcp_ccc_changed(CccValue::INDICATE);
        assert_eq!(svc.olcp_write(PEER, &[opcodes::FIRST], 0), Ok(1));
    }

    // -----------------------------------------------------------------------
    // 3. Object lifecycle
    // -----------------------------------------------------------------------
    #[test]
    fn add_object_selects_and_forces_delete() {
        let mut svc = service(2);
        let id = svc.add_object(PEER, meta("a.txt", ObjectProperties::READ), None).unwrap();
        assert_eq!(id, ObjectId::MIN);
        assert_eq!(svc.cursor(), Some(id));
        assert_eq!(svc.transfer().calls, vec![Call::Created(id), Call::Selected(id)]);
        let props = svc.current_object().unwrap().metadata.properties;
        assert!(props.contains(ObjectProperties::DELETE | ObjectProperties::READ));
    }

    #[test]
    fn add_object_rejects_invalid_metadata() {
        let mut svc = service(1);
        let err = svc.add_object(PEER, meta("", rw()), None).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidMetadata(_)));
        assert!(svc.transfer().calls.is_empty());
    }

    #[test]
    fn add_object_beyond_pool_registers_nothing() {
        let (mut svc, _) = populated(1);
        let free = svc.transfer().inner.store().free_count();

        let err = svc.add_object(PEER, meta("extra", rw()), None).unwrap_err();
        assert!(err.is_resource_exhausted());
        assert_eq!(svc.directory().len(), 1);
        assert_eq!(svc.transfer().inner.store().free_count(), free);
    }

    #[test]
    fn add_object_larger_than_buffer_is_exhausted() {
        let mut svc = service(1);
        let big = ObjectMetadata::new("big", ObjectSize::full(101), rw());
        let err = svc.add_object(PEER, big, None).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Transfer(TransferError::Store(StoreError::TooLarge { .. }))
        ));
        assert!(svc.directory().is_empty());
    }

    #[test]
    fn delete_clears_cursor_and_frees_buffer() {
        let (mut svc, ids) = populated(2);
        assert_eq!(svc.cursor(), Some(ids[1]));
        svc.delete_object(PEER, ids[1]).unwrap();
        assert_eq!(svc.cursor(), None);
        assert_eq!(svc.transfer().inner.store().free_count(), 1);
        assert_eq!(svc.directory().ids(), vec![ids[0]]);

        let err = svc.delete_object(PEER, ids[1]).unwrap_err();
        assert!(matches!(err, ServiceError::Directory(DirectoryError::NotFound(_))));
        assert_eq!(svc.transfer().inner.store().free_count(), 1);
    }

    #[test]
    fn delete_of_other_object_keeps_cursor() {
        let (mut svc, ids) = populated(2);
        svc.delete_object(PEER, ids[0]).unwrap();
        assert_eq!(svc.cursor(), Some(ids[1]));
    }

    #[test]
    fn delete_requires_delete_property() {
        let (mut svc, ids) = populated(1);
        svc.set_object_properties(ids[0], ObjectProperties::READ).unwrap();
        let err = svc.delete_object(PEER, ids[0]).unwrap_err();
        assert!(matches!(err, ServiceError::DeleteNotPermitted(id) if id == ids[0]));
        assert!(!svc.transfer().calls.contains(&Call::Deleted(ids[0])));
        assert_eq!(svc.directory().len(), 1);
    }

    #[test]
    fn deleted_id_is_reused() {
        let (mut svc, ids) = populated(2);
        svc.delete_object(PEER, ids[0]).unwrap();
        let id = svc.add_object(PEER, meta("new", rw()), None).unwrap();
        assert_eq!(id, ids[0]);
    }

    // -----------------------------------------------------------------------
    // 4. Content transfer
    // -----------------------------------------------------------------------
    #[test]
    fn read_without_cursor_fails() {
        let mut svc = service(1);
        assert!(matches!(svc.read_current(PEER, 0, 1), Err(ServiceError::NoCurrentObject)));
        assert!(matches!(svc.finish_read(PEER), Err(ServiceError::NoCurrentObject)));
    }

    #[test]
    fn read_requires_read_property() {
        let (mut svc, ids) = populated(1);
        svc.set_object_properties(ids[0], ObjectProperties::WRITE).unwrap();
        let err = svc.read_current(PEER, 0, 1).unwrap_err();
        assert!(matches!(err, ServiceError::PropertyNotSet { property: "read", .. }));
    }

    #[test]
    fn read_past_current_size_is_invalid_range() {
        let (mut svc, _) = populated(1);
        let err = svc.read_current(PEER, 90, 20).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRange { offset: 90, len: 20, limit: 100 }));
        let err = svc.read_current(PEER, u32::MAX, 2).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRange { .. }));
    }

    #[test]
    fn finish_read_is_a_no_op() {
        let (mut svc, ids) = populated(1);
        let before = svc.read_current(PEER, 0, 10).unwrap().to_vec();
        svc.finish_read(PEER).unwrap();
        assert_eq!(svc.transfer().calls.last(), Some(&Call::Read(ids[0], None)));
        assert_eq!(svc.read_current(PEER, 0, 10).unwrap(), &before[..]);
    }

    #[test]
    fn write_then_read_round_trips() {
        let (mut svc, ids) = populated(2);
        svc.olcp_write(PEER, &goto(ids[1]), 0).unwrap();
        svc.write_current(PEER, b"patched", 40, 0).unwrap();
        assert_eq!(svc.read_current(PEER, 40, 7).unwrap(), b"patched");
        assert!(svc.transfer().calls.contains(&Call::Write(ids[1], 40, 7)));
    }

    #[test]
    fn write_past_allocation_is_rejected() {
        let (mut svc, _) = populated(1);
        let err = svc.write_current(PEER, &[0u8; 10], 95, 0).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRange { offset: 95, len: 10, limit: 100 }));
    }

    #[test]
    fn write_at_offset_requires_patch() {
        let (mut svc, ids) = populated(1);
        svc.set_object_properties(ids[0], ObjectProperties::READ | ObjectProperties::WRITE)
            .unwrap();
        svc.write_current(PEER, b"ok", 0, 0).unwrap();
        let err = svc.write_current(PEER, b"no", 4, 0).unwrap_err();
        assert!(matches!(err, ServiceError::PropertyNotSet { property: "patch", .. }));

        svc.set_object_properties(ids[0], ObjectProperties::READ).unwrap();
        let err = svc.write_current(PEER, b"no", 0, 0).unwrap_err();
        assert!(matches!(err, ServiceError::PropertyNotSet { property: "write", .. }));
    }

    #[test]
    fn write_extends_current_size() {
        let mut svc = service(1);
        let partial = ObjectMetadata::new("log", ObjectSize::new(0, 100).unwrap(), rw());
        svc.add_object(PEER, partial, None).unwrap();
        assert!(matches!(svc.read_current(PEER, 0, 1), Err(ServiceError::InvalidRange { .. })));

        svc.write_current(PEER, b"abc", 0, 3).unwrap();
        svc.write_current(PEER, b"def", 3, 0).unwrap();
        assert_eq!(svc.current_object().unwrap().metadata.size.current, 6);
        svc.write_current(PEER, b"A", 0, 0).unwrap();
        assert_eq!(svc.current_object().unwrap().metadata.size.current, 6);
        assert_eq!(svc.read_current(PEER, 0, 6).unwrap(), b"Abcdef");
    }

    #[test]
    fn features_come_from_config() {
        let svc = service(1);
        assert_eq!(svc.features(), Features::default());
    }
}
