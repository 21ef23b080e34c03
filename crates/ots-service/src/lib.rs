//! Object Transfer Service engine.
//!
//! A [`Service`] hosts a directory of objects and a single "current object"
//! cursor. Peers move the cursor through the Object List Control Point
//! (OLCP) and transfer content of the current object through an
//! application-supplied [`ObjectTransfer`].
//!
//! # Quick Start
//!
//! ```rust
//! use bytes::Bytes;
//! use ots_protocol::{opcodes, CccValue};
//! use ots_service::{PooledTransfer, Service, ServiceConfig};
//! use ots_store::SlotPool;
//! use ots_types::{ObjectMetadata, ObjectProperties, ObjectSize, PeerId};
//!
//! let config = ServiceConfig::default();
//! let transfer = PooledTransfer::new(SlotPool::new(&config.pool), config.fragment_policy);
//! let mut service = Service::new(&config, transfer, Vec::<Bytes>::new());
//!
//! let peer = PeerId::new(0);
//! let meta = ObjectMetadata::new("hello.txt", ObjectSize::full(100), ObjectProperties::READ);
//! let id = service.add_object(peer, meta, Some(1)).unwrap();
//!
//! service.olcp_ccc_changed(CccValue::INDICATE);
//! service.olcp_write(peer, &[opcodes::FIRST], 0).unwrap();
//! assert_eq!(service.cursor(), Some(id));
//! assert_eq!(service.read_current(peer, 0, 3).unwrap(), &[1, 2, 3]);
//! ```
//!
//! # Error layers
//!
//! - [`AttError`](ots_protocol::AttError): a control-point write was
//!   malformed or arrived without indications enabled. Nothing changes.
//! - [`OlcpResult`](ots_protocol::OlcpResult): outcome of a well-formed
//!   procedure, sent to the peer as an indication.
//! - [`ServiceError`]: failure of a local object procedure or content access.

pub mod config;
pub mod error;
pub mod indication;
pub mod olcp;
pub mod pooled;
pub mod service;
pub mod transfer;

// Re-exports for convenience.
pub use config::{FragmentPolicy, ServiceConfig};
pub use error::{ServiceError, ServiceResult, TransferError};
pub use indication::{IndicateError, IndicationSink};
pub use olcp::olcp_result_for;
pub use pooled::PooledTransfer;
pub use service::Service;
pub use transfer::{ObjectTransfer, ReadChunk, ReadRequest};
