//! Foundation types for the Object Transfer Service (OTS).
//!
//! This crate provides the identity and metadata types shared by every other
//! OTS crate: the object directory, the content pool, the control-point codec,
//! and the service engine.
//!
//! # Key Types
//!
//! - [`ObjectId`] -- 48-bit object identifier, little-endian on the wire
//! - [`ObjectMetadata`] -- name, type, size, and properties of an object
//! - [`ObjectProperties`] -- the OTS object properties bitset
//! - [`ObjectType`] -- 16-bit SIG or 128-bit object type UUID
//! - [`Features`] -- OACP/OLCP feature bits advertised by a service instance
//! - [`PeerId`] -- handle of the connected peer issuing a request

pub mod error;
pub mod features;
pub mod id;
pub mod metadata;
pub mod peer;

pub use error::TypeError;
pub use features::{Features, OacpFeatures, OlcpFeatures};
pub use id::ObjectId;
pub use metadata::{ObjectMetadata, ObjectProperties, ObjectSize, ObjectType, MAX_NAME_LEN};
pub use peer::PeerId;
