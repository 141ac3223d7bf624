//! Schema descriptors.
//!
//! This module contains the read-only description of message types:
//! - Field kinds, cardinality and presence
//! - Message schemas (fields in declaration order)
//! - The well-known type table
//! - The schema model handed to the engine

pub mod field;
pub mod message;
pub mod well_known;

pub use field::{Cardinality, FieldSchema, Kind, MapEntrySchema, OneofMembership, Presence};
pub use message::{MessageSchema, SchemaModel};
pub use well_known::WellKnownTag;
