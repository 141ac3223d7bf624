//! proto-equal: Schema-driven deep equality for protobuf-style messages.
//!
//! This crate compares two instances of a message type described by a
//! schema, with the semantics generated protobuf code gives `Equal`.
//!
//! # Overview
//!
//! Equality is decided field by field, in declaration order:
//! - **Presence-aware**: explicit-presence fields distinguish unset from zero;
//!   implicit-presence fields read unset as the kind's default
//! - **Collections**: lists compare by index, maps by key regardless of order;
//!   unset equals empty
//! - **Oneofs**: different active members are never equal
//! - **Floats**: NaN equals NaN, and nothing else
//! - **Well-known types**: Any, Duration, Timestamp, Empty and the primitive
//!   wrappers have dedicated rules
//!
//! # Quick Start
//!
//! ```rust
//! use proto_equal::{EqualityEngine, FieldSchema, Kind, MessageBuilder, MessageSchema, SchemaModel};
//!
//! let model = SchemaModel::new().message(
//!     MessageSchema::new("test.Person")
//!         .field(FieldSchema::new("name", 1, Kind::String))
//!         .field(FieldSchema::new("age", 2, Kind::Int32).optional())
//!         .field(FieldSchema::new("tags", 3, Kind::String).repeated())
//!         .field(FieldSchema::message("created", 4, "google.protobuf.Timestamp")),
//! );
//! let engine = EqualityEngine::bind(&model).unwrap();
//! let person = engine.comparator("test.Person").unwrap();
//!
//! let a = MessageBuilder::new("test.Person").set("name", "Alice").build();
//! let b = MessageBuilder::new("test.Person")
//!     .set("name", "Alice")
//!     .list("tags", Vec::<String>::new())
//!     .build();
//! assert!(person.equal(Some(&a), Some(&b)));
//!
//! // `age` tracks presence: zero is not the same as unset.
//! let c = MessageBuilder::new("test.Person").set("name", "Alice").set("age", 0i32).build();
//! assert!(!person.equal(Some(&a), Some(&c)));
//! ```
//!
//! # Modules
//!
//! - [`schema`]: Message and field descriptors, the well-known type table
//! - [`model`]: Message instances, values and builders
//! - [`equal`]: The equality engine and comparison rules
//! - [`validate`]: Schema checks run when binding
//! - [`error`]: Error types
//! - [`limits`]: Field number limits and sizing constants
//!
//! # Errors
//!
//! Comparison never fails. Every precondition is checked once, when a
//! [`SchemaModel`] is bound; an invalid model yields a [`SchemaError`] and no
//! engine.

pub mod equal;
pub mod error;
pub mod limits;
pub mod model;
pub mod schema;
pub mod validate;

// Re-export commonly used types at crate root
pub use equal::{BindOptions, Comparator, EqualityEngine, ForeignEquality, ReflectEquality};
pub use error::{ErrorCode, SchemaError};
pub use model::{MapKey, Message, MessageBuilder, OneofValue, Value};
pub use model::builder::{any, duration, empty, timestamp, wrapper};
pub use schema::{
    Cardinality, FieldSchema, Kind, MapEntrySchema, MessageSchema, OneofMembership, Presence,
    SchemaModel, WellKnownTag,
};
pub use validate::validate_model;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
