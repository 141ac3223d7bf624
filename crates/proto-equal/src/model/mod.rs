//! Runtime message model.
//!
//! This module contains the types for message instances:
//! - Values (scalars, lists, maps, nested messages)
//! - Message instances with oneof storage
//! - Builders and well-known type constructors

pub mod builder;
pub mod message;
pub mod value;

pub use builder::MessageBuilder;
pub use message::{Message, OneofValue};
pub use value::{MapKey, Value};
