//! Message descriptors and the schema model handed to the engine.

use std::fmt;
use std::sync::Arc;

use crate::equal::{ForeignEquality, ReflectEquality};
use crate::schema::FieldSchema;

/// A message type: full name plus fields in declaration order.
///
/// Declaration order is the comparison order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSchema {
    /// Fully-qualified name (e.g. `test.TestAllTypes`).
    pub full_name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldSchema>,
}

impl MessageSchema {
    /// Creates a message schema with no fields.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a field in place.
    pub fn add_field(&mut self, field: FieldSchema) {
        self.fields.push(field);
    }

    /// Gets a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterates the members of a oneof group in declaration order.
    pub fn oneof_members<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a FieldSchema> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.oneof.as_ref().is_some_and(|m| m.group == group))
    }
}

/// Read-only descriptor of every message type the engine may compare.
///
/// Besides the local message schemas, the model supplies the equality used
/// for message types it has no schema for.
#[derive(Clone)]
pub struct SchemaModel {
    messages: Vec<MessageSchema>,
    fallback: Arc<dyn ForeignEquality>,
}

impl SchemaModel {
    /// Creates an empty model using [`ReflectEquality`] for foreign types.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            fallback: Arc::new(ReflectEquality),
        }
    }

    /// Registers a message schema.
    pub fn add_message(&mut self, message: MessageSchema) {
        self.messages.push(message);
    }

    /// Registers a message schema, builder style.
    pub fn message(mut self, message: MessageSchema) -> Self {
        self.messages.push(message);
        self
    }

    /// Replaces the equality used for foreign message types.
    pub fn with_fallback(mut self, fallback: Arc<dyn ForeignEquality>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Returns all registered schemas in registration order.
    pub fn messages(&self) -> &[MessageSchema] {
        &self.messages
    }

    /// Gets a message schema by full name.
    pub fn get_message(&self, full_name: &str) -> Option<&MessageSchema> {
        self.messages.iter().find(|m| m.full_name == full_name)
    }

    /// Returns the foreign-type equality.
    pub fn fallback(&self) -> &Arc<dyn ForeignEquality> {
        &self.fallback
    }
}

impl Default for SchemaModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaModel")
            .field("messages", &self.messages)
            .field("fallback", &self.fallback.name())
            .finish()
    }
}
