//! Message instances.

use rustc_hash::FxHashMap;

use crate::model::Value;

/// The active member of a oneof group and its payload.
#[derive(Debug, Clone)]
pub struct OneofValue {
    /// Name of the active member field.
    pub field: String,
    /// Payload of the active member.
    pub value: Value,
}

/// A message instance: type name, set fields and active oneof members.
///
/// Oneof members live apart from ordinary fields, keyed by group, so a group
/// can never have more than one active member. Fields of a synthetic oneof
/// (proto3 `optional`) are ordinary fields. A value stored on the wrong side
/// (a real oneof member set as a field, or an ordinary field activated as a
/// oneof member) makes the instance unequal to every other instance.
///
/// Identity is the address of the instance; two distinct instances with the
/// same content are equal but not the same.
#[derive(Debug, Clone, Default)]
pub struct Message {
    type_name: String,
    fields: FxHashMap<String, Value>,
    oneofs: FxHashMap<String, OneofValue>,
}

impl Message {
    /// Creates an instance of `type_name` with nothing set.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: FxHashMap::default(),
            oneofs: FxHashMap::default(),
        }
    }

    /// Returns the full name of the message type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the value of a set field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns true if the field is set.
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Sets a field, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Unsets a field, returning the previous value.
    pub fn clear(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Activates `field` in `group`, replacing whichever member was active.
    pub fn set_oneof(
        &mut self,
        group: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<OneofValue> {
        self.oneofs.insert(
            group.into(),
            OneofValue {
                field: field.into(),
                value: value.into(),
            },
        )
    }

    /// Deactivates a oneof group.
    pub fn clear_oneof(&mut self, group: &str) -> Option<OneofValue> {
        self.oneofs.remove(group)
    }

    /// Returns the active member of a oneof group.
    pub fn active_oneof(&self, group: &str) -> Option<&OneofValue> {
        self.oneofs.get(group)
    }

    /// Returns true if `field` is the active member of some oneof group.
    pub fn has_oneof_member(&self, field: &str) -> bool {
        self.oneofs.values().any(|active| active.field == field)
    }

    /// Iterates the set fields in unspecified order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates the active oneof groups in unspecified order.
    pub fn oneofs(&self) -> impl Iterator<Item = (&str, &OneofValue)> {
        self.oneofs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of set fields, not counting oneof members.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of active oneof groups.
    pub fn oneof_count(&self) -> usize {
        self.oneofs.len()
    }

    /// Returns true if nothing is set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.oneofs.is_empty()
    }

    /// Returns true if `self` and `other` are the same instance.
    #[inline]
    pub fn is_same(&self, other: &Message) -> bool {
        std::ptr::eq(self, other)
    }
}
