//! Runtime field values.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::model::Message;

/// A map key. Only bool, integer and string kinds can key a map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    String(String),
}

/// The value of a set field on a message instance.
///
/// Absence is never a variant: an unset field is simply not stored on the
/// [`Message`].
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    /// int32, sint32 and sfixed32.
    I32(i32),
    /// int64, sint64 and sfixed64.
    I64(i64),
    /// uint32 and fixed32.
    U32(u32),
    /// uint64 and fixed64.
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Enum number; open enums may carry unknown numbers.
    Enum(i32),
    /// Nested message, possibly shared with other parents.
    Message(Arc<Message>),
    /// Repeated field.
    List(Vec<Value>),
    /// Map field.
    Map(FxHashMap<MapKey, Value>),
}

impl Value {
    /// Wraps a message in a new shared handle.
    pub fn message(message: Message) -> Self {
        Value::Message(Arc::new(message))
    }

    /// Builds a list value.
    pub fn list<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }

    /// Builds a map value. Later duplicates of a key replace earlier ones.
    pub fn map<K: Into<MapKey>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns the nested message, if this is a message value.
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Value::Message(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the elements, if this is a list value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the entries, if this is a map value.
    pub fn as_map(&self) -> Option<&FxHashMap<MapKey, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the bytes, if this is a bytes value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns true for every variant except messages, lists and maps.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Message(_) | Value::List(_) | Value::Map(_))
    }
}

macro_rules! impl_from {
    ($target:ident: $($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for $target {
                fn from(v: $ty) -> Self {
                    $target::$variant(v.into())
                }
            }
        )*
    };
}

impl_from!(Value:
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    &str => String,
    Vec<u8> => Bytes,
    &[u8] => Bytes,
    Arc<Message> => Message,
);

impl_from!(MapKey:
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    String => String,
    &str => String,
);

impl From<Message> for Value {
    fn from(message: Message) -> Self {
        Value::message(message)
    }
}
