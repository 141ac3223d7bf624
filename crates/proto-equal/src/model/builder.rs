//! Builder API for ergonomic message construction.
//!
//! # Example
//!
//! ```rust
//! use proto_equal::model::builder::MessageBuilder;
//!
//! let msg = MessageBuilder::new("test.TestAllTypes")
//!     .set("singular_int32", 1i32)
//!     .list("repeated_string", ["a", "b"])
//!     .map("map_string_string", [("k", "v")])
//!     .nested("optional_nested_message", "test.TestAllTypes.NestedMessage", |m| m
//!         .set("a", 7i32)
//!     )
//!     .oneof("oneof_field", "oneof_uint32", 3u32)
//!     .build();
//!
//! assert!(msg.has("singular_int32"));
//! ```

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::model::{MapKey, Message, Value};
use crate::schema::WellKnownTag;
use crate::schema::well_known::{NANOS_FIELD, SECONDS_FIELD, TYPE_URL_FIELD, VALUE_FIELD};

/// Builder for a message instance.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    /// Creates a builder for an instance of `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            message: Message::new(type_name),
        }
    }

    /// Sets a singular field.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.message.set(field, value);
        self
    }

    /// Sets a repeated field.
    pub fn list<V: Into<Value>>(
        mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.message.set(field, Value::list(values));
        self
    }

    /// Sets a map field.
    pub fn map<K: Into<MapKey>, V: Into<Value>>(
        mut self,
        field: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.message.set(field, Value::map(entries));
        self
    }

    /// Sets a nested message field built by `f`.
    pub fn nested<F>(mut self, field: impl Into<String>, type_name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(MessageBuilder) -> MessageBuilder,
    {
        let nested = f(MessageBuilder::new(type_name)).build();
        self.message.set(field, Value::message(nested));
        self
    }

    /// Activates a oneof member.
    pub fn oneof(
        mut self,
        group: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.message.set_oneof(group, field, value);
        self
    }

    /// Returns the built instance.
    pub fn build(self) -> Message {
        self.message
    }

    /// Returns the built instance behind a shared handle.
    pub fn build_shared(self) -> Arc<Message> {
        Arc::new(self.message)
    }
}

// =============================================================================
// WELL-KNOWN TYPES
// =============================================================================

fn seconds_nanos(tag: WellKnownTag, seconds: i64, nanos: i32) -> Message {
    let mut m = Message::new(tag.full_name().unwrap_or_default());
    m.set(SECONDS_FIELD, seconds);
    m.set(NANOS_FIELD, nanos);
    m
}

/// Builds a `google.protobuf.Duration`.
pub fn duration(d: Duration) -> Message {
    let seconds = i64::try_from(d.as_secs()).unwrap_or(i64::MAX);
    seconds_nanos(WellKnownTag::Duration, seconds, d.subsec_nanos() as i32)
}

/// Builds a `google.protobuf.Timestamp`.
///
/// Times before the epoch get negative seconds and non-negative nanos.
pub fn timestamp(time: SystemTime) -> Message {
    let (seconds, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(d) => (i64::try_from(d.as_secs()).unwrap_or(i64::MAX), d.subsec_nanos() as i32),
        Err(e) => {
            let d = e.duration();
            let mut seconds = -i64::try_from(d.as_secs()).unwrap_or(i64::MAX);
            let mut nanos = d.subsec_nanos() as i32;
            if nanos > 0 {
                seconds -= 1;
                nanos = 1_000_000_000 - nanos;
            }
            (seconds, nanos)
        }
    };
    seconds_nanos(WellKnownTag::Timestamp, seconds, nanos)
}

/// Builds a `google.protobuf.Any` from a type URL and an encoded payload.
pub fn any(type_url: impl Into<String>, payload: impl Into<Vec<u8>>) -> Message {
    let mut m = Message::new("google.protobuf.Any");
    m.set(TYPE_URL_FIELD, type_url.into());
    m.set(VALUE_FIELD, payload.into());
    m
}

/// Builds a `google.protobuf.Empty`.
pub fn empty() -> Message {
    Message::new("google.protobuf.Empty")
}

/// Builds a primitive wrapper such as `google.protobuf.StringValue`.
///
/// Returns None if `tag` is not a primitive wrapper.
pub fn wrapper(tag: WellKnownTag, value: impl Into<Value>) -> Option<Message> {
    tag.wrapped_kind()?;
    let mut m = Message::new(tag.full_name()?);
    m.set(VALUE_FIELD, value);
    Some(m)
}
