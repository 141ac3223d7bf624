//! Per-field comparison rules.
//!
//! Binding turns every [`FieldSchema`](crate::schema::FieldSchema) into a
//! [`FieldRule`]; comparison is an exhaustive match over these rules.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::equal::ForeignEquality;
use crate::equal::guard::{self, Guard, Pending};
use crate::equal::well_known;
use crate::limits::WORK_STACK_CAPACITY;
use crate::model::{MapKey, Message, Value};
use crate::schema::{Kind, WellKnownTag};

/// How a nested message is compared.
#[derive(Debug, Clone)]
pub(crate) enum MessageRule {
    /// Field by field, using the bound message at this index.
    Local(usize),
    /// Dedicated well-known rule.
    WellKnown(WellKnownTag),
    /// Delegated to the schema model's foreign equality.
    Foreign(String),
}

/// How a single value (singular payload, list element, map value) is compared.
#[derive(Debug, Clone)]
pub(crate) enum ValueRule {
    Scalar,
    Message(MessageRule),
}

/// Comparison rule for one field (or one oneof group) of a bound message.
#[derive(Debug, Clone)]
pub(crate) enum FieldRule {
    /// Singular scalar without presence; unset reads as `default`.
    Implicit { field: String, default: Value },
    /// Singular field with presence: scalars with explicit presence and all messages.
    Explicit { field: String, rule: ValueRule },
    /// Repeated field; unset equals empty.
    List { field: String, element: ValueRule },
    /// Map field; unset equals empty. Keys must have the runtime shape of `key`.
    Map {
        field: String,
        key: Kind,
        value: ValueRule,
    },
    /// A real oneof group, keyed by member name.
    Oneof {
        group: String,
        members: FxHashMap<String, ValueRule>,
    },
}

impl FieldRule {
    /// Name of the ordinary field this rule reads, `None` for a oneof group.
    fn field_name(&self) -> Option<&str> {
        match self {
            FieldRule::Implicit { field, .. }
            | FieldRule::Explicit { field, .. }
            | FieldRule::List { field, .. }
            | FieldRule::Map { field, .. } => Some(field),
            FieldRule::Oneof { .. } => None,
        }
    }
}

/// Returns true if two NaN-aware floating point values are equal.
///
/// NaN equals NaN and nothing else; everything else uses numeric equality,
/// so `-0.0 == 0.0`.
#[inline]
pub fn float_eq(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    a == b
}

/// Compares two scalar values.
///
/// Values of different variants are never equal; neither are messages,
/// lists or maps, which need a rule to be compared.
pub fn scalar_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::I32(x), Value::I32(y)) => x == y,
        (Value::I64(x), Value::I64(y)) => x == y,
        (Value::U32(x), Value::U32(y)) => x == y,
        (Value::U64(x), Value::U64(y)) => x == y,
        (Value::Enum(x), Value::Enum(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bytes(x), Value::Bytes(y)) => x == y,
        (Value::F32(x), Value::F32(y)) => float_eq(f64::from(*x), f64::from(*y)),
        (Value::F64(x), Value::F64(y)) => float_eq(*x, *y),
        _ => false,
    }
}

/// Field dispatch for one comparison call.
///
/// Nested local messages are not compared in place: once guarded they are
/// queued, and the engine drains the queue. Everything else is decided
/// immediately.
pub(crate) struct FieldComparator<'e, 'm> {
    fallback: &'e dyn ForeignEquality,
    pending: Vec<Pending<'m>>,
}

impl<'e, 'm> FieldComparator<'e, 'm> {
    pub fn new(fallback: &'e dyn ForeignEquality) -> Self {
        Self {
            fallback,
            pending: Vec::with_capacity(WORK_STACK_CAPACITY),
        }
    }

    /// Queues two distinct instances of a bound message type.
    pub fn descend(&mut self, message: usize, a: &'m Message, b: &'m Message) {
        self.pending.push(Pending { message, a, b });
    }

    /// Takes the next queued pair.
    pub fn next(&mut self) -> Option<Pending<'m>> {
        self.pending.pop()
    }

    /// Compares one field of `a` and `b`.
    ///
    /// A value stored where the rule does not read it (an ordinary field
    /// active as a oneof member, or a oneof member set as an ordinary field)
    /// makes the field unequal.
    pub fn field(&mut self, rule: &FieldRule, a: &'m Message, b: &'m Message) -> bool {
        if let Some(name) = rule.field_name() {
            if a.has_oneof_member(name) || b.has_oneof_member(name) {
                return false;
            }
        }

        match rule {
            FieldRule::Implicit { field, default } => scalar_eq(
                a.get(field).unwrap_or(default),
                b.get(field).unwrap_or(default),
            ),
            FieldRule::Explicit {
                field,
                rule: ValueRule::Message(message),
            } => match (message_field(a, field), message_field(b, field)) {
                (Some(x), Some(y)) => self.message(message, x, y),
                _ => false,
            },
            FieldRule::Explicit {
                field,
                rule: ValueRule::Scalar,
            } => match (a.get(field), b.get(field)) {
                (None, None) => true,
                (Some(x), Some(y)) => scalar_eq(x, y),
                _ => false,
            },
            FieldRule::List { field, element } => match (list_field(a, field), list_field(b, field)) {
                (Some(xs), Some(ys)) => self.list(element, xs, ys),
                _ => false,
            },
            FieldRule::Map { field, key, value } => match (map_field(a, field), map_field(b, field)) {
                (Some(xs), Some(ys)) => self.map(*key, value, xs, ys),
                _ => false,
            },
            FieldRule::Oneof { group, members } => {
                if members.keys().any(|member| a.has(member) || b.has(member)) {
                    return false;
                }
                match (a.active_oneof(group), b.active_oneof(group)) {
                    (None, None) => true,
                    (Some(x), Some(y)) if x.field == y.field => match members.get(&x.field) {
                        Some(rule) => self.value(rule, &x.value, &y.value),
                        None => false,
                    },
                    _ => false,
                }
            }
        }
    }

    fn list(&mut self, element: &ValueRule, xs: &'m [Value], ys: &'m [Value]) -> bool {
        if xs.len() != ys.len() {
            return false;
        }
        for (x, y) in xs.iter().zip(ys) {
            if !self.value(element, x, y) {
                return false;
            }
        }
        true
    }

    fn map(
        &mut self,
        key_kind: Kind,
        value: &ValueRule,
        xs: Option<&'m FxHashMap<MapKey, Value>>,
        ys: Option<&'m FxHashMap<MapKey, Value>>,
    ) -> bool {
        if xs.map_or(0, |m| m.len()) != ys.map_or(0, |m| m.len()) {
            return false;
        }
        let (Some(xs), Some(ys)) = (xs, ys) else {
            // Both empty.
            return true;
        };
        for (key, x) in xs {
            if !key_kind.accepts_key(key) {
                return false;
            }
            let Some(y) = ys.get(key) else {
                return false;
            };
            if !self.value(value, x, y) {
                return false;
            }
        }
        true
    }

    fn value(&mut self, rule: &ValueRule, a: &'m Value, b: &'m Value) -> bool {
        match rule {
            ValueRule::Scalar => scalar_eq(a, b),
            ValueRule::Message(message) => match (a.as_message(), b.as_message()) {
                (Some(x), Some(y)) => self.message(message, Some(x), Some(y)),
                _ => false,
            },
        }
    }

    fn message(&mut self, rule: &MessageRule, a: Option<&'m Message>, b: Option<&'m Message>) -> bool {
        match rule {
            MessageRule::Local(index) => match guard::check(a, b) {
                Guard::Resolved(eq) => eq,
                Guard::Descend(x, y) => {
                    self.descend(*index, x, y);
                    true
                }
            },
            MessageRule::WellKnown(tag) => well_known::equal(*tag, a, b, self.fallback),
            MessageRule::Foreign(type_name) => {
                trace!(type_name = %type_name, fallback = self.fallback.name(), "delegating to foreign equality");
                self.fallback.equal(type_name, a, b)
            }
        }
    }
}

/// Reads a singular message field: `Some(None)` when unset, `None` when the
/// stored value is not a message.
fn message_field<'m>(message: &'m Message, field: &str) -> Option<Option<&'m Message>> {
    match message.get(field) {
        None => Some(None),
        Some(value) => value.as_message().map(Some),
    }
}

/// Reads a repeated field; unset is empty, a non-list value is `None`.
fn list_field<'m>(message: &'m Message, field: &str) -> Option<&'m [Value]> {
    match message.get(field) {
        None => Some(&[]),
        Some(value) => value.as_list(),
    }
}

/// Reads a map field; `Some(None)` when unset, `None` for a non-map value.
fn map_field<'m>(message: &'m Message, field: &str) -> Option<Option<&'m FxHashMap<MapKey, Value>>> {
    match message.get(field) {
        None => Some(None),
        Some(value) => value.as_map().map(Some),
    }
}
