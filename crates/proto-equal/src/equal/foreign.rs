//! Equality for message types the schema model has no descriptor for.

use crate::equal::field::scalar_eq;
use crate::equal::guard::{self, Guard};
use crate::model::{Message, Value};

/// Equality hook for foreign message types.
///
/// Supplied by the [`SchemaModel`](crate::schema::SchemaModel). Receives the
/// referenced full type name and the two possibly-absent instances.
pub trait ForeignEquality: Send + Sync {
    /// Returns true if `a` and `b` are equal instances of `type_name`.
    fn equal(&self, type_name: &str, a: Option<&Message>, b: Option<&Message>) -> bool;

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Structural equality over whatever the two instances carry.
///
/// Without a schema there are no defaults to substitute, so a field set to
/// its zero value differs from an unset one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectEquality;

impl ForeignEquality for ReflectEquality {
    fn equal(&self, _type_name: &str, a: Option<&Message>, b: Option<&Message>) -> bool {
        match guard::check(a, b) {
            Guard::Resolved(eq) => eq,
            Guard::Descend(x, y) => reflect_eq(x, y),
        }
    }

    fn name(&self) -> &'static str {
        "reflect"
    }
}

/// Compares two distinct instances field by field without a schema.
pub fn reflect_eq(a: &Message, b: &Message) -> bool {
    a.type_name() == b.type_name()
        && a.field_count() == b.field_count()
        && a.oneof_count() == b.oneof_count()
        && a
            .fields()
            .all(|(name, v)| b.get(name).is_some_and(|w| value_eq(v, w)))
        && a.oneofs().all(|(group, x)| {
            b.active_oneof(group)
                .is_some_and(|y| x.field == y.field && value_eq(&x.value, &y.value))
        })
}

/// Schema-less value equality.
///
/// Lists compare by index, maps by key, nested messages by identity then
/// [`reflect_eq`], scalars by [`scalar_eq`].
pub fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Message(x), Value::Message(y)) => x.is_same(y) || reflect_eq(x, y),
        (Value::List(xs), Value::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| value_eq(x, y))
        }
        (Value::Map(xs), Value::Map(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| value_eq(x, y)))
        }
        _ => scalar_eq(a, b),
    }
}
