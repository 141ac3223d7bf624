//! Comparison rules for well-known message types.
//!
//! These bypass field-by-field recursion: the fields involved are fixed, so
//! the rule reads them directly.

use crate::equal::ForeignEquality;
use crate::equal::field::scalar_eq;
use crate::equal::guard::{self, Guard};
use crate::model::Message;
use crate::schema::well_known::{NANOS_FIELD, SECONDS_FIELD, TYPE_URL_FIELD, VALUE_FIELD};
use crate::schema::{Kind, WellKnownTag};

/// Compares two possibly-absent instances of a well-known type.
///
/// Identity and nil rules apply first. Past those:
/// - Any: type URL and payload bytes
/// - Duration, Timestamp: seconds and nanos
/// - Empty: nothing to compare
/// - primitive wrappers: the wrapped scalar
/// - structural types: `fallback`, as for any other foreign type
pub fn equal(
    tag: WellKnownTag,
    a: Option<&Message>,
    b: Option<&Message>,
    fallback: &dyn ForeignEquality,
) -> bool {
    let (x, y) = match guard::check(a, b) {
        Guard::Resolved(eq) => return eq,
        Guard::Descend(x, y) => (x, y),
    };
    match tag {
        WellKnownTag::Any => {
            field_eq(x, y, TYPE_URL_FIELD, Kind::String) && field_eq(x, y, VALUE_FIELD, Kind::Bytes)
        }
        WellKnownTag::Duration | WellKnownTag::Timestamp => {
            field_eq(x, y, SECONDS_FIELD, Kind::Int64) && field_eq(x, y, NANOS_FIELD, Kind::Int32)
        }
        WellKnownTag::Empty => true,
        WellKnownTag::BoolValue
        | WellKnownTag::Int32Value
        | WellKnownTag::Int64Value
        | WellKnownTag::UInt32Value
        | WellKnownTag::UInt64Value
        | WellKnownTag::FloatValue
        | WellKnownTag::DoubleValue
        | WellKnownTag::StringValue
        | WellKnownTag::BytesValue => tag
            .wrapped_kind()
            .is_some_and(|kind| field_eq(x, y, VALUE_FIELD, kind)),
        WellKnownTag::Structural => fallback.equal(x.type_name(), Some(x), Some(y)),
    }
}

/// Compares an implicit-presence scalar field of two instances.
fn field_eq(x: &Message, y: &Message, field: &str, kind: Kind) -> bool {
    match (x.get(field), y.get(field)) {
        (None, None) => true,
        (Some(v), Some(w)) => scalar_eq(v, w),
        (Some(v), None) | (None, Some(v)) => kind
            .default_value()
            .is_some_and(|default| scalar_eq(v, &default)),
    }
}
