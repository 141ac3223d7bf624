//! Shared test schema: a `TestAllTypes` message covering every field kind,
//! both presence disciplines, lists, maps, a oneof group and well-known fields.

use std::sync::Arc;

use proptest::prelude::*;

use crate::equal::EqualityEngine;
use crate::model::{Message, MessageBuilder, Value};
use crate::schema::{FieldSchema, Kind, MessageSchema, SchemaModel, WellKnownTag};

pub(crate) const ALL_TYPES: &str = "test.TestAllTypes";
pub(crate) const NESTED: &str = "test.TestAllTypes.NestedMessage";
pub(crate) const GROUP: &str = "test.TestAllTypes.OptionalGroup";
pub(crate) const FOREIGN: &str = "other.ForeignMessage";
pub(crate) const ONEOF_GROUP: &str = "oneof_field";

const SCALARS: &[(&str, Kind)] = &[
    ("int32", Kind::Int32),
    ("int64", Kind::Int64),
    ("uint32", Kind::Uint32),
    ("uint64", Kind::Uint64),
    ("sint32", Kind::Sint32),
    ("sint64", Kind::Sint64),
    ("fixed32", Kind::Fixed32),
    ("fixed64", Kind::Fixed64),
    ("sfixed32", Kind::Sfixed32),
    ("sfixed64", Kind::Sfixed64),
    ("float", Kind::Float),
    ("double", Kind::Double),
    ("bool", Kind::Bool),
    ("string", Kind::String),
    ("bytes", Kind::Bytes),
    ("nested_enum", Kind::Enum),
];

const MAPS: &[(&str, Kind, Kind)] = &[
    ("map_int32_int32", Kind::Int32, Kind::Int32),
    ("map_int64_int64", Kind::Int64, Kind::Int64),
    ("map_uint32_uint32", Kind::Uint32, Kind::Uint32),
    ("map_uint64_uint64", Kind::Uint64, Kind::Uint64),
    ("map_sint32_sint32", Kind::Sint32, Kind::Sint32),
    ("map_sint64_sint64", Kind::Sint64, Kind::Sint64),
    ("map_fixed32_fixed32", Kind::Fixed32, Kind::Fixed32),
    ("map_fixed64_fixed64", Kind::Fixed64, Kind::Fixed64),
    ("map_sfixed32_sfixed32", Kind::Sfixed32, Kind::Sfixed32),
    ("map_sfixed64_sfixed64", Kind::Sfixed64, Kind::Sfixed64),
    ("map_int32_float", Kind::Int32, Kind::Float),
    ("map_int32_double", Kind::Int32, Kind::Double),
    ("map_bool_bool", Kind::Bool, Kind::Bool),
    ("map_string_string", Kind::String, Kind::String),
    ("map_string_bytes", Kind::String, Kind::Bytes),
    ("map_string_nested_enum", Kind::String, Kind::Enum),
];

const ONEOF_SCALARS: &[(&str, Kind)] = &[
    ("oneof_uint32", Kind::Uint32),
    ("oneof_string", Kind::String),
    ("oneof_bytes", Kind::Bytes),
    ("oneof_bool", Kind::Bool),
    ("oneof_uint64", Kind::Uint64),
    ("oneof_float", Kind::Float),
    ("oneof_double", Kind::Double),
    ("oneof_enum", Kind::Enum),
];

const WRAPPERS: &[(&str, WellKnownTag)] = &[
    ("wrappers_bool_value", WellKnownTag::BoolValue),
    ("wrappers_int32_value", WellKnownTag::Int32Value),
    ("wrappers_int64_value", WellKnownTag::Int64Value),
    ("wrappers_uint32_value", WellKnownTag::UInt32Value),
    ("wrappers_uint64_value", WellKnownTag::UInt64Value),
    ("wrappers_float_value", WellKnownTag::FloatValue),
    ("wrappers_double_value", WellKnownTag::DoubleValue),
    ("wrappers_string_value", WellKnownTag::StringValue),
    ("wrappers_bytes_value", WellKnownTag::BytesValue),
];

/// Builds the test schema model.
pub(crate) fn model() -> SchemaModel {
    let mut number = 0u32;
    let mut next = || {
        number += 1;
        number
    };

    let mut all = MessageSchema::new(ALL_TYPES);
    for &(suffix, kind) in SCALARS {
        all.add_field(FieldSchema::new(format!("singular_{suffix}"), next(), kind));
    }
    for &(suffix, kind) in SCALARS {
        all.add_field(
            FieldSchema::new(format!("optional_{suffix}"), next(), kind)
                .synthetic_oneof(format!("_optional_{suffix}")),
        );
    }
    all.add_field(FieldSchema::message("optional_nested_message", next(), NESTED));
    all.add_field(FieldSchema::group("optionalgroup", next(), GROUP));

    for &(suffix, kind) in SCALARS {
        all.add_field(FieldSchema::new(format!("repeated_{suffix}"), next(), kind).repeated());
    }
    all.add_field(FieldSchema::message("repeated_nested_message", next(), NESTED).repeated());

    for &(name, key, value) in MAPS {
        all.add_field(FieldSchema::map(name, next(), key, FieldSchema::new("value", 2, value)));
    }
    all.add_field(FieldSchema::map(
        "map_string_nested_message",
        next(),
        Kind::String,
        FieldSchema::message("value", 2, NESTED),
    ));

    all.add_field(FieldSchema::new("oneof_uint32", next(), Kind::Uint32).in_oneof(ONEOF_GROUP));
    all.add_field(FieldSchema::message("oneof_nested_message", next(), NESTED).in_oneof(ONEOF_GROUP));
    for &(name, kind) in &ONEOF_SCALARS[1..] {
        all.add_field(FieldSchema::new(name, next(), kind).in_oneof(ONEOF_GROUP));
    }
    all.add_field(
        FieldSchema::message("oneof_wrappers_string_value", next(), "google.protobuf.StringValue")
            .in_oneof(ONEOF_GROUP),
    );

    all.add_field(FieldSchema::message("any", next(), "google.protobuf.Any"));
    all.add_field(FieldSchema::message("duration", next(), "google.protobuf.Duration"));
    all.add_field(FieldSchema::message("timestamp", next(), "google.protobuf.Timestamp"));
    all.add_field(FieldSchema::message("empty", next(), "google.protobuf.Empty"));
    for &(name, tag) in WRAPPERS {
        all.add_field(FieldSchema::message(name, next(), tag.full_name().unwrap_or_default()));
    }
    all.add_field(FieldSchema::message("struct_value", next(), "google.protobuf.Struct"));
    all.add_field(FieldSchema::message("foreign_message", next(), FOREIGN));

    let nested = MessageSchema::new(NESTED)
        .field(FieldSchema::new("a", 1, Kind::Int32).optional())
        .field(FieldSchema::message("corecursive", 2, ALL_TYPES));
    let group = MessageSchema::new(GROUP).field(FieldSchema::new("a", 17, Kind::Int32));

    SchemaModel::new().message(all).message(nested).message(group)
}

/// Binds the test schema model.
pub(crate) fn engine() -> EqualityEngine {
    EqualityEngine::bind(&model()).expect("test schema binds")
}

/// Starts a `TestAllTypes` instance.
pub(crate) fn all_types() -> MessageBuilder {
    MessageBuilder::new(ALL_TYPES)
}

/// A `NestedMessage` with `a` set.
pub(crate) fn nested(a: i32) -> Message {
    MessageBuilder::new(NESTED).set("a", a).build()
}

/// `TestAllTypes -> NestedMessage -> TestAllTypes -> ...`, `depth` levels of
/// `TestAllTypes`. Built bottom-up so depth is not limited by the call stack.
pub(crate) fn make_nested(depth: usize) -> Option<Message> {
    let mut current: Option<Message> = None;
    for _ in 0..depth {
        let mut nested = Message::new(NESTED);
        if let Some(inner) = current.take() {
            nested.set("corecursive", inner);
        }
        let mut outer = Message::new(ALL_TYPES);
        outer.set("optional_nested_message", nested);
        current = Some(outer);
    }
    current
}

/// Tears down a [`make_nested`] chain one level at a time.
pub(crate) fn unnest(mut message: Message) {
    loop {
        let Some(Value::Message(nested)) = message.clear("optional_nested_message") else {
            return;
        };
        let Ok(mut nested) = Arc::try_unwrap(nested) else {
            return;
        };
        let Some(Value::Message(inner)) = nested.clear("corecursive") else {
            return;
        };
        let Ok(inner) = Arc::try_unwrap(inner) else {
            return;
        };
        message = inner;
    }
}

/// Generates `TestAllTypes` instances over a representative subset of fields.
pub(crate) fn arb_all_types() -> impl Strategy<Value = Message> {
    (
        any::<i32>(),
        proptest::option::of(any::<f64>()),
        "[a-c]{0,3}",
        prop::collection::vec(any::<u32>(), 0..4),
        prop::collection::vec((-3i64..3, any::<i64>()), 0..4),
        proptest::option::of((0usize..ONEOF_SCALARS.len(), any::<u32>())),
        proptest::option::of(proptest::option::of(any::<i32>())),
    )
        .prop_map(|(int32, double, string, uint32s, map, oneof, nested_a)| {
            let mut b = all_types()
                .set("singular_int32", int32)
                .set("singular_string", string)
                .list("repeated_uint32", uint32s)
                .map("map_int64_int64", map);
            if let Some(double) = double {
                b = b.set("optional_double", double);
            }
            if let Some((member, v)) = oneof {
                let (name, kind) = ONEOF_SCALARS[member];
                let value = match kind {
                    Kind::Uint32 => Value::U32(v),
                    Kind::String => Value::String(v.to_string()),
                    Kind::Bytes => Value::Bytes(v.to_le_bytes().to_vec()),
                    Kind::Bool => Value::Bool(v % 2 == 0),
                    Kind::Uint64 => Value::U64(u64::from(v)),
                    Kind::Float => Value::F32(v as f32),
                    Kind::Double => Value::F64(f64::from(v)),
                    _ => Value::Enum(v as i32),
                };
                b = b.oneof(ONEOF_GROUP, name, value);
            }
            if let Some(a) = nested_a {
                b = b.nested("optional_nested_message", NESTED, |m| match a {
                    Some(a) => m.set("a", a),
                    None => m,
                });
            }
            b.build()
        })
}
