//! Well-known message types with dedicated equality rules.
//!
//! The table of recognised full names is built once per process and never
//! mutated.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::schema::Kind;

/// Category of a well-known message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownTag {
    /// `google.protobuf.Any`: type URL plus opaque payload.
    Any,
    /// `google.protobuf.Duration`: seconds plus nanos.
    Duration,
    /// `google.protobuf.Timestamp`: seconds plus nanos.
    Timestamp,
    /// `google.protobuf.Empty`: no fields.
    Empty,
    BoolValue,
    Int32Value,
    Int64Value,
    UInt32Value,
    UInt64Value,
    FloatValue,
    DoubleValue,
    StringValue,
    BytesValue,
    /// Types only comparable by reflection (`Struct`, `FieldMask`, `Type`, ...).
    Structural,
}

lazy_static! {
    static ref WELL_KNOWN_TYPES: FxHashMap<&'static str, WellKnownTag> = {
        let mut table = FxHashMap::default();
        table.insert("google.protobuf.Any", WellKnownTag::Any);
        table.insert("google.protobuf.Duration", WellKnownTag::Duration);
        table.insert("google.protobuf.Timestamp", WellKnownTag::Timestamp);
        table.insert("google.protobuf.Empty", WellKnownTag::Empty);
        table.insert("google.protobuf.BoolValue", WellKnownTag::BoolValue);
        table.insert("google.protobuf.Int32Value", WellKnownTag::Int32Value);
        table.insert("google.protobuf.Int64Value", WellKnownTag::Int64Value);
        table.insert("google.protobuf.UInt32Value", WellKnownTag::UInt32Value);
        table.insert("google.protobuf.UInt64Value", WellKnownTag::UInt64Value);
        table.insert("google.protobuf.FloatValue", WellKnownTag::FloatValue);
        table.insert("google.protobuf.DoubleValue", WellKnownTag::DoubleValue);
        table.insert("google.protobuf.StringValue", WellKnownTag::StringValue);
        table.insert("google.protobuf.BytesValue", WellKnownTag::BytesValue);
        for name in STRUCTURAL_TYPES {
            table.insert(*name, WellKnownTag::Structural);
        }
        table
    };
}

/// `seconds` field of Duration and Timestamp.
pub const SECONDS_FIELD: &str = "seconds";
/// `nanos` field of Duration and Timestamp.
pub const NANOS_FIELD: &str = "nanos";
/// `type_url` field of Any.
pub const TYPE_URL_FIELD: &str = "type_url";
/// Payload field of Any and the single field of every primitive wrapper.
pub const VALUE_FIELD: &str = "value";

/// api.proto, field_mask.proto, source_context.proto, struct.proto and type.proto.
const STRUCTURAL_TYPES: &[&str] = &[
    "google.protobuf.Api",
    "google.protobuf.Method",
    "google.protobuf.Mixin",
    "google.protobuf.FieldMask",
    "google.protobuf.SourceContext",
    "google.protobuf.Struct",
    "google.protobuf.Value",
    "google.protobuf.ListValue",
    "google.protobuf.Type",
    "google.protobuf.Field",
    "google.protobuf.Enum",
    "google.protobuf.EnumValue",
    "google.protobuf.Option",
];

impl WellKnownTag {
    /// Looks up the tag for a fully-qualified message name.
    pub fn from_full_name(name: &str) -> Option<WellKnownTag> {
        WELL_KNOWN_TYPES
            .get(name.strip_prefix('.').unwrap_or(name))
            .copied()
    }

    /// Returns the canonical full name, or None for [`WellKnownTag::Structural`].
    pub fn full_name(self) -> Option<&'static str> {
        let name = match self {
            WellKnownTag::Any => "google.protobuf.Any",
            WellKnownTag::Duration => "google.protobuf.Duration",
            WellKnownTag::Timestamp => "google.protobuf.Timestamp",
            WellKnownTag::Empty => "google.protobuf.Empty",
            WellKnownTag::BoolValue => "google.protobuf.BoolValue",
            WellKnownTag::Int32Value => "google.protobuf.Int32Value",
            WellKnownTag::Int64Value => "google.protobuf.Int64Value",
            WellKnownTag::UInt32Value => "google.protobuf.UInt32Value",
            WellKnownTag::UInt64Value => "google.protobuf.UInt64Value",
            WellKnownTag::FloatValue => "google.protobuf.FloatValue",
            WellKnownTag::DoubleValue => "google.protobuf.DoubleValue",
            WellKnownTag::StringValue => "google.protobuf.StringValue",
            WellKnownTag::BytesValue => "google.protobuf.BytesValue",
            WellKnownTag::Structural => return None,
        };
        Some(name)
    }

    /// Returns the kind of the single `value` field of a primitive wrapper.
    pub fn wrapped_kind(self) -> Option<Kind> {
        match self {
            WellKnownTag::BoolValue => Some(Kind::Bool),
            WellKnownTag::Int32Value => Some(Kind::Int32),
            WellKnownTag::Int64Value => Some(Kind::Int64),
            WellKnownTag::UInt32Value => Some(Kind::Uint32),
            WellKnownTag::UInt64Value => Some(Kind::Uint64),
            WellKnownTag::FloatValue => Some(Kind::Float),
            WellKnownTag::DoubleValue => Some(Kind::Double),
            WellKnownTag::StringValue => Some(Kind::String),
            WellKnownTag::BytesValue => Some(Kind::Bytes),
            _ => None,
        }
    }
}
