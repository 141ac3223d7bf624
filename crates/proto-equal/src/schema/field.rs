//! Field descriptors.

use crate::model::{MapKey, Value};
use crate::schema::WellKnownTag;

/// Field kinds, numbered as in `FieldDescriptorProto.Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    Double = 1,
    Float = 2,
    Int64 = 3,
    Uint64 = 4,
    Int32 = 5,
    Fixed64 = 6,
    Fixed32 = 7,
    Bool = 8,
    String = 9,
    Group = 10,
    Message = 11,
    Bytes = 12,
    Uint32 = 13,
    Enum = 14,
    Sfixed32 = 15,
    Sfixed64 = 16,
    Sint32 = 17,
    Sint64 = 18,
}

impl Kind {
    /// Creates a Kind from its descriptor representation.
    pub fn from_u8(v: u8) -> Option<Kind> {
        match v {
            1 => Some(Kind::Double),
            2 => Some(Kind::Float),
            3 => Some(Kind::Int64),
            4 => Some(Kind::Uint64),
            5 => Some(Kind::Int32),
            6 => Some(Kind::Fixed64),
            7 => Some(Kind::Fixed32),
            8 => Some(Kind::Bool),
            9 => Some(Kind::String),
            10 => Some(Kind::Group),
            11 => Some(Kind::Message),
            12 => Some(Kind::Bytes),
            13 => Some(Kind::Uint32),
            14 => Some(Kind::Enum),
            15 => Some(Kind::Sfixed32),
            16 => Some(Kind::Sfixed64),
            17 => Some(Kind::Sint32),
            18 => Some(Kind::Sint64),
            _ => None,
        }
    }

    /// Returns true for message and group kinds.
    pub fn is_message(self) -> bool {
        matches!(self, Kind::Message | Kind::Group)
    }

    /// Returns true if values of this kind can key a map.
    ///
    /// Floats, bytes, enums and messages cannot.
    pub fn is_map_key(self) -> bool {
        matches!(
            self,
            Kind::Bool
                | Kind::Int32
                | Kind::Sint32
                | Kind::Sfixed32
                | Kind::Int64
                | Kind::Sint64
                | Kind::Sfixed64
                | Kind::Uint32
                | Kind::Fixed32
                | Kind::Uint64
                | Kind::Fixed64
                | Kind::String
        )
    }

    /// Returns the zero value an unset implicit-presence field reads as.
    ///
    /// Message kinds have no default; they are always tracked for presence.
    pub fn default_value(self) -> Option<Value> {
        let value = match self {
            Kind::Bool => Value::Bool(false),
            Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => Value::I32(0),
            Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => Value::I64(0),
            Kind::Uint32 | Kind::Fixed32 => Value::U32(0),
            Kind::Uint64 | Kind::Fixed64 => Value::U64(0),
            Kind::Float => Value::F32(0.0),
            Kind::Double => Value::F64(0.0),
            Kind::String => Value::String(String::new()),
            Kind::Bytes => Value::Bytes(Vec::new()),
            Kind::Enum => Value::Enum(0),
            Kind::Message | Kind::Group => return None,
        };
        Some(value)
    }

    /// Returns true if `key` is the runtime shape for a map key of this kind.
    pub fn accepts_key(self, key: &MapKey) -> bool {
        matches!(
            (self, key),
            (Kind::Bool, MapKey::Bool(_))
                | (Kind::Int32 | Kind::Sint32 | Kind::Sfixed32, MapKey::I32(_))
                | (Kind::Int64 | Kind::Sint64 | Kind::Sfixed64, MapKey::I64(_))
                | (Kind::Uint32 | Kind::Fixed32, MapKey::U32(_))
                | (Kind::Uint64 | Kind::Fixed64, MapKey::U64(_))
                | (Kind::String, MapKey::String(_))
        )
    }
}

/// How many values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    #[default]
    Singular,
    /// Ordered, repeated values.
    List,
    /// Unordered scalar-keyed entries.
    Map,
}

/// Whether a field distinguishes "never set" from "set to the default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Presence {
    /// Unset reads as the kind's zero value.
    #[default]
    Implicit,
    /// Unset is observable and distinct from any value.
    Explicit,
}

/// Membership of a field in a oneof group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OneofMembership {
    /// Group name, unique within the message.
    pub group: String,
    /// True for the single-member groups generated for `optional` fields.
    pub synthetic: bool,
}

/// Key and value sub-schemas of a map field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntrySchema {
    /// Key kind (bool, integer or string).
    pub key: Kind,
    /// Value sub-schema; must be singular.
    pub value: Box<FieldSchema>,
}

/// A field definition in a message schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// Field name, unique within the message.
    pub name: String,
    /// Field number, unique within the message.
    pub number: u32,
    /// Field kind.
    pub kind: Kind,
    /// Singular, list or map.
    pub cardinality: Cardinality,
    /// Presence discipline for singular scalar fields.
    pub presence: Presence,
    /// Oneof group this field belongs to, if any.
    pub oneof: Option<OneofMembership>,
    /// Full name of the referenced message type (message and group kinds).
    pub type_name: Option<String>,
    /// Explicit well-known category; detected from `type_name` when absent.
    pub well_known: Option<WellKnownTag>,
    /// Key/value schemas (map fields only).
    pub map_entry: Option<MapEntrySchema>,
}

impl FieldSchema {
    /// Creates a singular, implicit-presence field.
    pub fn new(name: impl Into<String>, number: u32, kind: Kind) -> Self {
        Self {
            name: name.into(),
            number,
            kind,
            cardinality: Cardinality::Singular,
            presence: Presence::Implicit,
            oneof: None,
            type_name: None,
            well_known: None,
            map_entry: None,
        }
    }

    /// Creates a singular message field referencing `type_name`.
    pub fn message(name: impl Into<String>, number: u32, type_name: impl Into<String>) -> Self {
        Self {
            presence: Presence::Explicit,
            type_name: Some(type_name.into()),
            ..Self::new(name, number, Kind::Message)
        }
    }

    /// Creates a proto2 group field referencing `type_name`.
    pub fn group(name: impl Into<String>, number: u32, type_name: impl Into<String>) -> Self {
        Self {
            kind: Kind::Group,
            ..Self::message(name, number, type_name)
        }
    }

    /// Creates a map field.
    pub fn map(name: impl Into<String>, number: u32, key: Kind, value: FieldSchema) -> Self {
        Self {
            cardinality: Cardinality::Map,
            map_entry: Some(MapEntrySchema {
                key,
                value: Box::new(value),
            }),
            ..Self::new(name, number, Kind::Message)
        }
    }

    /// Marks the field as explicit-presence (`optional`).
    pub fn optional(mut self) -> Self {
        self.presence = Presence::Explicit;
        self
    }

    /// Marks the field as repeated.
    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::List;
        self.presence = Presence::Implicit;
        self
    }

    /// Places the field in a oneof group.
    pub fn in_oneof(mut self, group: impl Into<String>) -> Self {
        self.presence = Presence::Explicit;
        self.oneof = Some(OneofMembership {
            group: group.into(),
            synthetic: false,
        });
        self
    }

    /// Places the field alone in a synthetic oneof, as `optional` in proto3 does.
    pub fn synthetic_oneof(mut self, group: impl Into<String>) -> Self {
        self.presence = Presence::Explicit;
        self.oneof = Some(OneofMembership {
            group: group.into(),
            synthetic: true,
        });
        self
    }

    /// Tags the field with a well-known category.
    pub fn well_known(mut self, tag: WellKnownTag) -> Self {
        self.well_known = Some(tag);
        self
    }

    /// Returns true for message and group kinds.
    pub fn is_message(&self) -> bool {
        self.kind.is_message()
    }

    /// Returns the oneof group name for non-synthetic members.
    pub fn real_oneof(&self) -> Option<&str> {
        self.oneof
            .as_ref()
            .filter(|m| !m.synthetic)
            .map(|m| m.group.as_str())
    }
}
