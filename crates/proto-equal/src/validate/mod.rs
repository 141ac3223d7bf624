//! Schema validation performed when a model is bound.
//!
//! Comparison is total, so everything that could make a comparison
//! ill-defined is rejected here:
//! - duplicate messages, field names and field numbers
//! - map fields without a usable key/value entry
//! - presence or oneof membership on fields that cannot carry it
//! - well-known tags that do not fit the field
//! - message references that cannot be resolved
//!
//! Malformed *instances* (a value whose variant does not match its field
//! kind) are not detected; they compare unequal.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::equal::BindOptions;
use crate::error::SchemaError;
use crate::limits::is_valid_field_number;
use crate::schema::{Cardinality, FieldSchema, MessageSchema, Presence, SchemaModel, WellKnownTag};

/// Where a message-typed field's comparison is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target<'s> {
    /// A message bound in the same model, by registration index.
    Local(usize),
    /// A well-known type with a dedicated rule.
    WellKnown(WellKnownTag),
    /// A type without local schema; compared by the model's fallback.
    Foreign(&'s str),
}

/// Validates every message of a model.
pub fn validate_model(model: &SchemaModel, options: &BindOptions) -> Result<(), SchemaError> {
    let index = index_messages(model)?;
    for message in model.messages() {
        validate_message(message, &index, options)?;
    }
    Ok(())
}

/// Maps each full name to its registration index, rejecting duplicates.
pub(crate) fn index_messages(model: &SchemaModel) -> Result<FxHashMap<&str, usize>, SchemaError> {
    let mut index = FxHashMap::default();
    for (i, message) in model.messages().iter().enumerate() {
        if index.insert(message.full_name.as_str(), i).is_some() {
            return Err(SchemaError::DuplicateMessage {
                message: message.full_name.clone(),
            });
        }
    }
    Ok(index)
}

/// Validates the fields of a single message.
pub(crate) fn validate_message(
    message: &MessageSchema,
    index: &FxHashMap<&str, usize>,
    options: &BindOptions,
) -> Result<(), SchemaError> {
    let mut names = FxHashSet::default();
    let mut numbers = FxHashSet::default();

    for field in &message.fields {
        if !names.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                message: message.full_name.clone(),
                field: field.name.clone(),
            });
        }
        if !numbers.insert(field.number) {
            return Err(SchemaError::DuplicateFieldNumber {
                message: message.full_name.clone(),
                number: field.number,
            });
        }
        if options.check_field_numbers && !is_valid_field_number(field.number) {
            return Err(SchemaError::FieldNumberOutOfRange {
                message: message.full_name.clone(),
                field: field.name.clone(),
                number: field.number,
            });
        }

        validate_field(message, field)?;

        match (field.cardinality, field.map_entry.as_ref()) {
            (Cardinality::Map, Some(entry)) => {
                if entry.value.is_message() {
                    resolve_target(message, &entry.value, index, options)?;
                }
            }
            _ if field.is_message() => {
                resolve_target(message, field, index, options)?;
            }
            _ => {}
        }
    }

    validate_synthetic_oneofs(message)
}

/// Checks the shape of one field in isolation.
fn validate_field(message: &MessageSchema, field: &FieldSchema) -> Result<(), SchemaError> {
    let err_field = || (message.full_name.clone(), field.name.clone());

    match (field.cardinality, field.map_entry.as_ref()) {
        (Cardinality::Map, None) => {
            let (message, field) = err_field();
            return Err(SchemaError::MissingMapEntry { message, field });
        }
        (Cardinality::Map, Some(entry)) => {
            if !entry.key.is_map_key() {
                let (message, field) = err_field();
                return Err(SchemaError::InvalidMapKey {
                    message,
                    field,
                    kind: entry.key,
                });
            }
            if entry.value.cardinality != Cardinality::Singular || entry.value.map_entry.is_some() {
                let (message, field) = err_field();
                return Err(SchemaError::InvalidMapValue { message, field });
            }
            match entry.value.well_known {
                Some(tag) if !entry.value.is_message() => {
                    let (message, field) = err_field();
                    return Err(SchemaError::WellKnownOnScalar {
                        message,
                        field,
                        kind: entry.value.kind,
                        tag,
                    });
                }
                _ => {}
            }
        }
        (_, Some(_)) => {
            let (message, field) = err_field();
            return Err(SchemaError::UnexpectedMapEntry { message, field });
        }
        (_, None) => {}
    }

    if field.cardinality != Cardinality::Singular
        && field.presence == Presence::Explicit
        && !field.is_message()
    {
        let (message, field) = err_field();
        return Err(SchemaError::PresenceOnCollection { message, field });
    }

    match field.well_known {
        Some(tag) if !field.is_message() => {
            let (message, field_name) = err_field();
            return Err(SchemaError::WellKnownOnScalar {
                message,
                field: field_name,
                kind: field.kind,
                tag,
            });
        }
        _ => {}
    }

    if field.oneof.is_some() && field.cardinality != Cardinality::Singular {
        let (message, field) = err_field();
        return Err(SchemaError::OneofMemberNotSingular { message, field });
    }

    Ok(())
}

/// A synthetic group holds exactly one explicit-presence field and no real members.
fn validate_synthetic_oneofs(message: &MessageSchema) -> Result<(), SchemaError> {
    // group -> (members, synthetic members)
    let mut groups: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
    for field in &message.fields {
        if let Some(membership) = &field.oneof {
            let entry = groups.entry(membership.group.as_str()).or_default();
            entry.0 += 1;
            if membership.synthetic {
                if field.presence != Presence::Explicit && !field.is_message() {
                    return Err(SchemaError::MalformedSyntheticOneof {
                        message: message.full_name.clone(),
                        group: membership.group.clone(),
                    });
                }
                entry.1 += 1;
            }
        }
    }

    for (group, (members, synthetic)) in groups {
        if synthetic > 0 && (members != 1 || synthetic != 1) {
            return Err(SchemaError::MalformedSyntheticOneof {
                message: message.full_name.clone(),
                group: group.to_string(),
            });
        }
    }
    Ok(())
}

/// Resolves where a message-typed field is compared.
///
/// An explicit well-known tag must agree with the tag detected from the
/// referenced name. Names with no local schema are foreign unless
/// `options.allow_foreign_types` is off.
pub(crate) fn resolve_target<'s>(
    message: &MessageSchema,
    field: &'s FieldSchema,
    index: &FxHashMap<&str, usize>,
    options: &BindOptions,
) -> Result<Target<'s>, SchemaError> {
    let type_name = field
        .type_name
        .as_deref()
        .map(|name| name.strip_prefix('.').unwrap_or(name));
    let detected = type_name.and_then(WellKnownTag::from_full_name);

    let tag = match (field.well_known, detected) {
        (Some(explicit), Some(found)) if explicit != found => {
            return Err(SchemaError::WellKnownMismatch {
                message: message.full_name.clone(),
                field: field.name.clone(),
                type_name: type_name.unwrap_or_default().to_string(),
                tag: explicit,
            });
        }
        (Some(tag), _) | (None, Some(tag)) => Some(tag),
        (None, None) => None,
    };

    match (tag, type_name) {
        (Some(WellKnownTag::Structural), Some(name)) => Ok(Target::Foreign(name)),
        (Some(WellKnownTag::Structural), None) | (None, None) => {
            Err(SchemaError::MissingMessageType {
                message: message.full_name.clone(),
                field: field.name.clone(),
                kind: field.kind,
            })
        }
        (Some(tag), _) => Ok(Target::WellKnown(tag)),
        (None, Some(name)) => match index.get(name) {
            Some(&i) => Ok(Target::Local(i)),
            None if options.allow_foreign_types => Ok(Target::Foreign(name)),
            None => Err(SchemaError::UnresolvedType {
                message: message.full_name.clone(),
                field: field.name.clone(),
                type_name: name.to_string(),
            }),
        },
    }
}
