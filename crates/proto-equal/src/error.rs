//! Error types for schema binding.
//!
//! Comparison itself never fails. Everything that can go wrong is detected
//! once, when a [`SchemaModel`](crate::schema::SchemaModel) is bound into an
//! [`EqualityEngine`](crate::equal::EqualityEngine).

use thiserror::Error;

use crate::schema::{Kind, WellKnownTag};

/// Stable error codes for binding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// S001: Duplicate message, field name or field number
    Duplicate,
    /// S002: Reference to a type that cannot be resolved
    Unresolved,
    /// S003: Field shape is not representable
    InvalidField,
    /// S004: Well-known tag does not fit the field
    InvalidWellKnown,
    /// S005: Field number outside the allowed range
    FieldNumber,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "S001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::Duplicate => "S001",
            ErrorCode::Unresolved => "S002",
            ErrorCode::InvalidField => "S003",
            ErrorCode::InvalidWellKnown => "S004",
            ErrorCode::FieldNumber => "S005",
        }
    }
}

/// Error raised while binding a schema model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    // === S001: Duplicates ===
    #[error("[S001] message {message} is defined more than once")]
    DuplicateMessage { message: String },

    #[error("[S001] field {field} is declared more than once in {message}")]
    DuplicateField { message: String, field: String },

    #[error("[S001] field number {number} is used more than once in {message}")]
    DuplicateFieldNumber { message: String, number: u32 },

    // === S002: Unresolved references ===
    #[error("[S002] message type {message} is not bound")]
    UnknownMessage { message: String },

    #[error("[S002] {message}.{field} references {type_name}, which has no schema and foreign types are disabled")]
    UnresolvedType {
        message: String,
        field: String,
        type_name: String,
    },

    // === S003: Field shape ===
    #[error("[S003] {message}.{field} is a map field without a key/value entry")]
    MissingMapEntry { message: String, field: String },

    #[error("[S003] {message}.{field} carries a map entry but is not a map field")]
    UnexpectedMapEntry { message: String, field: String },

    #[error("[S003] {message}.{field} uses {kind:?} as a map key")]
    InvalidMapKey {
        message: String,
        field: String,
        kind: Kind,
    },

    #[error("[S003] {message}.{field} has a map value that is not singular")]
    InvalidMapValue { message: String, field: String },

    #[error("[S003] {message}.{field} is a list or map with explicit presence")]
    PresenceOnCollection { message: String, field: String },

    #[error("[S003] {message}.{field} has kind {kind:?} but names no message type")]
    MissingMessageType {
        message: String,
        field: String,
        kind: Kind,
    },

    #[error("[S003] {message}.{field} is a oneof member but is not singular")]
    OneofMemberNotSingular { message: String, field: String },

    #[error("[S003] synthetic oneof {group} in {message} must hold exactly one explicit-presence field")]
    MalformedSyntheticOneof { message: String, group: String },

    // === S004: Well-known tags ===
    #[error("[S004] {message}.{field} has kind {kind:?} and cannot carry well-known tag {tag:?}")]
    WellKnownOnScalar {
        message: String,
        field: String,
        kind: Kind,
        tag: WellKnownTag,
    },

    #[error("[S004] {message}.{field} is tagged {tag:?} but references {type_name}")]
    WellKnownMismatch {
        message: String,
        field: String,
        type_name: String,
        tag: WellKnownTag,
    },

    // === S005: Field numbers ===
    #[error("[S005] {message}.{field} has field number {number} outside the valid range")]
    FieldNumberOutOfRange {
        message: String,
        field: String,
        number: u32,
    },
}

impl SchemaError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SchemaError::DuplicateMessage { .. }
            | SchemaError::DuplicateField { .. }
            | SchemaError::DuplicateFieldNumber { .. } => ErrorCode::Duplicate,
            SchemaError::UnknownMessage { .. } | SchemaError::UnresolvedType { .. } => {
                ErrorCode::Unresolved
            }
            SchemaError::WellKnownOnScalar { .. } | SchemaError::WellKnownMismatch { .. } => {
                ErrorCode::InvalidWellKnown
            }
            SchemaError::FieldNumberOutOfRange { .. } => ErrorCode::FieldNumber,
            _ => ErrorCode::InvalidField,
        }
    }
}
