//! Deep equality over schema-described messages.
//!
//! This module contains:
//! - The engine that binds a schema model and compares instances
//! - Per-field comparison rules
//! - The identity and nil guard applied at every message crossing
//! - Dedicated rules for well-known types
//! - The fallback hook for foreign message types

pub mod engine;
pub mod field;
pub mod foreign;
pub mod guard;
pub mod well_known;

#[cfg(test)]
pub(crate) mod fixtures;

pub use engine::{BindOptions, Comparator, EqualityEngine};
pub use field::{float_eq, scalar_eq};
pub use foreign::{ForeignEquality, ReflectEquality, reflect_eq, value_eq};
pub use guard::{Guard, check};
