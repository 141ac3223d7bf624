//! Binding a schema model into an equality engine, and running comparisons.
//!
//! Binding validates the model and compiles each message into a list of
//! [`FieldRule`]s. After that, comparison cannot fail: it returns a bool.

use std::fmt;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use crate::equal::ForeignEquality;
use crate::equal::field::{FieldComparator, FieldRule, MessageRule, ValueRule};
use crate::equal::guard::{self, Guard, Pending};
use crate::equal::well_known;
use crate::error::SchemaError;
use crate::model::Message;
use crate::schema::{Cardinality, FieldSchema, MessageSchema, Presence, SchemaModel, WellKnownTag};
use crate::validate::{self, Target};

/// Options for binding a schema model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindOptions {
    /// Accept references to message types the model has no schema for.
    ///
    /// When enabled, such fields are compared by the model's
    /// [`ForeignEquality`]. When disabled, binding fails with
    /// [`SchemaError::UnresolvedType`].
    pub allow_foreign_types: bool,

    /// Reject field numbers that protobuf does not allow (0, above 2^29-1,
    /// or inside the reserved 19000-19999 band).
    pub check_field_numbers: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            allow_foreign_types: true,
            check_field_numbers: true,
        }
    }
}

impl BindOptions {
    /// Creates default binding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that require every referenced type to be bound locally.
    pub fn strict() -> Self {
        Self {
            allow_foreign_types: false,
            ..Self::default()
        }
    }
}

/// A compiled message type.
#[derive(Debug, Clone)]
struct BoundMessage {
    full_name: String,
    /// One rule per field, or per oneof group, in declaration order.
    fields: Vec<FieldRule>,
}

/// Equality for every message type of a bound schema model.
///
/// The engine is immutable once bound and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use proto_equal::{EqualityEngine, FieldSchema, Kind, MessageBuilder, MessageSchema, SchemaModel};
///
/// let model = SchemaModel::new().message(
///     MessageSchema::new("test.Point")
///         .field(FieldSchema::new("x", 1, Kind::Double))
///         .field(FieldSchema::new("y", 2, Kind::Double)),
/// );
/// let engine = EqualityEngine::bind(&model).unwrap();
///
/// let a = MessageBuilder::new("test.Point").set("x", 1.0f64).build();
/// let b = MessageBuilder::new("test.Point").set("x", 1.0f64).set("y", 0.0f64).build();
///
/// let point = engine.comparator("test.Point").unwrap();
/// assert!(point.equal(Some(&a), Some(&b)));
/// ```
pub struct EqualityEngine {
    messages: Vec<BoundMessage>,
    index: FxHashMap<String, usize>,
    fallback: Arc<dyn ForeignEquality>,
}

impl EqualityEngine {
    /// Binds a schema model with default options.
    pub fn bind(model: &SchemaModel) -> Result<Self, SchemaError> {
        Self::bind_with_options(model, &BindOptions::default())
    }

    /// Binds a schema model.
    ///
    /// Fails if any message of the model is invalid; no comparator is
    /// produced for a partially valid model.
    pub fn bind_with_options(model: &SchemaModel, options: &BindOptions) -> Result<Self, SchemaError> {
        match Self::compile(model, options) {
            Ok((engine, foreign)) => {
                debug!(
                    messages = engine.messages.len(),
                    foreign,
                    fallback = engine.fallback.name(),
                    "schema bound"
                );
                Ok(engine)
            }
            Err(e) => {
                warn!(error = %e, code = e.code().code(), "schema binding rejected");
                Err(e)
            }
        }
    }

    fn compile(model: &SchemaModel, options: &BindOptions) -> Result<(Self, usize), SchemaError> {
        let index = validate::index_messages(model)?;
        let mut compiler = Compiler {
            index: &index,
            options,
            foreign: 0,
        };

        let mut messages = Vec::with_capacity(model.messages().len());
        for message in model.messages() {
            validate::validate_message(message, &index, options)?;
            messages.push(compiler.message(message)?);
        }

        let foreign = compiler.foreign;
        let engine = Self {
            messages,
            index: index
                .into_iter()
                .map(|(name, i)| (name.to_string(), i))
                .collect(),
            fallback: Arc::clone(model.fallback()),
        };
        Ok((engine, foreign))
    }

    /// Returns the comparator for a bound message type.
    pub fn comparator(&self, full_name: &str) -> Result<Comparator<'_>, SchemaError> {
        let name = full_name.strip_prefix('.').unwrap_or(full_name);
        match self.index.get(name) {
            Some(&message) => Ok(Comparator {
                engine: self,
                message,
            }),
            None => Err(SchemaError::UnknownMessage {
                message: name.to_string(),
            }),
        }
    }

    /// Returns true if `full_name` is bound.
    pub fn contains(&self, full_name: &str) -> bool {
        self.index.contains_key(full_name.strip_prefix('.').unwrap_or(full_name))
    }

    /// Iterates the bound message names in registration order.
    pub fn message_names(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(|m| m.full_name.as_str())
    }

    /// Compares two instances, resolving the type from the instances.
    ///
    /// Instances of different types are not equal. Types without a bound
    /// schema use the well-known rules when they apply, and the fallback
    /// otherwise.
    pub fn equal_messages(&self, a: &Message, b: &Message) -> bool {
        if a.is_same(b) {
            return true;
        }
        if a.type_name() != b.type_name() {
            return false;
        }
        let name = a.type_name();
        if let Some(&message) = self.index.get(name) {
            return self.run(message, Some(a), Some(b));
        }
        match WellKnownTag::from_full_name(name) {
            Some(tag) if tag != WellKnownTag::Structural => {
                well_known::equal(tag, Some(a), Some(b), self.fallback.as_ref())
            }
            _ => {
                trace!(type_name = %name, fallback = self.fallback.name(), "delegating to foreign equality");
                self.fallback.equal(name, Some(a), Some(b))
            }
        }
    }

    /// Compares two instances of the bound message at `message`.
    ///
    /// Nested local messages are pushed on a work stack instead of being
    /// compared recursively, so arbitrarily deep chains use constant call
    /// stack.
    fn run(&self, message: usize, a: Option<&Message>, b: Option<&Message>) -> bool {
        let (a, b) = match guard::check(a, b) {
            Guard::Resolved(eq) => return eq,
            Guard::Descend(a, b) => (a, b),
        };

        let mut cmp = FieldComparator::new(self.fallback.as_ref());
        cmp.descend(message, a, b);

        while let Some(Pending { message, a, b }) = cmp.next() {
            let Some(bound) = self.messages.get(message) else {
                return false;
            };
            for rule in &bound.fields {
                if !cmp.field(rule, a, b) {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Debug for EqualityEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EqualityEngine")
            .field("messages", &self.messages.len())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

/// Equality for one bound message type.
#[derive(Debug, Clone, Copy)]
pub struct Comparator<'e> {
    engine: &'e EqualityEngine,
    message: usize,
}

impl<'e> Comparator<'e> {
    /// Returns the full name of the compared type.
    pub fn full_name(&self) -> &'e str {
        self.engine
            .messages
            .get(self.message)
            .map_or("", |m| m.full_name.as_str())
    }

    /// Returns true if `a` and `b` are equal.
    ///
    /// Both must be instances of this comparator's type; `None` stands for
    /// an absent message.
    pub fn equal(&self, a: Option<&Message>, b: Option<&Message>) -> bool {
        self.engine.run(self.message, a, b)
    }
}

/// Compiles validated message schemas into field rules.
struct Compiler<'a> {
    index: &'a FxHashMap<&'a str, usize>,
    options: &'a BindOptions,
    /// Number of fields routed to the fallback.
    foreign: usize,
}

impl Compiler<'_> {
    fn message(&mut self, message: &MessageSchema) -> Result<BoundMessage, SchemaError> {
        let mut fields = Vec::with_capacity(message.fields.len());
        let mut groups = FxHashSet::default();

        for field in &message.fields {
            // A oneof group is compared as a unit, at the position of its first member.
            if let Some(group) = field.real_oneof() {
                if !groups.insert(group) {
                    continue;
                }
                let mut members = FxHashMap::default();
                for member in message.oneof_members(group) {
                    members.insert(member.name.clone(), self.value(message, member)?);
                }
                fields.push(FieldRule::Oneof {
                    group: group.to_string(),
                    members,
                });
                continue;
            }

            let rule = match field.cardinality {
                Cardinality::Singular => match (field.presence, field.kind.default_value()) {
                    (Presence::Implicit, Some(default)) => FieldRule::Implicit {
                        field: field.name.clone(),
                        default,
                    },
                    _ => FieldRule::Explicit {
                        field: field.name.clone(),
                        rule: self.value(message, field)?,
                    },
                },
                Cardinality::List => FieldRule::List {
                    field: field.name.clone(),
                    element: self.value(message, field)?,
                },
                Cardinality::Map => {
                    let entry = field.map_entry.as_ref().ok_or_else(|| SchemaError::MissingMapEntry {
                        message: message.full_name.clone(),
                        field: field.name.clone(),
                    })?;
                    FieldRule::Map {
                        field: field.name.clone(),
                        key: entry.key,
                        value: self.value(message, &entry.value)?,
                    }
                }
            };
            fields.push(rule);
        }

        Ok(BoundMessage {
            full_name: message.full_name.clone(),
            fields,
        })
    }

    fn value(&mut self, message: &MessageSchema, field: &FieldSchema) -> Result<ValueRule, SchemaError> {
        if !field.is_message() {
            return Ok(ValueRule::Scalar);
        }
        let rule = match validate::resolve_target(message, field, self.index, self.options)? {
            Target::Local(i) => MessageRule::Local(i),
            Target::WellKnown(tag) => MessageRule::WellKnown(tag),
            Target::Foreign(name) => {
                self.foreign += 1;
                MessageRule::Foreign(name.to_string())
            }
        };
        Ok(ValueRule::Message(rule))
    }
}
