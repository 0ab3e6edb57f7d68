//! Schema type definitions
//!
//! Supported type descriptors:
//! - primitive: string, int, float, bool, object, list, datetime
//! - mixed: ordered union of candidate descriptors
//! - schema: nested document validated against another schema
//! - array: sequence whose elements share one descriptor
//! - dynamic: descriptor computed from the enclosing document at validation time

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::definition::Schema;
use crate::validators::FieldValidator;

/// Atomic value types, checked structurally against the JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    /// UTF-8 string
    String,
    /// 64-bit integer (signed or unsigned)
    Int,
    /// Any JSON number
    Float,
    /// Boolean
    Bool,
    /// Any mapping, contents unchecked
    Object,
    /// Any sequence, contents unchecked
    List,
    /// RFC 3339 timestamp string
    DateTime,
}

impl Primitive {
    /// Returns the type name for error messages
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::Bool => "bool",
            Primitive::Object => "object",
            Primitive::List => "list",
            Primitive::DateTime => "datetime",
        }
    }

    /// Whether a value has this type. Never coerces.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Primitive::String => value.is_string(),
            Primitive::Int => value.is_i64() || value.is_u64(),
            // Integers are acceptable where a float is declared
            Primitive::Float => value.is_number(),
            Primitive::Bool => value.is_boolean(),
            Primitive::Object => value.is_object(),
            Primitive::List => value.is_array(),
            Primitive::DateTime => value
                .as_str()
                .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok()),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

type ResolveFn = dyn Fn(&Map<String, Value>) -> FieldType + Send + Sync;

/// Computes a field's type descriptor from the mapping that holds the field.
///
/// Resolution is lazy: the function runs each time the field is validated,
/// and whatever it returns is only checked when a document exercises it.
#[derive(Clone)]
pub struct DynamicType(Arc<ResolveFn>);

impl DynamicType {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> FieldType + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the resolver against the enclosing document
    pub fn resolve(&self, parent: &Map<String, Value>) -> FieldType {
        (self.0)(parent)
    }
}

impl fmt::Debug for DynamicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DynamicType(..)")
    }
}

/// A field's declared type.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// Atomic type check
    Primitive(Primitive),
    /// Valid if any candidate matches, tried in order
    Mixed(Vec<FieldType>),
    /// Nested document; the schema is shared, never copied
    Schema(Arc<Schema>),
    /// Homogeneous sequence
    Array(Box<FieldType>),
    /// Resolved from the enclosing document at validation time
    Dynamic(DynamicType),
}

impl FieldType {
    pub fn string() -> Self {
        FieldType::Primitive(Primitive::String)
    }

    pub fn int() -> Self {
        FieldType::Primitive(Primitive::Int)
    }

    pub fn float() -> Self {
        FieldType::Primitive(Primitive::Float)
    }

    pub fn bool() -> Self {
        FieldType::Primitive(Primitive::Bool)
    }

    pub fn datetime() -> Self {
        FieldType::Primitive(Primitive::DateTime)
    }

    /// Union of candidate types
    pub fn mixed(candidates: impl IntoIterator<Item = FieldType>) -> Self {
        FieldType::Mixed(candidates.into_iter().collect())
    }

    /// Sequence of `element`
    pub fn array(element: impl Into<FieldType>) -> Self {
        FieldType::Array(Box::new(element.into()))
    }

    /// Type computed from the enclosing document
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> FieldType + Send + Sync + 'static,
    {
        FieldType::Dynamic(DynamicType::new(f))
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> String {
        match self {
            FieldType::Primitive(p) => p.name().to_string(),
            FieldType::Mixed(candidates) => candidates
                .iter()
                .map(FieldType::type_name)
                .collect::<Vec<_>>()
                .join(" | "),
            FieldType::Schema(schema) => schema.name().unwrap_or("document").to_string(),
            FieldType::Array(element) => format!("array<{}>", element.type_name()),
            FieldType::Dynamic(_) => "dynamic".to_string(),
        }
    }

    /// Shallow check that a literal default has the shape of this type.
    /// Nested schema contents and dynamic types are not inspected.
    pub(crate) fn accepts_literal(&self, value: &Value) -> bool {
        match self {
            FieldType::Primitive(p) => p.matches(value),
            FieldType::Mixed(candidates) => candidates.iter().any(|c| c.accepts_literal(value)),
            FieldType::Schema(_) => value.is_object(),
            FieldType::Array(element) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| element.accepts_literal(item))),
            FieldType::Dynamic(_) => true,
        }
    }
}

impl From<Primitive> for FieldType {
    fn from(p: Primitive) -> Self {
        FieldType::Primitive(p)
    }
}

impl From<Schema> for FieldType {
    fn from(schema: Schema) -> Self {
        FieldType::Schema(Arc::new(schema))
    }
}

impl From<Arc<Schema>> for FieldType {
    fn from(schema: Arc<Schema>) -> Self {
        FieldType::Schema(schema)
    }
}

impl From<&Arc<Schema>> for FieldType {
    fn from(schema: &Arc<Schema>) -> Self {
        FieldType::Schema(Arc::clone(schema))
    }
}

type ProduceFn = dyn Fn() -> Value + Send + Sync;
type ClockFn = dyn Fn(DateTime<Utc>) -> Value + Send + Sync;

/// Value used to fill a missing field.
#[derive(Clone)]
pub enum DefaultValue {
    /// Assigned as-is
    Literal(Value),
    /// Zero-argument producer, called once per application
    Produced(Arc<ProduceFn>),
    /// Producer fed the clock passed to default application
    Clock(Arc<ClockFn>),
}

impl DefaultValue {
    /// The clock reading of the default-application call, as RFC 3339
    pub fn timestamp() -> Self {
        DefaultValue::Clock(Arc::new(|now| Value::String(now.to_rfc3339())))
    }

    /// Produce the value to assign
    pub fn produce(&self, now: DateTime<Utc>) -> Value {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Produced(f) => f(),
            DefaultValue::Clock(f) => f(now),
        }
    }

    pub(crate) fn as_literal(&self) -> Option<&Value> {
        match self {
            DefaultValue::Literal(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultValue::Produced(_) => f.write_str("Produced(..)"),
            DefaultValue::Clock(_) => f.write_str("Clock(..)"),
        }
    }
}

/// Field specification: type, presence rules, default and validators.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Declared type
    pub field_type: FieldType,
    /// Whether the key must be present
    pub required: bool,
    /// Whether an explicit null is allowed; `None` means `!required`
    pub nullable: Option<bool>,
    /// Value filled in by default application
    pub default: Option<DefaultValue>,
    /// Content checks, run in order after the type check passes
    pub validators: Vec<FieldValidator>,
}

impl FieldSpec {
    /// Optional field of the given type with no default or validators
    pub fn new(field_type: impl Into<FieldType>) -> Self {
        Self {
            field_type: field_type.into(),
            required: false,
            nullable: None,
            default: None,
            validators: Vec::new(),
        }
    }

    /// Create a required string field
    pub fn required_string() -> Self {
        Self::new(FieldType::string()).required()
    }

    /// Create an optional string field
    pub fn optional_string() -> Self {
        Self::new(FieldType::string())
    }

    /// Create a required int field
    pub fn required_int() -> Self {
        Self::new(FieldType::int()).required()
    }

    /// Create an optional int field
    pub fn optional_int() -> Self {
        Self::new(FieldType::int())
    }

    /// Create a required nested document field
    pub fn required_schema(schema: impl Into<FieldType>) -> Self {
        Self::new(schema).required()
    }

    /// Create a required array field
    pub fn required_array(element: impl Into<FieldType>) -> Self {
        Self::new(FieldType::array(element)).required()
    }

    /// Create an optional array field
    pub fn optional_array(element: impl Into<FieldType>) -> Self {
        Self::new(FieldType::array(element))
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Override whether an explicit null is accepted
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// Literal default
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Literal(value.into()));
        self
    }

    /// Default produced by a zero-argument function
    pub fn default_with<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Produced(Arc::new(f)));
        self
    }

    /// Default derived from the clock passed to default application
    pub fn default_from_clock<F>(mut self, f: F) -> Self
    where
        F: Fn(DateTime<Utc>) -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Clock(Arc::new(f)));
        self
    }

    /// Append a validator
    pub fn validates(mut self, validator: FieldValidator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Append several validators
    pub fn validates_all(mut self, validators: impl IntoIterator<Item = FieldValidator>) -> Self {
        self.validators.extend(validators);
        self
    }

    /// Whether an explicit null is accepted
    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(!self.required)
    }
}
