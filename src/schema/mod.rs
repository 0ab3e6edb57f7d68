//! Schema subsystem
//!
//! A schema declares the expected shape of a document: an ordered set of
//! fields, each with a type, presence rules, an optional default and
//! content validators. Schemas nest, are shared by `Arc`, and may refer back
//! to themselves through dynamic types.
//!
//! # Design Principles
//!
//! - Validation collects every problem into one path-keyed report
//! - No type coercion
//! - Defaults are a separate pass and never run during validation
//! - Dynamic types are resolved lazily, per field, per document
//! - Schemas are read-only after `build`, so sharing across threads is safe

mod defaults;
mod definition;
mod errors;
mod report;
mod resolver;
mod types;
mod validator;

pub use defaults::DefaultApplier;
pub use definition::{Schema, SchemaBuilder};
pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, ValidationFailure};
pub use report::ErrorReport;
pub use resolver::resolve;
pub use types::{DefaultValue, DynamicType, FieldSpec, FieldType, Primitive};
pub use validator::SchemaValidator;
