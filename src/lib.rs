//! schemer - Declarative schemas and recursive validation for JSON documents
//!
//! A [`Schema`] declares the fields a document is expected to carry. Checking
//! a document walks every field, nested document and array element and
//! collects all problems into one [`ErrorReport`] keyed by dotted path.
//! Missing fields with declared defaults are filled by a separate pass.
//!
//! ```ignore
//! use schemer::{FieldSpec, FieldType, Schema};
//! use schemer::validators::gte;
//! use serde_json::json;
//!
//! let car = Schema::builder()
//!     .field("make", FieldSpec::required_string())
//!     .field("num_wheels", FieldSpec::new(FieldType::int()).default(4).validates(gte(0)))
//!     .build()?;
//!
//! let mut doc = json!({ "make": "Ford" });
//! car.apply_defaults(&mut doc);
//! car.validate(&doc)?;
//! ```

pub mod config;
pub mod observability;
pub mod schema;
pub mod validators;

pub use config::SchemerConfig;
pub use schema::{
    DefaultValue, DynamicType, ErrorReport, FieldSpec, FieldType, Primitive, Schema,
    SchemaBuilder, SchemaError, SchemaResult, SchemaValidator,
};
pub use validators::{FieldValidator, Violation};
