//! # typed-schema
//!
//! A recursive schema-description and validation engine for structured data.
//!
//! Given a declarative specification of a value's shape — a scalar type, a
//! homogeneous sequence, or a key/value mapping, each with attached
//! validation rules — this crate can:
//!
//! - **typecast** loosely-typed input data into canonical in-memory values,
//! - **validate** those values against the declared rules, accumulating
//!   path-qualified error messages, and
//! - **serialize** in-memory values back into a plain data representation
//!   via `to_data`.
//!
//! ## Quick Start
//!
//! ```rust
//! use typed_schema::prelude::*;
//!
//! let spec = Spec::seq_of(Spec::of(Primitive::Integer)).validate("required");
//! let schema = TypeDef::build(spec).unwrap();
//!
//! let value = schema.typecast(Value::from(vec![Value::from("1"), Value::from(2)]));
//! assert_eq!(value, Value::from(vec![Value::from(1), Value::from(2)]));
//!
//! let mut errors = Errors::new();
//! schema.validate(&value, &mut errors, "numbers");
//! assert!(errors.is_empty());
//! ```
//!
//! ## Error Paths
//!
//! Validation errors are keyed by `/`-joined paths derived from the schema
//! tree: sequence elements extend the path with their index
//! (`addresses/1/street`), mapping values with their key (`my_map/joe`),
//! and mapping keys with a literal `keys` segment (`my_map/keys/joe`), so
//! key errors never collide with value errors.
//!
//! ## Extension Points
//!
//! - [`ValidateValue`](validators::ValidateValue) — plug in a custom
//!   validator alongside the built-in set.
//! - [`ModelType`](model::ModelType) / [`ModelInstance`](model::ModelInstance)
//!   — plug an externally defined model type into the schema tree as a leaf
//!   that supplies its own typecast/validate/serialize behavior.
//!
//! Schema trees are built once via [`TypeDef::build`], immutable thereafter,
//! and safely shared across concurrent callers; each `validate` call takes
//! its own fresh [`Errors`] sink.

pub mod core;
pub mod model;
pub mod prelude;
pub mod schema;
pub mod types;
pub mod validators;

pub use crate::core::error::SchemaError;
pub use crate::core::errors::{ErrorKind, Errors};
pub use crate::core::value::Value;
pub use crate::model::{ModelInstance, ModelSchema, ModelType, Record};
pub use crate::schema::{MapOf, SeqOf, Spec, TypeDef, TypeRef, ValueType};
pub use crate::types::Primitive;
pub use crate::validators::{Builtin, ValidateValue, Validator, ValidatorRef};
