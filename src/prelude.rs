//! Convenience re-exports for consumers.
//!
//! ```rust
//! use typed_schema::prelude::*;
//!
//! let schema = TypeDef::build(Spec::of(Primitive::Integer)).unwrap();
//! assert_eq!(schema.typecast(Value::from("7")), Value::from(7));
//! ```

pub use crate::core::error::SchemaError;
pub use crate::core::errors::{ErrorKind, Errors};
pub use crate::core::value::Value;
pub use crate::model::{FieldDef, ModelInstance, ModelSchema, ModelType, Record};
pub use crate::schema::{MapOf, SeqOf, Spec, TypeDef, TypeRef, ValueType};
pub use crate::types::{coerce, Primitive};
pub use crate::validators::{Builtin, ValidateValue, Validator, ValidatorRef};
