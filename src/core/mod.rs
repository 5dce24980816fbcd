//! Foundational machinery: generic data values, the path-keyed error sink,
//! and schema-configuration errors.

pub mod error;
pub mod errors;
pub mod value;

pub use error::SchemaError;
pub use errors::{ErrorKind, Errors};
pub use value::Value;
