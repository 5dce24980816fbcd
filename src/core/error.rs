//! Schema-configuration errors.
//!
//! These are the *fatal* error class: a malformed schema specification is a
//! programming mistake in the declaration, not bad user data, and is raised
//! immediately at schema-build time. Malformed data never produces a
//! `SchemaError` — it accumulates in an [`Errors`](crate::core::errors::Errors)
//! sink instead.

use thiserror::Error;

/// Error raised while compiling a specification into a
/// [`TypeDef`](crate::schema::TypeDef) tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The declared value type is not a recognized primitive tag.
    #[error("unrecognized type '{0}'")]
    UnrecognizedType(String),

    /// A validation reference names no registered validator.
    #[error("unrecognized validation '{0}'")]
    UnrecognizedValidation(String),

    /// `map_of` did not receive a `[key_spec, value_spec]` pair.
    #[error("map_of expects a [key_spec, value_spec] pair, got {0} element(s)")]
    MalformedMapOf(usize),

    /// A single spec declared both `seq_of` and `map_of`.
    #[error("seq_of and map_of are mutually exclusive within one spec")]
    ConflictingComposite,

    /// The specification literal does not match the grammar.
    #[error("malformed spec literal: {0}")]
    MalformedSpec(String),
}
