//! The recursive type descriptor.
//!
//! A [`TypeDef`] holds a value type — a primitive tag, a composite
//! ([`SeqOf`]/[`MapOf`]), or a nested-model handle — plus zero or more
//! validators. It is built exactly once from a [`Spec`], immutable
//! thereafter, and safely shared read-only across concurrent typecast,
//! validate, and `to_data` calls.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::core::error::SchemaError;
use crate::core::errors::{ErrorKind, Errors};
use crate::core::value::Value;
use crate::model::ModelType;
use crate::schema::map_of::MapOf;
use crate::schema::seq_of::SeqOf;
use crate::schema::spec::{Spec, TypeRef};
use crate::types::{coerce, Primitive};
use crate::validators::Validator;

/// The compiled value type of a [`TypeDef`].
///
/// An explicit sum type keeps the recursive tree finite, inspectable, and
/// exhaustively matchable; [`ValueType::Model`] is the single seam where a
/// host's model type plugs in.
#[derive(Clone)]
pub enum ValueType {
    /// No declared type: values pass through untouched.
    Any,
    /// A registered primitive.
    Primitive(Primitive),
    /// A homogeneous ordered sequence.
    Seq(SeqOf),
    /// An independently-typed key/value mapping.
    Map(MapOf),
    /// An externally defined nested-model type.
    Model(Arc<dyn ModelType>),
}

impl ValueType {
    fn kind(&self) -> &str {
        match self {
            ValueType::Any => "any",
            ValueType::Primitive(p) => p.name(),
            ValueType::Seq(_) => "seq_of",
            ValueType::Map(_) => "map_of",
            ValueType::Model(m) => m.name(),
        }
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Any => f.write_str("Any"),
            ValueType::Primitive(p) => write!(f, "Primitive({p})"),
            ValueType::Seq(s) => f.debug_tuple("Seq").field(s).finish(),
            ValueType::Map(m) => f.debug_tuple("Map").field(m).finish(),
            ValueType::Model(m) => write!(f, "Model({})", m.name()),
        }
    }
}

/// A compiled schema node: value type plus attached validators.
#[derive(Debug, Clone)]
pub struct TypeDef {
    value_type: ValueType,
    validators: Vec<Validator>,
}

impl TypeDef {
    /// Compiles a [`Spec`] into a `TypeDef` tree.
    ///
    /// Validator references are resolved here, and composite children are
    /// built recursively, so every schema-configuration mistake surfaces
    /// at build time. A `seq_of`/`map_of` declaration takes precedence
    /// over a bare `type` tag.
    ///
    /// # Errors
    ///
    /// Any [`SchemaError`] from an unbuildable validator reference or a
    /// malformed child spec.
    pub fn build(spec: Spec) -> Result<TypeDef, SchemaError> {
        let validators = spec
            .validations
            .into_iter()
            .map(Validator::build)
            .collect::<Result<Vec<_>, _>>()?;

        let value_type = if let Some(element) = spec.seq_of {
            ValueType::Seq(SeqOf::new(TypeDef::build(*element)?))
        } else if let Some((key, value)) = spec.map_of {
            ValueType::Map(MapOf::new(TypeDef::build(*key)?, TypeDef::build(*value)?))
        } else {
            match spec.type_ref {
                None => ValueType::Any,
                Some(TypeRef::Primitive(p)) => ValueType::Primitive(p),
                Some(TypeRef::Model(m)) => ValueType::Model(m),
            }
        };

        trace!(
            kind = value_type.kind(),
            validators = validators.len(),
            "compiled type definition"
        );

        Ok(TypeDef {
            value_type,
            validators,
        })
    }

    /// The compiled value type.
    #[must_use]
    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    /// The attached validators, in declaration order.
    #[must_use]
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Best-effort coercion of `raw` into the canonical form for this
    /// node's value type.
    ///
    /// Deliberately lenient: when a primitive coercion signals failure the
    /// raw value is kept as-is, and the validation pass re-checks
    /// coercibility and flags the mismatch. Typecasting never fails on bad
    /// data.
    #[must_use]
    pub fn typecast(&self, raw: Value) -> Value {
        match &self.value_type {
            ValueType::Any => raw,
            ValueType::Primitive(p) => match coerce(*p, &raw) {
                Some(canonical) => canonical,
                None => raw,
            },
            ValueType::Seq(s) => s.typecast(raw),
            ValueType::Map(m) => m.typecast(raw),
            ValueType::Model(model) => model.typecast(raw),
        }
    }

    /// Validates `value`, appending path-qualified messages to `errors`.
    ///
    /// Runs three independent passes, never short-circuiting: the
    /// type/shape check (coercibility for primitives, collection shape for
    /// composites, always skipping nil), every attached validator, and
    /// composite recursion (which extends the path per element). When the
    /// value is itself a nested-model instance, the instance's own
    /// validation runs as well and its errors merge in under `path`.
    pub fn validate(&self, value: &Value, errors: &mut Errors, path: &str) {
        let shape_mismatch = match &self.value_type {
            ValueType::Primitive(p) => !value.is_null() && coerce(*p, value).is_none(),
            ValueType::Seq(_) => !value.is_null() && !matches!(value, Value::Seq(_)),
            ValueType::Map(_) => !value.is_null() && !matches!(value, Value::Map(_)),
            ValueType::Any | ValueType::Model(_) => false,
        };
        if shape_mismatch {
            errors.add(path, ErrorKind::Invalid);
        }

        for validator in &self.validators {
            for kind in validator.run(value) {
                errors.add(path, kind);
            }
        }

        match &self.value_type {
            ValueType::Seq(s) => s.validate(value, errors, path),
            ValueType::Map(m) => m.validate(value, errors, path),
            _ => {}
        }

        if let Value::Model(instance) = value {
            let nested = instance.validate();
            if !nested.is_empty() {
                errors.merge(&nested, path);
            }
        }
    }

    /// Projects an in-memory value back into its plain data representation.
    ///
    /// Composites serialize element-wise, nested-model instances through
    /// their own serialization; everything else passes through unchanged —
    /// nil stays nil, never coerced into a default.
    #[must_use]
    pub fn to_data(&self, value: &Value) -> Value {
        match &self.value_type {
            ValueType::Seq(s) => s.to_data(value),
            ValueType::Map(m) => m.to_data(value),
            _ => match value {
                Value::Model(instance) => instance.to_data(),
                other => other.clone(),
            },
        }
    }
}
