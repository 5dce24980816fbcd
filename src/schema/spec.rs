//! Specification literals: the unbuilt description a schema is compiled
//! from.
//!
//! The grammar, as a tagged configuration value:
//!
//! ```text
//! Spec := ScalarTag
//!       | { type?: ScalarTagOrNestedModelRef,
//!           seq_of?: Spec,
//!           map_of?: [Spec, Spec],
//!           validations?: [ValidatorRef...] }
//! ```
//!
//! At most one of `seq_of`/`map_of` may be present. In `map_of`'s value
//! position, a 2-element sequence is sugar for `{type: map, map_of: <that
//! pair>}` — an implicit nested map.
//!
//! Two entry points: the typed builder API ([`Spec::of`], [`Spec::seq_of`],
//! [`Spec::map_of`], [`Spec::model`]) and [`Spec::parse`], which accepts
//! the grammar as a plain `serde_json::Value` (where nested-model
//! references and custom validator objects are not expressible).

use std::fmt;
use std::sync::Arc;

use crate::core::error::SchemaError;
use crate::model::ModelType;
use crate::types::Primitive;
use crate::validators::ValidatorRef;

/// A declared value type: a primitive tag or a nested-model handle.
#[derive(Clone)]
pub enum TypeRef {
    /// A registered primitive tag.
    Primitive(Primitive),
    /// An externally defined model type, plugged in as a schema leaf.
    Model(Arc<dyn ModelType>),
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "Primitive({p})"),
            TypeRef::Model(m) => write!(f, "Model({})", m.name()),
        }
    }
}

/// An unbuilt schema specification.
///
/// # Examples
///
/// ```rust
/// use typed_schema::{Primitive, Spec};
///
/// // Scalar with validations.
/// let name = Spec::of(Primitive::String).validate("required");
///
/// // Homogeneous sequence of integers.
/// let scores = Spec::seq_of(Primitive::Integer);
///
/// // Mapping from string keys to integer values.
/// let ages = Spec::map_of(Primitive::String, Primitive::Integer);
/// # let _ = (name, scores, ages);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Spec {
    pub(crate) type_ref: Option<TypeRef>,
    pub(crate) seq_of: Option<Box<Spec>>,
    pub(crate) map_of: Option<(Box<Spec>, Box<Spec>)>,
    pub(crate) validations: Vec<ValidatorRef>,
}

impl Spec {
    /// A spec with no declared type: values pass through untouched.
    #[must_use]
    pub fn any() -> Spec {
        Spec::default()
    }

    /// A spec for a primitive tag.
    #[must_use]
    pub fn of(primitive: Primitive) -> Spec {
        Spec {
            type_ref: Some(TypeRef::Primitive(primitive)),
            ..Spec::default()
        }
    }

    /// A spec for a nested-model leaf.
    #[must_use]
    pub fn model(model: Arc<dyn ModelType>) -> Spec {
        Spec {
            type_ref: Some(TypeRef::Model(model)),
            ..Spec::default()
        }
    }

    /// A spec for a homogeneous ordered sequence of `element`.
    #[must_use]
    pub fn seq_of(element: impl Into<Spec>) -> Spec {
        Spec {
            seq_of: Some(Box::new(element.into())),
            ..Spec::default()
        }
    }

    /// A spec for a mapping whose keys and values are independently typed.
    #[must_use]
    pub fn map_of(key: impl Into<Spec>, value: impl Into<Spec>) -> Spec {
        Spec {
            map_of: Some((Box::new(key.into()), Box::new(value.into()))),
            ..Spec::default()
        }
    }

    /// Appends a validation (a built-in name or a custom validator).
    #[must_use]
    pub fn validate(mut self, reference: impl Into<ValidatorRef>) -> Spec {
        self.validations.push(reference.into());
        self
    }

    /// Parses the tagged-configuration form of the grammar.
    ///
    /// # Errors
    ///
    /// Fails fast on unrecognized type tags, non-pair `map_of` values,
    /// conflicting composites, and literals outside the grammar.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_json::json;
    /// use typed_schema::Spec;
    ///
    /// let spec = Spec::parse(&json!({
    ///     "seq_of": {"type": "string", "validations": ["required"]},
    /// }))
    /// .unwrap();
    /// # let _ = spec;
    /// ```
    pub fn parse(literal: &serde_json::Value) -> Result<Spec, SchemaError> {
        match literal {
            serde_json::Value::String(tag) => Ok(Spec::of(tag.parse()?)),
            serde_json::Value::Object(fields) => Spec::parse_object(fields),
            other => Err(SchemaError::MalformedSpec(format!(
                "expected a type tag or spec object, got {other}"
            ))),
        }
    }

    fn parse_object(
        fields: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Spec, SchemaError> {
        let mut spec = Spec::any();

        if let Some(tag) = fields.get("type") {
            let tag = tag.as_str().ok_or_else(|| {
                SchemaError::MalformedSpec(format!("type tag must be a string, got {tag}"))
            })?;
            spec.type_ref = Some(TypeRef::Primitive(tag.parse()?));
        }

        if let Some(validations) = fields.get("validations") {
            let entries = validations.as_array().ok_or_else(|| {
                SchemaError::MalformedSpec("validations must be a sequence".to_owned())
            })?;
            for entry in entries {
                let name = entry.as_str().ok_or_else(|| {
                    SchemaError::MalformedSpec(format!(
                        "validation reference must be a validator name, got {entry}"
                    ))
                })?;
                spec.validations.push(ValidatorRef::from(name.to_owned()));
            }
        }

        match (fields.get("seq_of"), fields.get("map_of")) {
            (Some(_), Some(_)) => return Err(SchemaError::ConflictingComposite),
            (Some(element), None) => {
                spec.seq_of = Some(Box::new(Spec::parse(element)?));
            }
            (None, Some(pair)) => {
                let pair = pair.as_array().ok_or_else(|| {
                    SchemaError::MalformedSpec("map_of must be a sequence".to_owned())
                })?;
                let (key, value) = Spec::parse_map_pair(pair)?;
                spec.map_of = Some((Box::new(key), Box::new(value)));
            }
            (None, None) => {}
        }

        Ok(spec)
    }

    /// Parses a `map_of` pair, expanding the implicit-nested-map sugar in
    /// the value position.
    fn parse_map_pair(pair: &[serde_json::Value]) -> Result<(Spec, Spec), SchemaError> {
        let [key, value] = pair else {
            return Err(SchemaError::MalformedMapOf(pair.len()));
        };
        let key = Spec::parse(key)?;
        let value = match value {
            serde_json::Value::Array(inner) => {
                let (k, v) = Spec::parse_map_pair(inner)?;
                Spec::map_of(k, v)
            }
            other => Spec::parse(other)?,
        };
        Ok((key, value))
    }
}

impl From<Primitive> for Spec {
    fn from(primitive: Primitive) -> Spec {
        Spec::of(primitive)
    }
}
