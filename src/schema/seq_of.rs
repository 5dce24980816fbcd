//! Homogeneous ordered collections.

use crate::core::errors::Errors;
use crate::core::value::Value;
use crate::schema::typedef::TypeDef;

/// Wraps a single element [`TypeDef`]: "ordered, possibly-empty sequence
/// of T".
///
/// Nil collections are a distinct state from empty collections and survive
/// round-trips; nil is valid at this level — required-ness is a validator's
/// job on the outer spec.
#[derive(Debug, Clone)]
pub struct SeqOf {
    spec: Box<TypeDef>,
}

impl SeqOf {
    /// Wraps the element spec.
    #[must_use]
    pub fn new(spec: TypeDef) -> SeqOf {
        SeqOf {
            spec: Box::new(spec),
        }
    }

    /// The element spec.
    #[must_use]
    pub fn spec(&self) -> &TypeDef {
        &self.spec
    }

    /// Maps every element through the element spec's typecast, preserving
    /// order and length exactly. Nil stays nil; non-sequence input passes
    /// through untouched (validation flags it).
    #[must_use]
    pub fn typecast(&self, values: Value) -> Value {
        match values {
            Value::Null => Value::Null,
            Value::Seq(items) => {
                Value::Seq(items.into_iter().map(|v| self.spec.typecast(v)).collect())
            }
            other => other,
        }
    }

    /// Validates each element at path `"{path}/{index}"`.
    pub fn validate(&self, value: &Value, errors: &mut Errors, path: &str) {
        if let Value::Seq(items) = value {
            for (index, element) in items.iter().enumerate() {
                self.spec.validate(element, errors, &format!("{path}/{index}"));
            }
        }
    }

    /// Serializes element-wise, with the same order/length contract as
    /// [`SeqOf::typecast`].
    #[must_use]
    pub fn to_data(&self, value: &Value) -> Value {
        match value {
            Value::Seq(items) => {
                Value::Seq(items.iter().map(|v| self.spec.to_data(v)).collect())
            }
            other => other.clone(),
        }
    }
}
