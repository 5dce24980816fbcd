//! Independently-typed key/value mappings.

use indexmap::IndexMap;

use crate::core::errors::Errors;
use crate::core::value::Value;
use crate::schema::typedef::TypeDef;

/// Wraps a key [`TypeDef`] and a value [`TypeDef`]: "mapping whose keys and
/// values are each independently typed and validated".
///
/// Iteration order is insertion order. Key errors are reported under a
/// literal `keys` path segment (`"{path}/keys/{k}"`), distinct from value
/// paths (`"{path}/{k}"`), so the two never collide.
#[derive(Debug, Clone)]
pub struct MapOf {
    key_spec: Box<TypeDef>,
    value_spec: Box<TypeDef>,
}

impl MapOf {
    /// Wraps the key and value specs.
    #[must_use]
    pub fn new(key_spec: TypeDef, value_spec: TypeDef) -> MapOf {
        MapOf {
            key_spec: Box::new(key_spec),
            value_spec: Box::new(value_spec),
        }
    }

    /// The key spec.
    #[must_use]
    pub fn key_spec(&self) -> &TypeDef {
        &self.key_spec
    }

    /// The value spec.
    #[must_use]
    pub fn value_spec(&self) -> &TypeDef {
        &self.value_spec
    }

    /// Typecasts every key through the key spec and every value through the
    /// value spec, producing a new mapping. Nil stays nil; non-mapping
    /// input passes through untouched (validation flags it).
    ///
    /// Keys are canonicalized before insertion: two distinct raw keys that
    /// typecast to the same canonical key collide, last write wins. This is
    /// intentional.
    #[must_use]
    pub fn typecast(&self, values: Value) -> Value {
        match values {
            Value::Null => Value::Null,
            Value::Map(entries) => {
                let mut out = IndexMap::with_capacity(entries.len());
                for (k, v) in entries {
                    out.insert(self.key_spec.typecast(k), self.value_spec.typecast(v));
                }
                Value::Map(out)
            }
            other => other,
        }
    }

    /// Validates each key at `"{path}/keys/{k}"` and each value at
    /// `"{path}/{k}"`.
    pub fn validate(&self, value: &Value, errors: &mut Errors, path: &str) {
        if let Value::Map(entries) = value {
            for (k, v) in entries {
                self.key_spec.validate(k, errors, &format!("{path}/keys/{k}"));
                self.value_spec.validate(v, errors, &format!("{path}/{k}"));
            }
        }
    }

    /// Serializes both keys and values element-wise into a new mapping.
    #[must_use]
    pub fn to_data(&self, value: &Value) -> Value {
        match value {
            Value::Map(entries) => {
                let mut out = IndexMap::with_capacity(entries.len());
                for (k, v) in entries {
                    out.insert(self.key_spec.to_data(k), self.value_spec.to_data(v));
                }
                Value::Map(out)
            }
            other => other.clone(),
        }
    }
}
