//! The nested-model seam, and a generic model host built on it.
//!
//! A *nested model* is an externally defined type plugged into the schema
//! tree as a leaf that supplies its own typecast/validate/serialize
//! behavior. The seam is two small capability traits: [`ModelType`] (the
//! schema-side handle, responsible for construction) and [`ModelInstance`]
//! (the value-side capability, responsible for validation and
//! serialization). The core treats both polymorphically and never assumes
//! a built-in kind.
//!
//! [`ModelSchema`] and [`Record`] are a ready-made host: an explicit,
//! insertion-ordered `field name -> compiled TypeDef` registry built once
//! at definition time (with parent-overlay inheritance), and a generic
//! instance whose assignments typecast, whose validation walks every
//! declared field, and whose export omits nil-valued fields — but keeps
//! explicit `false`, which is a meaningful value, not an absence.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::core::error::SchemaError;
use crate::core::errors::Errors;
use crate::core::value::Value;
use crate::schema::spec::Spec;
use crate::schema::typedef::TypeDef;

/// Schema-side handle for a nested-model type.
///
/// `typecast` is the construction capability: it must pass a value that is
/// already an instance of this type through unchanged, and otherwise
/// instantiate one from raw data. Like all typecasting it never fails —
/// hopeless input yields an instance whose own validation reports the
/// damage.
pub trait ModelType: Send + Sync {
    /// The model type's name.
    fn name(&self) -> &str;

    /// Passes an existing instance through, or instantiates one from raw
    /// data.
    fn typecast(&self, raw: Value) -> Value;
}

/// Value-side capability of a nested-model instance.
pub trait ModelInstance: Send + Sync {
    /// The name of the model type this instance belongs to.
    fn schema_name(&self) -> &str;

    /// Runs the instance's own field-level validation, returning a fresh
    /// sink with paths relative to the instance. The caller merges it
    /// under the enclosing path.
    fn validate(&self) -> Errors;

    /// Projects the instance back into plain data.
    fn to_data(&self) -> Value;
}

/// A declared field: name, optional serialized name, compiled spec.
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: String,
    mapping_key: Option<String>,
    spec: TypeDef,
}

impl FieldDef {
    /// The field's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key this field reads from and serializes to. Defaults to the
    /// field name.
    #[must_use]
    pub fn mapping_key(&self) -> &str {
        self.mapping_key.as_deref().unwrap_or(&self.name)
    }

    /// The field's compiled spec.
    #[must_use]
    pub fn spec(&self) -> &TypeDef {
        &self.spec
    }
}

#[derive(Debug)]
struct SchemaInner {
    name: String,
    fields: IndexMap<String, FieldDef>,
}

/// An explicit per-type registry of declared fields.
///
/// Built once, immutable and cheaply cloneable thereafter; implements
/// [`ModelType`], so it can be plugged into a [`Spec`] as a nested-model
/// leaf.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use typed_schema::{ModelSchema, Primitive, Spec};
///
/// let address = ModelSchema::builder("Address")
///     .field("street", Spec::of(Primitive::String).validate("required"))
///     .build()
///     .unwrap();
///
/// let employee = ModelSchema::builder("Employee")
///     .field("name", Spec::of(Primitive::String).validate("required"))
///     .field("primary_address", Spec::model(Arc::new(address)).validate("required"))
///     .build()
///     .unwrap();
/// # let _ = employee;
/// ```
#[derive(Debug, Clone)]
pub struct ModelSchema {
    inner: Arc<SchemaInner>,
}

impl ModelSchema {
    /// Starts a schema definition.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
        }
    }

    /// Starts a schema definition that inherits `parent`'s fields: the
    /// parent's registry is copied, and same-named declarations overlay it
    /// in place.
    #[must_use]
    pub fn extending(name: impl Into<String>, parent: &ModelSchema) -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            name: name.into(),
            parent: Some(parent.clone()),
            fields: Vec::new(),
        }
    }

    /// The schema's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The declared fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.inner.fields.values()
    }

    /// Looks a field up by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.inner.fields.get(name)
    }

    /// Resolves a data key to a field, by name first, then by mapping key.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&FieldDef> {
        self.inner
            .fields
            .get(key)
            .or_else(|| self.fields().find(|f| f.mapping_key() == key))
    }

    /// A fresh, empty instance of this schema.
    #[must_use]
    pub fn record(&self) -> Record {
        Record {
            schema: self.clone(),
            values: IndexMap::new(),
        }
    }

    /// Builds an instance from raw data, typecasting every recognized
    /// field and ignoring undeclared keys.
    #[must_use]
    pub fn record_from(&self, raw: &Value) -> Record {
        let mut record = self.record();
        record.assign(raw);
        record
    }
}

impl ModelType for ModelSchema {
    fn name(&self) -> &str {
        ModelSchema::name(self)
    }

    fn typecast(&self, raw: Value) -> Value {
        if let Value::Model(instance) = &raw {
            if instance.schema_name() == self.name() {
                return raw;
            }
        }
        Value::Model(Arc::new(self.record_from(&raw)))
    }
}

/// Collects field declarations for a [`ModelSchema`]; `build` compiles
/// every spec, failing fast on the first schema-configuration error.
#[derive(Debug)]
pub struct ModelSchemaBuilder {
    name: String,
    parent: Option<ModelSchema>,
    fields: Vec<(String, Option<String>, Spec)>,
}

impl ModelSchemaBuilder {
    /// Declares a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<Spec>) -> Self {
        self.fields.push((name.into(), None, spec.into()));
        self
    }

    /// Declares a field whose serialized name differs from its field name.
    #[must_use]
    pub fn mapped_field(
        mut self,
        name: impl Into<String>,
        mapping_key: impl Into<String>,
        spec: impl Into<Spec>,
    ) -> Self {
        self.fields
            .push((name.into(), Some(mapping_key.into()), spec.into()));
        self
    }

    /// Compiles the declared fields into an immutable schema.
    ///
    /// # Errors
    ///
    /// The first [`SchemaError`] from any field's spec.
    pub fn build(self) -> Result<ModelSchema, SchemaError> {
        let mut fields = match &self.parent {
            Some(parent) => parent.inner.fields.clone(),
            None => IndexMap::new(),
        };
        for (name, mapping_key, spec) in self.fields {
            let def = FieldDef {
                name: name.clone(),
                mapping_key,
                spec: TypeDef::build(spec)?,
            };
            fields.insert(name, def);
        }
        Ok(ModelSchema {
            inner: Arc::new(SchemaInner {
                name: self.name,
                fields,
            }),
        })
    }
}

static NULL: Value = Value::Null;

/// A generic model instance: a [`ModelSchema`] plus insertion-ordered
/// field values. Assignment typecasts; validation walks every declared
/// field at its field-name path.
#[derive(Debug, Clone)]
pub struct Record {
    schema: ModelSchema,
    values: IndexMap<String, Value>,
}

impl Record {
    /// The schema this record belongs to.
    #[must_use]
    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Typecasts `raw` through the field's spec and stores it. Returns
    /// false (and stores nothing) for undeclared fields; `field` may be a
    /// field name or a mapping key.
    pub fn set(&mut self, field: &str, raw: impl Into<Value>) -> bool {
        let Some(def) = self.schema.resolve(field) else {
            return false;
        };
        let name = def.name().to_owned();
        let cast = def.spec().typecast(raw.into());
        self.values.insert(name, cast);
        true
    }

    /// The field's current value; nil when unset.
    #[must_use]
    pub fn get(&self, field: &str) -> &Value {
        self.values.get(field).unwrap_or(&NULL)
    }

    /// Assigns every recognized key of a raw mapping. Undeclared keys are
    /// ignored; non-mapping input assigns nothing (validation then reports
    /// the missing required fields).
    pub fn assign(&mut self, raw: &Value) {
        if let Value::Map(entries) = raw {
            for (key, value) in entries {
                self.set(&key.to_string(), value.clone());
            }
        }
    }

    /// True when field-level validation produces no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        ModelInstance::validate(self).is_empty()
    }
}

impl ModelInstance for Record {
    fn schema_name(&self) -> &str {
        self.schema.name()
    }

    fn validate(&self) -> Errors {
        let mut errors = Errors::new();
        for def in self.schema.fields() {
            def.spec().validate(self.get(def.name()), &mut errors, def.name());
        }
        errors
    }

    fn to_data(&self) -> Value {
        let mut out = IndexMap::new();
        for def in self.schema.fields() {
            let data = def.spec().to_data(self.get(def.name()));
            if !data.is_null() {
                out.insert(Value::String(def.mapping_key().to_owned()), data);
            }
        }
        Value::Map(out)
    }
}
