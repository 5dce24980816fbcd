//! The validator abstraction and the built-in validator set.
//!
//! A [`Validator`] is a named, pure predicate from a value to a list of
//! [`ErrorKind`] messages (empty list = valid). Validators come from two
//! construction paths: a name registered in the built-in table, or a
//! caller-supplied object implementing [`ValidateValue`]. Anything else is
//! a fatal schema-configuration error, raised at build time.
//!
//! The type-check builtins (`string`, `integer`, `timestamp`) run only on
//! non-nil values: absence is never double-reported by a type check —
//! flagging it is `required`'s exclusive job.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::core::error::SchemaError;
use crate::core::errors::ErrorKind;
use crate::core::value::Value;
use crate::types::{coerce, Primitive};

/// Capability contract for externally supplied validators.
///
/// # Examples
///
/// ```rust
/// use typed_schema::{ErrorKind, ValidateValue, Value};
///
/// struct Lowercase;
///
/// impl ValidateValue for Lowercase {
///     fn name(&self) -> &str {
///         "lowercase"
///     }
///
///     fn validate(&self, value: &Value) -> Vec<ErrorKind> {
///         match value.as_str() {
///             Some(s) if s.chars().any(char::is_uppercase) => {
///                 vec![ErrorKind::custom("must be lowercase")]
///             }
///             _ => Vec::new(),
///         }
///     }
/// }
/// ```
pub trait ValidateValue: Send + Sync {
    /// The validator's name, used in diagnostics.
    fn name(&self) -> &str;

    /// Checks `value`, returning zero or more messages. Must be pure.
    fn validate(&self, value: &Value) -> Vec<ErrorKind>;
}

/// A built-in validator, looked up by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Fails with `required` on nil, blank strings, and empty collections.
    Required,
    /// Alias of [`Builtin::Required`].
    NotBlank,
    /// Fails with `required_not_nil` only on exact nil.
    NotNil,
    /// Fails with `invalid` when a non-nil value does not coerce to `string`.
    IsString,
    /// Fails with `invalid` when a non-nil value does not coerce to `integer`.
    IsInteger,
    /// Fails with `invalid` when a non-nil value does not coerce to `timestamp`.
    IsTimestamp,
}

impl Builtin {
    /// The registered name of this validator.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Required => "required",
            Builtin::NotBlank => "not_blank",
            Builtin::NotNil => "not_nil",
            Builtin::IsString => "string",
            Builtin::IsInteger => "integer",
            Builtin::IsTimestamp => "timestamp",
        }
    }

    /// Looks a built-in up by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Builtin> {
        match name {
            "required" => Some(Builtin::Required),
            "not_blank" => Some(Builtin::NotBlank),
            "not_nil" => Some(Builtin::NotNil),
            "string" => Some(Builtin::IsString),
            "integer" => Some(Builtin::IsInteger),
            "timestamp" => Some(Builtin::IsTimestamp),
            _ => None,
        }
    }

    /// Membership test for the built-in table.
    #[must_use]
    pub fn recognized(name: &str) -> bool {
        Builtin::from_name(name).is_some()
    }

    fn check(self, value: &Value) -> Option<ErrorKind> {
        match self {
            Builtin::Required | Builtin::NotBlank => {
                is_blank(value).then_some(ErrorKind::Required)
            }
            Builtin::NotNil => value.is_null().then_some(ErrorKind::RequiredNotNil),
            Builtin::IsString => type_check(Primitive::String, value),
            Builtin::IsInteger => type_check(Primitive::Integer, value),
            Builtin::IsTimestamp => type_check(Primitive::Timestamp, value),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Seq(items) => items.is_empty(),
        Value::Map(entries) => entries.is_empty(),
        _ => false,
    }
}

fn type_check(primitive: Primitive, value: &Value) -> Option<ErrorKind> {
    if value.is_null() {
        return None;
    }
    coerce(primitive, value).is_none().then_some(ErrorKind::Invalid)
}

/// A reference to a validator in an unbuilt specification: either a name
/// to look up in the built-in table, or a capability object.
#[derive(Clone)]
pub enum ValidatorRef {
    /// A registered validator name.
    Name(Cow<'static, str>),
    /// An externally supplied validator.
    Custom(Arc<dyn ValidateValue>),
}

impl ValidatorRef {
    /// Wraps a caller-supplied validator object.
    pub fn custom(validator: impl ValidateValue + 'static) -> Self {
        ValidatorRef::Custom(Arc::new(validator))
    }
}

impl From<&'static str> for ValidatorRef {
    fn from(name: &'static str) -> Self {
        ValidatorRef::Name(Cow::Borrowed(name))
    }
}

impl From<String> for ValidatorRef {
    fn from(name: String) -> Self {
        ValidatorRef::Name(Cow::Owned(name))
    }
}

impl From<Arc<dyn ValidateValue>> for ValidatorRef {
    fn from(validator: Arc<dyn ValidateValue>) -> Self {
        ValidatorRef::Custom(validator)
    }
}

impl fmt::Debug for ValidatorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorRef::Name(name) => write!(f, "Name({name:?})"),
            ValidatorRef::Custom(v) => write!(f, "Custom({})", v.name()),
        }
    }
}

#[derive(Clone)]
enum Source {
    Builtin(Builtin),
    Custom(Arc<dyn ValidateValue>),
}

/// An immutable `(name, predicate)` pair attached to a
/// [`TypeDef`](crate::schema::TypeDef).
#[derive(Clone)]
pub struct Validator {
    name: Cow<'static, str>,
    source: Source,
}

impl Validator {
    /// Resolves a [`ValidatorRef`] into a runnable validator.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnrecognizedValidation`] when the name matches no
    /// registered built-in — a schema-configuration mistake, reported at
    /// build time rather than deferred into validation.
    pub fn build(reference: ValidatorRef) -> Result<Validator, SchemaError> {
        match reference {
            ValidatorRef::Name(name) => {
                let builtin = Builtin::from_name(&name)
                    .ok_or_else(|| SchemaError::UnrecognizedValidation(name.to_string()))?;
                Ok(Validator {
                    name,
                    source: Source::Builtin(builtin),
                })
            }
            ValidatorRef::Custom(validator) => Ok(Validator {
                name: Cow::Owned(validator.name().to_owned()),
                source: Source::Custom(validator),
            }),
        }
    }

    /// The validator's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the predicate against `value`.
    #[must_use]
    pub fn run(&self, value: &Value) -> SmallVec<[ErrorKind; 1]> {
        match &self.source {
            Source::Builtin(builtin) => builtin.check(value).into_iter().collect(),
            Source::Custom(validator) => validator.validate(value).into(),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({})", self.name)
    }
}
