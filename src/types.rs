//! Type registry: the fixed set of named primitive types and their
//! coercion rules.
//!
//! Coercion is "reasonable over-the-wire" coercion: the string `"true"` is
//! reasonable for a declared `boolean`, a boolean is reasonable for a
//! declared `string`, a mapping is not. Each rule returns the canonical
//! value, or `None` when the input is not coercible — never an error:
//! typecasting is permissive, and the validation pass re-checks
//! coercibility and flags failures as `invalid`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::SchemaError;
use crate::core::value::{float_repr, Value};

/// A registered primitive type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    /// Any primitive scalar stringifies; composites are rejected.
    String,
    /// Textual or numeric integers; non-numeric text is rejected.
    Integer,
    /// Boolean true/false or the exact strings `"true"`/`"false"`.
    Boolean,
    /// An existing instant, or an ISO-8601-parseable string.
    Timestamp,
    /// Ordered sequence; mappings are rejected.
    Seq,
    /// Key/value mapping; everything else is rejected.
    Map,
}

impl Primitive {
    /// Every registered primitive, in registry order.
    pub const ALL: [Primitive; 6] = [
        Primitive::String,
        Primitive::Integer,
        Primitive::Boolean,
        Primitive::Timestamp,
        Primitive::Seq,
        Primitive::Map,
    ];

    /// The registered name of this tag.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Integer => "integer",
            Primitive::Boolean => "boolean",
            Primitive::Timestamp => "timestamp",
            Primitive::Seq => "seq",
            Primitive::Map => "map",
        }
    }

    /// Looks a tag up by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Primitive> {
        Primitive::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Membership test for the registry.
    #[must_use]
    pub fn recognized(name: &str) -> bool {
        Primitive::from_name(name).is_some()
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Primitive {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Primitive::from_name(s).ok_or_else(|| SchemaError::UnrecognizedType(s.to_owned()))
    }
}

/// Coerces `value` into the canonical form for `primitive`.
///
/// Returns `None` when the value is not reasonably coercible. `Null` input
/// coerces only under `seq` and `map` (where nil passes through as nil);
/// callers treat a `None` on non-nil input as the `invalid` condition.
#[must_use]
pub fn coerce(primitive: Primitive, value: &Value) -> Option<Value> {
    match primitive {
        Primitive::String => coerce_string(value),
        Primitive::Integer => coerce_integer(value),
        Primitive::Boolean => coerce_boolean(value),
        Primitive::Timestamp => coerce_timestamp(value),
        Primitive::Seq => coerce_seq(value),
        Primitive::Map => coerce_map(value),
    }
}

fn coerce_string(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => Some(Value::String(s.clone())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        Value::Int(i) => Some(Value::String(i.to_string())),
        Value::Float(f) => Some(Value::String(float_repr(*f))),
        _ => None,
    }
}

fn coerce_integer(value: &Value) -> Option<Value> {
    match value {
        Value::Int(i) => Some(Value::Int(*i)),
        Value::Float(f) if f.is_finite() => Some(Value::Int(f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok().map(Value::Int),
        _ => None,
    }
}

fn coerce_boolean(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(b) => Some(Value::Bool(*b)),
        Value::String(s) if s == "true" => Some(Value::Bool(true)),
        Value::String(s) if s == "false" => Some(Value::Bool(false)),
        _ => None,
    }
}

fn coerce_timestamp(value: &Value) -> Option<Value> {
    match value {
        Value::Timestamp(t) => Some(Value::Timestamp(*t)),
        Value::String(s) => parse_timestamp(s).map(Value::Timestamp),
        _ => None,
    }
}

fn coerce_seq(value: &Value) -> Option<Value> {
    match value {
        Value::Null => Some(Value::Null),
        Value::Seq(items) => Some(Value::Seq(items.clone())),
        _ => None,
    }
}

fn coerce_map(value: &Value) -> Option<Value> {
    match value {
        Value::Null => Some(Value::Null),
        Value::Map(entries) => Some(Value::Map(entries.clone())),
        _ => None,
    }
}

/// Parses an ISO-8601-style timestamp: RFC 3339, then an offset-less
/// date-time (assumed UTC), then a bare date (midnight UTC).
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
