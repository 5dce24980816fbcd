//! Path-keyed, multi-valued error sink.
//!
//! Every validation path writes into an [`Errors`] sink. Entries are keyed
//! by a `/`-joined path string (e.g. `alternate_addresses/1/street`) and
//! hold the ordered list of messages reported at that path. Insertion order
//! is preserved both across paths and within a path — consumers assert on
//! literal ordered equality.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use smallvec::SmallVec;

/// A single validation message.
///
/// The built-in kinds cover the core's own checks; custom validators may
/// emit arbitrary messages via [`ErrorKind::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Value is present but fails type/shape coercion.
    Invalid,
    /// Value is absent or blank where required.
    Required,
    /// Value is strictly nil where required.
    RequiredNotNil,
    /// Caller-defined message from a custom validator.
    Custom(Cow<'static, str>),
}

impl ErrorKind {
    /// Creates a custom message.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        ErrorKind::Custom(message.into())
    }

    /// The wire code for this message.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            ErrorKind::Invalid => "invalid",
            ErrorKind::Required => "required",
            ErrorKind::RequiredNotNil => "required_not_nil",
            ErrorKind::Custom(message) => message,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<&'static str> for ErrorKind {
    fn from(message: &'static str) -> Self {
        ErrorKind::Custom(Cow::Borrowed(message))
    }
}

impl From<String> for ErrorKind {
    fn from(message: String) -> Self {
        ErrorKind::Custom(Cow::Owned(message))
    }
}

type MessageList = SmallVec<[ErrorKind; 2]>;

/// Insertion-ordered mapping from error path to its accumulated messages.
///
/// # Examples
///
/// ```rust
/// use typed_schema::{ErrorKind, Errors};
///
/// let mut errors = Errors::new();
/// errors.add("name", ErrorKind::Required);
/// errors.add("name", ErrorKind::Invalid);
///
/// assert!(!errors.is_empty());
/// assert_eq!(errors.get("name"), &[ErrorKind::Required, ErrorKind::Invalid]);
/// // Never-populated paths yield an empty slice, not an absence.
/// assert_eq!(errors.get("age"), &[]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    entries: IndexMap<String, MessageList>,
}

impl Errors {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message at `path`. Never deduplicates, never reorders.
    pub fn add(&mut self, path: impl Into<String>, kind: ErrorKind) {
        self.entries.entry(path.into()).or_default().push(kind);
    }

    /// Merges another sink into this one, re-keying every entry as
    /// `"{prefix}/{path}"` and preserving `other`'s iteration order.
    pub fn merge(&mut self, other: &Errors, prefix: &str) {
        for (path, kind) in other.iter() {
            self.add(format!("{prefix}/{path}"), kind.clone());
        }
    }

    /// True when no message has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded messages across all paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(SmallVec::len).sum()
    }

    /// The messages recorded at `path`, in insertion order.
    ///
    /// Returns an empty slice for paths with no errors, so callers can
    /// assert on a never-populated path without an existence check.
    #[must_use]
    pub fn get(&self, path: &str) -> &[ErrorKind] {
        self.entries.get(path).map_or(&[], SmallVec::as_slice)
    }

    /// Iterates over `(path, message)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorKind)> {
        self.entries
            .iter()
            .flat_map(|(path, kinds)| kinds.iter().map(move |k| (path.as_str(), k)))
    }

    /// Iterates over the recorded paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Projects the sink into a JSON object (`path -> [message codes]`),
    /// preserving insertion order, for host-side surfacing.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for (path, kinds) in &self.entries {
            let messages = kinds
                .iter()
                .map(|k| serde_json::Value::String(k.code().to_owned()))
                .collect();
            object.insert(path.clone(), serde_json::Value::Array(messages));
        }
        serde_json::Value::Object(object)
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (path, kind) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{path}: {kind}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_preserves_insertion_order_within_a_path() {
        let mut errors = Errors::new();
        errors.add("foo", ErrorKind::Required);
        errors.add("foo", ErrorKind::Invalid);
        errors.add("foo", ErrorKind::Required);
        assert_eq!(
            errors.get("foo"),
            &[ErrorKind::Required, ErrorKind::Invalid, ErrorKind::Required]
        );
    }

    #[test]
    fn iter_preserves_insertion_order_across_paths() {
        let mut errors = Errors::new();
        errors.add("b", ErrorKind::Invalid);
        errors.add("a", ErrorKind::Required);
        errors.add("b", ErrorKind::Required);
        let flat: Vec<_> = errors.iter().map(|(p, k)| (p.to_owned(), k.clone())).collect();
        assert_eq!(
            flat,
            vec![
                ("b".to_owned(), ErrorKind::Invalid),
                ("b".to_owned(), ErrorKind::Required),
                ("a".to_owned(), ErrorKind::Required),
            ]
        );
    }

    #[test]
    fn merge_prefixes_every_path() {
        let mut nested = Errors::new();
        nested.add("street", ErrorKind::Required);
        nested.add("zip", ErrorKind::Invalid);

        let mut errors = Errors::new();
        errors.merge(&nested, "address");
        assert_eq!(errors.get("address/street"), &[ErrorKind::Required]);
        assert_eq!(errors.get("address/zip"), &[ErrorKind::Invalid]);
    }

    #[test]
    fn get_on_unknown_path_is_empty_not_absent() {
        let errors = Errors::new();
        assert_eq!(errors.get("never"), &[]);
        assert!(errors.is_empty());
    }

    #[test]
    fn to_json_uses_wire_codes() {
        let mut errors = Errors::new();
        errors.add("name", ErrorKind::Required);
        errors.add("age", ErrorKind::custom("too young"));
        assert_eq!(
            errors.to_json(),
            serde_json::json!({"name": ["required"], "age": ["too young"]})
        );
    }
}
