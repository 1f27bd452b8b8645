//! Named field access for searchable records.
//!
//! Records expose their searchable attributes through [`Searchable::field`]
//! instead of runtime reflection. A field is either a single string, a list
//! of strings, or something the filter cannot search.

use serde_json::Value;

/// The value of a named field, as seen by the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A single string.
    Text(&'a str),
    /// A sequence of strings; matches if any element matches.
    List(Vec<&'a str>),
    /// Present but neither a string nor a string sequence. Never matches.
    Unsupported,
}

impl<'a> FieldValue<'a> {
    /// Build a list value from owned strings.
    pub fn list<S: AsRef<str>>(values: &'a [S]) -> Self {
        Self::List(values.iter().map(AsRef::as_ref).collect())
    }

    /// Whether this value contains `term`, compared case-insensitively.
    ///
    /// `term` must already be lowercased.
    pub fn contains_folded(&self, term: &str) -> bool {
        match self {
            Self::Text(text) => text.to_lowercase().contains(term),
            Self::List(values) => values.iter().any(|v| v.to_lowercase().contains(term)),
            Self::Unsupported => false,
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl<'a> From<&'a Vec<String>> for FieldValue<'a> {
    fn from(values: &'a Vec<String>) -> Self {
        Self::list(values)
    }
}

/// A record whose fields can be searched by name.
///
/// Return `None` for fields the record does not have; the filter treats
/// missing and [`FieldValue::Unsupported`] fields the same way.
///
/// # Example
///
/// ```
/// use sift_filter::{FieldValue, Searchable};
///
/// struct Procedure {
///     name: String,
///     aliases: Vec<String>,
///     duration_hours: u8,
/// }
///
/// impl Searchable for Procedure {
///     fn field(&self, name: &str) -> Option<FieldValue<'_>> {
///         match name {
///             "name" => Some((&self.name).into()),
///             "aliases" => Some((&self.aliases).into()),
///             "duration_hours" => Some(FieldValue::Unsupported),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Searchable {
    /// Look up the value of the field called `name`.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

/// JSON objects are searchable by key. Arrays contribute their string
/// elements; other element types are skipped.
impl Searchable for Value {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = self.as_object()?.get(name)?;
        Some(match value {
            Value::String(s) => FieldValue::Text(s),
            Value::Array(values) => FieldValue::List(values.iter().filter_map(Value::as_str).collect()),
            _ => FieldValue::Unsupported,
        })
    }
}
