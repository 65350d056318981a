//! The optional-field envelope.
//!
//! API payloads distinguish three situations for an optional key: the key is
//! missing, the key is present with `null`, or the key carries a value.
//! `Option<T>` collapses the first two, so every optional model field is a
//! [`Maybe<T>`] instead:
//!
//! ```
//! use models::Maybe;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Example {
//!     #[serde(default, skip_serializing_if = "Maybe::is_unset")]
//!     summary: Maybe<String>,
//! }
//!
//! let absent: Example = serde_json::from_str("{}").unwrap();
//! let null: Example = serde_json::from_str(r#"{"summary":null}"#).unwrap();
//! assert_eq!(absent.summary, Maybe::Unset);
//! assert_eq!(null.summary, Maybe::Null);
//! assert_eq!(serde_json::to_string(&absent).unwrap(), "{}");
//! assert_eq!(serde_json::to_string(&null).unwrap(), r#"{"summary":null}"#);
//! ```
//!
//! The `default` + `skip_serializing_if` pair is mandatory on every field of
//! this type; without it an absent key is a decode error and `Unset` encodes
//! as `null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A model field that may be absent, explicitly `null`, or set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Maybe<T> {
    /// The key was not present in the payload; omitted on encode.
    Unset,
    /// The key was present with a `null` value.
    Null,
    /// The key was present with a value.
    ///
    /// `Set(serde_json::Value::Null)` is not a separate wire state: it
    /// encodes as `null` and decodes back as [`Maybe::Null`].
    Set(T),
}

impl<T> Maybe<T> {
    /// Returns `true` if the key was absent. Used as `skip_serializing_if`.
    pub fn is_unset(&self) -> bool {
        matches!(self, Maybe::Unset)
    }

    /// Returns `true` if the key was present with `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Maybe::Null)
    }

    /// Returns `true` if the key carried a value.
    pub fn is_set(&self) -> bool {
        matches!(self, Maybe::Set(_))
    }

    /// Borrows the contained value.
    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Maybe::Unset => Maybe::Unset,
            Maybe::Null => Maybe::Null,
            Maybe::Set(v) => Maybe::Set(v),
        }
    }

    /// Returns the value if set, collapsing `Unset` and `Null`.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Maybe::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the envelope, collapsing `Unset` and `Null` into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Maybe::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Lifts an observed `Option`: `None` becomes [`Maybe::Null`], since the
    /// key is known to be present.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Maybe::Set(v),
            None => Maybe::Null,
        }
    }

    /// Maps the contained value, preserving `Unset` and `Null`.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Maybe<U> {
        match self {
            Maybe::Unset => Maybe::Unset,
            Maybe::Null => Maybe::Null,
            Maybe::Set(v) => Maybe::Set(f(v)),
        }
    }
}

// Manual impl: the derive would require `T: Default`.
impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::Unset
    }
}

impl<T> From<T> for Maybe<T> {
    fn from(value: T) -> Self {
        Maybe::Set(value)
    }
}

impl<T: Serialize> Serialize for Maybe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Maybe::Set(v) => serializer.serialize_some(v),
            Maybe::Unset | Maybe::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Maybe<T> {
    /// Only reached when the key is present; absence goes through `Default`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Maybe::from_option)
    }
}
