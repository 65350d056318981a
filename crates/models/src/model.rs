//! Typed models and their bag of unrecognized keys.
//!
//! Every object model declares a fixed set of fields and captures whatever
//! else the server sent in an [`AdditionalProperties`] map, flattened into
//! the struct. Unknown keys therefore survive a decode/encode cycle, which
//! keeps the client forward compatible with newer servers.
//!
//! The bag is kept disjoint from the declared fields: decoding never places a
//! declared key in it, and the only mutating entry point,
//! [`Model::set_additional_property`], refuses declared names.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ModelError;

/// Unrecognized keys of a model, kept sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdditionalProperties(Map<String, Value>);

impl AdditionalProperties {
    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates over the captured keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Iterates over the captured entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of captured entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub(crate) fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }
}

/// An object model with declared fields plus an [`AdditionalProperties`] bag.
///
/// Implemented through [`impl_model!`](crate::impl_model).
pub trait Model: Serialize + DeserializeOwned {
    /// Wire names of the declared fields.
    const FIELDS: &'static [&'static str];

    /// The captured unrecognized keys.
    fn additional_properties(&self) -> &AdditionalProperties;

    /// Mutable access to the captured keys (removal only; see
    /// [`Model::set_additional_property`] for insertion).
    fn additional_properties_mut(&mut self) -> &mut AdditionalProperties;

    /// Stores an extra key, refusing names that belong to a declared field.
    fn set_additional_property(
        &mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Option<Value>, ModelError> {
        let key = key.into();
        if Self::FIELDS.contains(&key.as_str()) {
            return Err(ModelError::DeclaredField {
                model: std::any::type_name::<Self>(),
                key,
            });
        }
        Ok(self.additional_properties_mut().insert(key, value))
    }

    /// Keys of the captured unrecognized entries.
    fn additional_keys(&self) -> Vec<String> {
        self.additional_properties().keys().cloned().collect()
    }

    /// Decodes the model from an already-parsed JSON value.
    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Encodes the model, extra keys included.
    fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Implements [`Model`] for a struct whose bag field is named
/// `additional_properties`.
///
/// ```ignore
/// impl_model!(PathScript { "path", "type" });
/// ```
#[macro_export]
macro_rules! impl_model {
    ($name:ty { $($field:literal),* $(,)? }) => {
        impl $crate::Model for $name {
            const FIELDS: &'static [&'static str] = &[$($field),*];

            fn additional_properties(&self) -> &$crate::AdditionalProperties {
                &self.additional_properties
            }

            fn additional_properties_mut(&mut self) -> &mut $crate::AdditionalProperties {
                &mut self.additional_properties
            }
        }
    };
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers shared by the model test modules.

    use super::Model;
    use serde_json::Value;
    use std::collections::BTreeSet;

    /// Asserts that a fully-populated sample encodes exactly the declared
    /// fields and that it survives decode(encode(x)).
    pub(crate) fn assert_declared_fields<M>(sample: &M)
    where
        M: Model + PartialEq + std::fmt::Debug,
    {
        let encoded = sample.to_value().unwrap();
        let Value::Object(map) = &encoded else {
            panic!("{} did not encode as an object", std::any::type_name::<M>());
        };
        let encoded_keys: BTreeSet<&str> = map.keys().map(String::as_str).collect();
        let declared: BTreeSet<&str> = M::FIELDS.iter().copied().collect();
        assert_eq!(encoded_keys, declared, "{}", std::any::type_name::<M>());

        let decoded = M::from_value(encoded).unwrap();
        assert_eq!(&decoded, sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Maybe;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        name: String,
        #[serde(default, skip_serializing_if = "Maybe::is_unset")]
        size: Maybe<u32>,
        #[serde(flatten)]
        additional_properties: AdditionalProperties,
    }

    crate::impl_model!(Widget { "name", "size" });

    #[test]
    fn unknown_keys_are_captured_and_re_emitted() {
        let raw = json!({ "name": "w", "color": "red", "nested": { "a": [1, 2] } });
        let w = Widget::from_value(raw.clone()).unwrap();
        assert_eq!(w.additional_keys(), vec!["color", "nested"]);
        assert_eq!(w.additional_properties().get("color"), Some(&json!("red")));
        assert!(w.size.is_unset());
        assert_eq!(w.to_value().unwrap(), raw);
    }

    #[test]
    fn declared_keys_never_land_in_the_bag() {
        let w = Widget::from_value(json!({ "name": "w", "size": null })).unwrap();
        assert!(w.additional_properties().is_empty());
        assert_eq!(w.size, Maybe::Null);
    }

    #[test]
    fn declared_names_are_refused_as_extras() {
        let mut w = Widget::from_value(json!({ "name": "w" })).unwrap();
        let err = w.set_additional_property("size", json!(1)).unwrap_err();
        assert!(matches!(err, ModelError::DeclaredField { ref key, .. } if key == "size"));

        assert_eq!(w.set_additional_property("x", json!(1)).unwrap(), None);
        assert_eq!(
            w.set_additional_property("x", json!(2)).unwrap(),
            Some(json!(1))
        );
        assert_eq!(w.to_value().unwrap(), json!({ "name": "w", "x": 2 }));
        assert_eq!(w.additional_properties_mut().remove("x"), Some(json!(2)));
    }

    #[test]
    fn declared_field_list_matches_encoding() {
        testing::assert_declared_fields(&Widget {
            name: "w".into(),
            size: Maybe::Set(4),
            additional_properties: AdditionalProperties::default(),
        });
    }
}
