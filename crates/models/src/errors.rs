//! Error types for the model layer.
//!
//! Decoding failures are reported through `serde_json::Error` (with
//! [`crate::UnionError`] as the message source for unions that matched no
//! variant). [`ModelError`] covers misuse of the model API and empty
//! identifiers.

use thiserror::Error;

/// Errors raised by the model API and by identifier validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// An extra key was given the name of a declared field.
    ///
    /// Extra keys must stay disjoint from declared fields; otherwise the
    /// encoded object would carry the key twice.
    #[error("'{key}' is a declared field of {model} and cannot be stored as an additional property")]
    DeclaredField {
        /// Rust type name of the model.
        model: &'static str,
        /// The refused key.
        key: String,
    },

    /// An identifier was decoded from an empty string.
    #[error("{kind} must not be empty")]
    EmptyIdentifier { kind: &'static str },
}
