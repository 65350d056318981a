//! Trial decoding of tagged-union fields.
//!
//! Several model fields hold one of a closed set of object shapes without a
//! discriminator the schema can rely on (a flow module's `value`, an input
//! transform). The decoder tries each candidate shape **in declared order**
//! and keeps the first that decodes. Order is a priority: some shapes are
//! structurally compatible supersets of others, so reordering candidates
//! changes which variant wins on ambiguous input.
//!
//! Only structural/type mismatches (`serde_json` category [`Category::Data`])
//! move the decoder on to the next candidate. Any other failure aborts
//! immediately as [`UnionError::Candidate`].

use serde::de::{Error as _, Unexpected};
use serde_json::error::Category;
use serde_json::Value;
use thiserror::Error;

/// One candidate decoder for a union of `T`.
pub type Candidate<T> = fn(&Value) -> Result<T, serde_json::Error>;

/// Failure to decode a union value.
#[derive(Debug, Error)]
pub enum UnionError {
    /// Every candidate rejected the value as structurally incompatible.
    #[error("no variant of `{union}` matched ({attempted} variants attempted)")]
    NoMatch {
        /// Name of the union type being decoded.
        union: &'static str,
        /// Number of candidates tried.
        attempted: usize,
        /// Mismatch reported by the last candidate, if any was tried.
        #[source]
        last: Option<serde_json::Error>,
    },

    /// A candidate failed for a reason other than a shape mismatch.
    #[error("variant {index} of `{union}` failed")]
    Candidate {
        /// Name of the union type being decoded.
        union: &'static str,
        /// Zero-based position of the failing candidate.
        index: usize,
        /// The underlying failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Decodes `raw` with the first candidate that accepts it.
///
/// `union` names the union in error messages.
pub fn decode_first<T>(
    union: &'static str,
    raw: &Value,
    candidates: &[Candidate<T>],
) -> Result<T, UnionError> {
    let mut last = None;
    for (index, candidate) in candidates.iter().enumerate() {
        match candidate(raw) {
            Ok(value) => return Ok(value),
            Err(e) if e.classify() == Category::Data => {
                tracing::trace!(union, index, error = %e, "union variant rejected");
                last = Some(e);
            }
            Err(source) => {
                return Err(UnionError::Candidate {
                    union,
                    index,
                    source,
                })
            }
        }
    }
    Err(UnionError::NoMatch {
        union,
        attempted: candidates.len(),
        last,
    })
}

/// Returns `raw` if it is a JSON object, otherwise a type-mismatch error.
///
/// Struct deserialization in serde also accepts sequences; union candidates
/// are object-shaped, so arrays must be rejected before they reach a
/// candidate.
pub fn expect_object(raw: &Value) -> Result<&Value, serde_json::Error> {
    match raw {
        Value::Object(_) => Ok(raw),
        other => Err(serde_json::Error::invalid_type(
            unexpected(other),
            &"a JSON object",
        )),
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) => Unexpected::Float(f),
            None => Unexpected::Other("number"),
        },
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// Declares an enum over object-shaped models, decoded by trial in
/// declaration order.
///
/// Generates an untagged `Serialize` (each variant encodes as its inner
/// model) and a `Deserialize` routed through [`decode_first`].
///
/// ```ignore
/// tagged_union! {
///     /// Value of a flow module.
///     pub enum FlowModuleValue {
///         RawScript(RawScript),
///         Script(PathScript),
///     }
/// }
/// ```
#[macro_export]
macro_rules! tagged_union {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vattr:meta])*
                $variant:ident($ty:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $(
                $(#[$vattr])*
                $variant($ty),
            )+
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $( $name::$variant(inner) => ::serde::Serialize::serialize(inner, serializer), )+
                }
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                let candidates: &[$crate::union::Candidate<$name>] = &[
                    $(
                        |v| {
                            let object = $crate::union::expect_object(v)?;
                            <$ty as ::serde::Deserialize>::deserialize(object).map($name::$variant)
                        },
                    )+
                ];
                $crate::union::decode_first(stringify!($name), &raw, candidates)
                    .map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}
