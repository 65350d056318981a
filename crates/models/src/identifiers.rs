//! Newtype identifiers for addressable Windmill objects.
//!
//! Every object the API addresses by name is represented as a distinct newtype
//! wrapping a `String`. This prevents accidentally passing, for example, a
//! [`JobId`] where a [`WorkspaceId`] is expected, even though both travel as
//! plain path segments on the wire.
//!
//! Identifiers travel as bare strings, so they can be used directly as model
//! fields. Decoding applies the same non-empty check as `new`.

use serde::{Deserialize, Serialize};

use crate::ModelError;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), AsRef<str>, Display,
// and a TryFrom<String> that deserialization goes through.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl TryFrom<String> for $name {
            type Error = ModelError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(ModelError::EmptyIdentifier {
                    kind: stringify!($name),
                })
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Identifies a workspace (the `{workspace}` segment of `/w/{workspace}/...`).
    WorkspaceId
}

string_id! {
    /// Identifies a queued or completed job.
    ///
    /// The server issues UUIDs, but the identifier is kept opaque here.
    JobId
}

string_id! {
    /// Path of a workspace item: script, flow, schedule, resource or variable.
    ///
    /// Paths are slash-separated (`u/admin/my_flow`, `f/folder/item`) and are
    /// expanded into several URL segments when bound into an endpoint.
    ItemPath
}

string_id! {
    /// Hex hash identifying one immutable version of a script.
    ScriptHash
}

string_id! {
    /// Name of an OAuth client configured on the instance (e.g. `"github"`).
    ClientName
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifiers_are_rejected() {
        assert!(WorkspaceId::new("").is_none());
        assert!(JobId::new(String::new()).is_none());
        assert_eq!(ItemPath::new("u/admin/f").unwrap().as_str(), "u/admin/f");
    }

    #[test]
    fn identifiers_travel_as_bare_strings() {
        let id = JobId::new("01HXYZ").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"01HXYZ\"");
        let back: JobId = serde_json::from_str("\"01HXYZ\"").unwrap();
        assert_eq!(back, id);
        assert_eq!(id.to_string(), "01HXYZ");
    }

    #[test]
    fn empty_string_fails_to_decode() {
        let err = serde_json::from_str::<WorkspaceId>("\"\"").unwrap_err();
        assert!(err.to_string().contains("WorkspaceId must not be empty"));
        assert_eq!(
            ItemPath::try_from(String::new()),
            Err(ModelError::EmptyIdentifier { kind: "ItemPath" })
        );
    }
}
