//! Domain types for the Windmill API client.
//!
//! This crate holds every payload the client sends or receives, the typed
//! identifiers used in endpoint paths, and the two pieces of decoding logic
//! shared by all models: the optional-field envelope ([`Maybe`]) and the
//! tagged-union decoder ([`union`]). It performs no I/O.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`maybe`] | Absent / `null` / set tri-state for optional fields |
//! | [`union`] | First-match decoding of untagged unions |
//! | [`model`] | `Model` trait and the additional-properties bag |
//! | [`identifiers`] | Newtype identifiers (`WorkspaceId`, `JobId`, ...) |
//! | [`types`] | Shared value types (`Timestamp`, `Pagination`, ...) |
//! | [`flow`], [`job`], [`script`], [`schedule`], [`resource`], [`variable`], [`oauth`], [`audit`] | Typed payloads per API area |

pub mod errors;
pub mod identifiers;
pub mod maybe;
pub mod model;
pub mod types;
pub mod union;

pub mod audit;
pub mod flow;
pub mod job;
pub mod oauth;
pub mod resource;
pub mod schedule;
pub mod script;
pub mod variable;

// Re-export the building blocks at the crate root; payload types stay in
// their area modules.
pub use errors::ModelError;
pub use identifiers::{ClientName, ItemPath, JobId, ScriptHash, WorkspaceId};
pub use maybe::Maybe;
pub use model::{AdditionalProperties, Model};
pub use types::{Args, ExtraPerms, Pagination, Timestamp};
pub use union::UnionError;
