//! Endpoint modules, one per API operation, grouped by area.
//!
//! Every operation module exposes the same five functions:
//!
//! | Function | Form | Returns |
//! |----------|------|---------|
//! | `request(..)` | build only | `Endpoint<T>` |
//! | `detailed(client, ..)` | async | `Response<T>` |
//! | `parsed(client, ..)` | async | `Option<T>` |
//! | `blocking_detailed(client, ..)` | blocking | `Response<T>` |
//! | `blocking(client, ..)` | blocking | `Option<T>` |
//!
//! ```no_run
//! # async fn demo(client: &client::Client) -> Result<(), client::ClientError> {
//! use client::api::job::get_completed_job;
//! use models::{JobId, WorkspaceId};
//!
//! let ws = WorkspaceId::new("demo").unwrap();
//! let id = JobId::new("01HXYZ").unwrap();
//! if let Some(job) = get_completed_job::parsed(client, &ws, &id).await? {
//!     println!("{} succeeded: {}", job.id, job.success);
//! }
//! # Ok(())
//! # }
//! ```

/// Declares one operation module.
///
/// The block builds the [`Endpoint`](crate::Endpoint); the call forms are
/// generated around it.
macro_rules! endpoint {
    (
        $(#[$doc:meta])*
        $name:ident -> $out:ty,
        ($($arg:ident : $ty:ty),* $(,)?)
        $build:block
    ) => {
        $(#[$doc])*
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;

            /// Builds the endpoint descriptor without sending it.
            pub fn request($($arg: $ty),*) -> Result<$crate::Endpoint<$out>, $crate::ClientError> $build

            pub async fn detailed(
                client: &$crate::Client,
                $($arg: $ty),*
            ) -> Result<$crate::Response<$out>, $crate::ClientError> {
                client.execute(request($($arg),*)?).await
            }

            pub async fn parsed(
                client: &$crate::Client,
                $($arg: $ty),*
            ) -> Result<Option<$out>, $crate::ClientError> {
                detailed(client, $($arg),*).await?.into_parsed()
            }

            pub fn blocking_detailed(
                client: &$crate::Client,
                $($arg: $ty),*
            ) -> Result<$crate::Response<$out>, $crate::ClientError> {
                client.execute_blocking(request($($arg),*)?)
            }

            pub fn blocking(
                client: &$crate::Client,
                $($arg: $ty),*
            ) -> Result<Option<$out>, $crate::ClientError> {
                blocking_detailed(client, $($arg),*)?.into_parsed()
            }
        }
    };
}

pub mod audit;
pub mod flow;
pub mod job;
pub mod oauth;
pub mod resource;
pub mod schedule;
pub mod script;
pub mod variable;
