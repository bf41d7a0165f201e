//! STRATUS Resource Provider
//!
//! The capability surface through which stacks declare primitive cloud
//! resources. Stacks only ever see this trait and the opaque handles it
//! returns; the in-memory [`PlanProvider`] records declarations for
//! synthesis and is the only implementation shipped here (real cloud
//! API calls are out of scope).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod handle;
pub mod iam;
pub mod provider;

pub use handle::{
    ClusterHandle, IdentityHandle, NetworkHandle, PolicyBearerHandle, RepositoryHandle,
    ResourceRef, ServiceHandle,
};
pub use iam::{Effect, PolicyStatement};
pub use provider::{ImageRef, NetworkSpec, PlanProvider, ResourceProvider, ServiceSpec};
