//! STRATUS Core Types
//!
//! This crate contains pure types and logic with no I/O beyond reading
//! process environment variables through an injectable lookup.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod env;
pub mod error;
pub mod id;

// Re-exports
pub use env::{Environment, ACCOUNT_VAR, REGION_VAR};
pub use error::{CoreError, CoreResult};
pub use id::{ResourceId, StackId};
