//! STRATUS Stack Graph
//!
//! The composition model: stacks declare resource intents as pure data,
//! cross-stack references form a dependency graph between stacks, and
//! synthesis compiles the graph into a deployable plan exactly once.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod plan;
pub mod stack;

pub use app::App;
pub use plan::{Plan, PlanOutput, PlanResource, PlanStack};
pub use stack::{Resource, ResourceKind, Stack};
