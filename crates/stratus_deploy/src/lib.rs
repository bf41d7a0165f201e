//! STRATUS Deployment Topology
//!
//! The concrete stacks this tool deploys: a private network stack and a
//! load-balanced containerized service stack that consumes it, wired
//! together by the orchestrator and synthesized into a plan.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod network;
pub mod orchestrator;
pub mod service;

pub use network::NetworkStack;
pub use orchestrator::{run, run_from, synthesize};
pub use service::ServiceStack;
