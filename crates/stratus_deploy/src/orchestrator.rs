//! The orchestrator: resolves the environment once, constructs stacks
//! in dependency order, and synthesizes the plan exactly once.

use stratus_core::{CoreResult, Environment};
use stratus_graph::{App, Plan};
use stratus_provider::ResourceProvider;

use crate::network::NetworkStack;
use crate::service::ServiceStack;

/// Resolve the environment from the process and synthesize
///
/// # Errors
///
/// Returns a configuration error before any provider call if the
/// region is unset, or any fatal construction/synthesis error.
pub fn run(provider: &mut dyn ResourceProvider) -> CoreResult<Plan> {
    run_from(provider, |key| std::env::var(key).ok())
}

/// Resolve the environment from an injectable lookup and synthesize
///
/// # Errors
///
/// Same as [`run`].
pub fn run_from<F>(provider: &mut dyn ResourceProvider, lookup: F) -> CoreResult<Plan>
where
    F: Fn(&str) -> Option<String>,
{
    let env = Environment::resolve_from(lookup)?;
    synthesize(provider, &env)
}

/// Construct both stacks against one environment and synthesize
///
/// The same `Environment` value is shared by both stacks, so one run
/// can never straddle two regions. The network stack is constructed
/// first; the service stack consumes its network handle.
///
/// # Errors
///
/// Any stack construction or synthesis error is fatal and propagates.
pub fn synthesize(provider: &mut dyn ResourceProvider, env: &Environment) -> CoreResult<Plan> {
    tracing::info!(environment = %env, "synthesizing deployment");

    let network = NetworkStack::new(provider, "network", env)?;
    let service = ServiceStack::new(provider, "service", env, &network.network)?;

    let mut app = App::new();
    app.add_stack(network.into_stack())?;
    app.add_stack(service.into_stack())?;

    let plan = app.synth()?;
    tracing::info!(
        stacks = plan.stacks.len(),
        outputs = plan.outputs.len(),
        "synthesis complete"
    );
    Ok(plan)
}
