//! The network stack: one private network with a fixed topology.

use stratus_core::{CoreResult, Environment};
use stratus_graph::Stack;
use stratus_provider::{NetworkHandle, NetworkSpec, ResourceProvider};

/// Availability zones spanned by the private network
pub const NETWORK_MAX_AZS: u32 = 2;

/// NAT gateways in the private network
pub const NETWORK_NAT_GATEWAYS: u32 = 1;

/// Stack declaring the deployment's private network
///
/// No conditional logic and no outputs; the network handle is the
/// stack's only export, consumed by the service stack.
#[derive(Debug)]
pub struct NetworkStack {
    stack: Stack,
    /// Handle to the declared private network
    pub network: NetworkHandle,
}

impl NetworkStack {
    /// Construct the stack and declare its network
    ///
    /// # Errors
    ///
    /// Any provider error propagates unmodified and is fatal to the
    /// run.
    pub fn new(
        provider: &mut dyn ResourceProvider,
        id: &str,
        env: &Environment,
    ) -> CoreResult<Self> {
        let mut stack = Stack::new(id, env.clone());
        let network = provider.create_network(
            &mut stack,
            "app-vpc",
            &NetworkSpec {
                max_azs: NETWORK_MAX_AZS,
                nat_gateways: NETWORK_NAT_GATEWAYS,
            },
        )?;
        Ok(Self { stack, network })
    }

    /// The underlying declaration unit
    #[must_use]
    pub const fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Hand the completed declaration unit to the app
    #[must_use]
    pub fn into_stack(self) -> Stack {
        self.stack
    }
}
