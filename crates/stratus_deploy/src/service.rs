//! The service stack: cluster, image lookup, load-balanced service,
//! conditional image-pull grant, and the DNS name output.

use stratus_core::{CoreResult, Environment};
use stratus_graph::Stack;
use stratus_provider::{
    ImageRef, NetworkHandle, PolicyStatement, ResourceProvider, ServiceHandle, ServiceSpec,
};

/// Identifier of the pre-existing image repository; looked up, never
/// provisioned by this tool
pub const REPOSITORY_ARN: &str = "arn:aws:ecr:us-east-1:123456789012:repository/product-app";

/// Image tag the service runs
pub const IMAGE_TAG: &str = "latest";

/// Actions granted to the execution identity so it can pull the image
pub const IMAGE_PULL_ACTIONS: [&str; 3] = [
    "ecr:GetAuthorizationToken",
    "ecr:BatchCheckLayerAvailability",
    "ecr:GetDownloadUrlForLayer",
];

/// Output key carrying the load balancer DNS name
pub const OUTPUT_DNS_KEY: &str = "load_balancer_dns";

/// Stack declaring the containerized service and its cluster
///
/// Consumes the network stack's handle, which makes this stack depend
/// on the network stack.
#[derive(Debug)]
pub struct ServiceStack {
    stack: Stack,
    /// Handle to the declared service
    pub service: ServiceHandle,
}

impl ServiceStack {
    /// Construct the stack: cluster, repository lookup, service, grant,
    /// output, in that order
    ///
    /// # Errors
    ///
    /// Any provider error propagates unmodified and is fatal to the
    /// run. A missing policy-bearing execution identity is not an
    /// error: the grant is skipped with a warning.
    pub fn new(
        provider: &mut dyn ResourceProvider,
        id: &str,
        env: &Environment,
        network: &NetworkHandle,
    ) -> CoreResult<Self> {
        let mut stack = Stack::new(id, env.clone());

        let cluster = provider.create_cluster(&mut stack, "app-cluster", network)?;

        let repository =
            provider.lookup_image_repository(&mut stack, "app-repo", REPOSITORY_ARN)?;

        let spec = ServiceSpec::new(ImageRef::from_repository(&repository, IMAGE_TAG));
        let service = provider.create_load_balanced_service(&mut stack, "web", &cluster, &spec)?;

        match service.execution_identity().as_policy_bearer() {
            Some(role) => {
                let statement = PolicyStatement::allow(&IMAGE_PULL_ACTIONS, &["*"]);
                provider.attach_policy(&mut stack, role, statement)?;
            }
            None => {
                // Skipping is the contract; the warning is the only
                // visibility this failure mode gets.
                tracing::warn!(
                    service = "web",
                    "execution identity bears no mutable policy, skipping image pull grant"
                );
            }
        }

        stack.add_output(OUTPUT_DNS_KEY, service.load_balancer_dns())?;

        Ok(Self { stack, service })
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
