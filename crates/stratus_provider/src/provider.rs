//! The provider trait and the plan-recording implementation.
//!
//! `ResourceProvider` is the seam between stack components and whatever
//! actually provisions resources. `PlanProvider` is the deterministic
//! implementation used for synthesis: declaring a resource records its
//! intent on the stack and resolves attributes (identifiers, DNS names)
//! without side effects.

use serde::{Deserialize, Serialize};
use serde_json::json;
use stratus_core::{CoreResult, ResourceId};
use stratus_graph::{ResourceKind, Stack};

use crate::handle::{
    ClusterHandle, IdentityHandle, NetworkHandle, PolicyBearerHandle, RepositoryHandle,
    ResourceRef, ServiceHandle,
};
use crate::iam::PolicyStatement;

/// Topology of a private network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Number of availability zones
    pub max_azs: u32,
    /// Number of NAT gateways
    pub nat_gateways: u32,
}

/// Container image pulled from a looked-up repository at a fixed tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Repository identifier
    pub repository_arn: String,
    /// Image tag
    pub tag: String,
}

impl ImageRef {
    /// Reference an image in a looked-up repository
    #[must_use]
    pub fn from_repository(repository: &RepositoryHandle, tag: &str) -> Self {
        Self {
            repository_arn: repository.arn().to_string(),
            tag: tag.to_string(),
        }
    }
}

/// Shape of a load-balanced containerized service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// Image to run
    pub image: ImageRef,
    /// Desired instance count
    pub desired_count: u32,
    /// Public listener port on the load balancer
    pub listener_port: u16,
    /// Port the container listens on
    pub container_port: u16,
    /// Whether the load balancer is internet-facing
    pub public_load_balancer: bool,
}

impl ServiceSpec {
    /// Create a spec with the given image and default shape: one
    /// instance, ports 80/80, public load balancer
    #[must_use]
    pub fn new(image: ImageRef) -> Self {
        Self {
            image,
            desired_count: 1,
            listener_port: 80,
            container_port: 80,
            public_load_balancer: true,
        }
    }

    /// Set the desired instance count
    #[must_use]
    pub fn with_desired_count(mut self, count: u32) -> Self {
        self.desired_count = count;
        self
    }

    /// Set listener and container ports
    #[must_use]
    pub fn with_ports(mut self, listener: u16, container: u16) -> Self {
        self.listener_port = listener;
        self.container_port = container;
        self
    }

    /// Set whether the load balancer is internet-facing
    #[must_use]
    pub fn with_public_load_balancer(mut self, public: bool) -> Self {
        self.public_load_balancer = public;
        self
    }
}

/// Capability surface for declaring primitive cloud resources
///
/// Every method takes the declaring stack; consuming a handle owned by
/// another stack records a cross-stack reference on the declaring
/// stack. Errors are fatal to the run and propagate unmodified.
pub trait ResourceProvider {
    /// Declare a private network with the given topology
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration fails.
    fn create_network(
        &mut self,
        stack: &mut Stack,
        name: &str,
        spec: &NetworkSpec,
    ) -> CoreResult<NetworkHandle>;

    /// Declare a container cluster bound to a network
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration fails.
    fn create_cluster(
        &mut self,
        stack: &mut Stack,
        name: &str,
        network: &NetworkHandle,
    ) -> CoreResult<ClusterHandle>;

    /// Resolve a pre-existing image repository by identifier
    ///
    /// The repository is looked up, never provisioned.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup cannot be declared.
    fn lookup_image_repository(
        &mut self,
        stack: &mut Stack,
        name: &str,
        arn: &str,
    ) -> CoreResult<RepositoryHandle>;

    /// Declare a load-balanced containerized service on a cluster
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration fails.
    fn create_load_balanced_service(
        &mut self,
        stack: &mut Stack,
        name: &str,
        cluster: &ClusterHandle,
        spec: &ServiceSpec,
    ) -> CoreResult<ServiceHandle>;

    /// Attach a permission statement to a policy-bearing identity
    ///
    /// # Errors
    ///
    /// Returns an error if the attachment cannot be declared.
    fn attach_policy(
        &mut self,
        stack: &mut Stack,
        identity: &PolicyBearerHandle,
        statement: PolicyStatement,
    ) -> CoreResult<()>;
}

/// Deterministic in-memory provider used for plan synthesis
///
/// Records every declaration on the owning stack and resolves
/// attributes from the stack's environment and the derived resource
/// identifiers, so synthesizing the same topology twice yields the
/// same plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanProvider;

impl PlanProvider {
    /// Create a plan provider
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn rref(stack: &Stack, id: ResourceId, name: &str) -> ResourceRef {
        ResourceRef::new(stack.id(), id, name)
    }
}

impl ResourceProvider for PlanProvider {
    fn create_network(
        &mut self,
        stack: &mut Stack,
        name: &str,
        spec: &NetworkSpec,
    ) -> CoreResult<NetworkHandle> {
        let id = stack.declare(
            ResourceKind::PrivateNetwork,
            name,
            serde_json::to_value(spec)?,
        )?;
        Ok(NetworkHandle::new(Self::rref(stack, id, name)))
    }

    fn create_cluster(
        &mut self,
        stack: &mut Stack,
        name: &str,
        network: &NetworkHandle,
    ) -> CoreResult<ClusterHandle> {
        stack.record_reference(network.stack_id());
        let id = stack.declare(
            ResourceKind::ContainerCluster,
            name,
            json!({ "network": network.resource_id() }),
        )?;
        Ok(ClusterHandle::new(Self::rref(stack, id, name)))
    }

    fn lookup_image_repository(
        &mut self,
        stack: &mut Stack,
        name: &str,
        arn: &str,
    ) -> CoreResult<RepositoryHandle> {
        let id = stack.declare(
            ResourceKind::ImageRepositoryLookup,
            name,
            json!({ "arn": arn }),
        )?;
        Ok(RepositoryHandle::new(Self::rref(stack, id, name), arn))
    }

    fn create_load_balanced_service(
        &mut self,
        stack: &mut Stack,
        name: &str,
        cluster: &ClusterHandle,
        spec: &ServiceSpec,
    ) -> CoreResult<ServiceHandle> {
        stack.record_reference(cluster.stack_id());
        let id = stack.declare(
            ResourceKind::LoadBalancedService,
            name,
            json!({
                "cluster": cluster.resource_id(),
                "spec": serde_json::to_value(spec)?,
            }),
        )?;

        let dns = format!(
            "{}-{}.{}.elb.amazonaws.com",
            name,
            id.short(),
            stack.env().region
        );

        // The execution identity is generated alongside the service and
        // owned by this deployment, so its policy is mutable.
        let role_name = format!("{}-execution-role", name);
        let role_id = ResourceId::from_name(stack.id(), &role_name);
        let identity = IdentityHandle::PolicyBearer(PolicyBearerHandle::new(ResourceRef::new(
            stack.id(),
            role_id,
            &role_name,
        )));

        Ok(ServiceHandle::new(Self::rref(stack, id, name), &dns, identity))
    }

    fn attach_policy(
        &mut self,
        stack: &mut Stack,
        identity: &PolicyBearerHandle,
        statement: PolicyStatement,
    ) -> CoreResult<()> {
        stack.record_reference(identity.stack_id());
        stack.declare(
            ResourceKind::PolicyAttachment,
            &format!("{}-policy", identity.name()),
            json!({
                "identity": identity.resource_id(),
                "statement": statement,
            }),
        )?;
        Ok(())
    }
}
