//! Opaque handles to declared resources.
//!
//! A handle carries the owning stack and resource identifiers plus the
//! attributes the provider resolved at declaration time. Handles are
//! cheap to clone and passing one into another stack's constructor
//! never duplicates provisioning; it records a cross-stack reference.

use stratus_core::{ResourceId, StackId};

/// Reference to a declared resource: owning stack plus resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    /// Owning stack
    pub stack: StackId,
    /// Resource within the stack
    pub resource: ResourceId,
    /// Resource name within the stack
    pub name: String,
}

impl ResourceRef {
    /// Create a reference
    #[must_use]
    pub fn new(stack: StackId, resource: ResourceId, name: &str) -> Self {
        Self {
            stack,
            resource,
            name: name.to_string(),
        }
    }
}

macro_rules! opaque_handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            rref: ResourceRef,
        }

        impl $name {
            /// Wrap a resource reference
            #[must_use]
            pub const fn new(rref: ResourceRef) -> Self {
                Self { rref }
            }

            /// Stack that owns the resource
            #[must_use]
            pub const fn stack_id(&self) -> StackId {
                self.rref.stack
            }

            /// Resource identifier
            #[must_use]
            pub const fn resource_id(&self) -> ResourceId {
                self.rref.resource
            }

            /// Resource name within its stack
            #[must_use]
            pub fn name(&self) -> &str {
                &self.rref.name
            }
        }
    };
}

opaque_handle!(
    /// Handle to a private network
    NetworkHandle
);

opaque_handle!(
    /// Handle to a container cluster
    ClusterHandle
);

opaque_handle!(
    /// Handle to a runtime identity whose policy can be mutated
    PolicyBearerHandle
);

/// Handle to a pre-existing image repository resolved by identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    rref: ResourceRef,
    arn: String,
}

impl RepositoryHandle {
    /// Wrap a resource reference and the repository identifier
    #[must_use]
    pub fn new(rref: ResourceRef, arn: &str) -> Self {
        Self {
            rref,
            arn: arn.to_string(),
        }
    }

    /// Stack that owns the lookup
    #[must_use]
    pub const fn stack_id(&self) -> StackId {
        self.rref.stack
    }

    /// Repository identifier
    #[must_use]
    pub fn arn(&self) -> &str {
        &self.arn
    }
}

/// A service's generated runtime execution identity
///
/// The identity is polymorphic: only some identities carry a mutable
/// policy. Narrowing is an optional-capability check, not an error
/// path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityHandle {
    /// Identity owned by this deployment; policy statements can be
    /// attached to it
    PolicyBearer(PolicyBearerHandle),
    /// Identity managed elsewhere; its policy is immutable from here
    External(ResourceRef),
}

impl IdentityHandle {
    /// Narrow to a policy-bearing identity, if this identity is one
    #[must_use]
    pub const fn as_policy_bearer(&self) -> Option<&PolicyBearerHandle> {
        match self {
            Self::PolicyBearer(handle) => Some(handle),
            Self::External(_) => None,
        }
    }
}

/// Handle to a load-balanced containerized service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHandle {
    rref: ResourceRef,
    load_balancer_dns: String,
    execution_identity: IdentityHandle,
}

impl ServiceHandle {
    /// Wrap a resource reference and the service's resolved attributes
    #[must_use]
    pub fn new(rref: ResourceRef, load_balancer_dns: &str, execution_identity: IdentityHandle) -> Self {
        Self {
            rref,
            load_balancer_dns: load_balancer_dns.to_string(),
            execution_identity,
        }
    }

    /// Stack that owns the service
    #[must_use]
    pub const fn stack_id(&self) -> StackId {
        self.rref.stack
    }

    /// Resource identifier
    #[must_use]
    pub const fn resource_id(&self) -> ResourceId {
        self.rref.resource
    }

    /// Externally-resolvable DNS name of the load balancer
    #[must_use]
    pub fn load_balancer_dns(&self) -> &str {
        &self.load_balancer_dns
    }

    /// The service's generated runtime execution identity
    #[must_use]
    pub const fn execution_identity(&self) -> &IdentityHandle {
        &self.execution_identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rref(stack: &str, name: &str) -> ResourceRef {
        let stack = StackId::from_name(stack);
        ResourceRef::new(stack, ResourceId::from_name(stack, name), name)
    }

    #[test]
    fn test_handle_accessors() {
        let rref = test_rref("network", "app-vpc");
        let handle = NetworkHandle::new(rref.clone());
        assert_eq!(handle.stack_id(), rref.stack);
        assert_eq!(handle.resource_id(), rref.resource);
        assert_eq!(handle.name(), "app-vpc");
    }

    #[test]
    fn test_clone_refers_to_same_resource() {
        let handle = NetworkHandle::new(test_rref("network", "app-vpc"));
        let copy = handle.clone();
        assert_eq!(copy.resource_id(), handle.resource_id());
    }

    #[test]
    fn test_identity_narrowing() {
        let bearer = IdentityHandle::PolicyBearer(PolicyBearerHandle::new(test_rref(
            "service",
            "web-execution-role",
        )));
        assert!(bearer.as_policy_bearer().is_some());

        let external = IdentityHandle::External(test_rref("service", "imported-role"));
        assert!(external.as_policy_bearer().is_none());
    }
}
