//! Stacks: named units of infrastructure declaration.
//!
//! A stack accumulates resource intents in declaration order. Declaring
//! never performs I/O; the declared intents are consumed once by
//! synthesis.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use stratus_core::{CoreError, CoreResult, Environment, ResourceId, StackId};

/// Kind of a declared resource intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Private network with fixed topology
    PrivateNetwork,
    /// Container cluster bound to a network
    ContainerCluster,
    /// Lookup of a pre-existing image repository (not provisioned here)
    ImageRepositoryLookup,
    /// Load-balanced containerized service
    LoadBalancedService,
    /// Permission statement attached to a runtime identity
    PolicyAttachment,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::PrivateNetwork => "private-network",
            Self::ContainerCluster => "container-cluster",
            Self::ImageRepositoryLookup => "image-repository-lookup",
            Self::LoadBalancedService => "load-balanced-service",
            Self::PolicyAttachment => "policy-attachment",
        };
        write!(f, "{}", name)
    }
}

/// A declared resource intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource identifier, derived from the owning stack and name
    pub id: ResourceId,
    /// Resource kind
    pub kind: ResourceKind,
    /// Name, unique within the stack
    pub name: String,
    /// Kind-specific declaration payload
    pub spec: serde_json::Value,
}

/// A named unit of infrastructure declaration
///
/// Constructed once per deployment run, mutated only while its owning
/// component declares resources, then handed to the [`App`] for
/// synthesis.
///
/// [`App`]: crate::App
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    id: StackId,
    name: String,
    env: Environment,
    resources: IndexMap<ResourceId, Resource>,
    outputs: IndexMap<String, String>,
    references: IndexSet<StackId>,
}

impl Stack {
    /// Create an empty stack targeting the given environment
    #[must_use]
    pub fn new(name: &str, env: Environment) -> Self {
        Self {
            id: StackId::from_name(name),
            name: name.to_string(),
            env,
            resources: IndexMap::new(),
            outputs: IndexMap::new(),
            references: IndexSet::new(),
        }
    }

    /// Stack identifier
    #[must_use]
    pub const fn id(&self) -> StackId {
        self.id
    }

    /// Stack name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target environment
    #[must_use]
    pub const fn env(&self) -> &Environment {
        &self.env
    }

    /// Declare a resource intent
    ///
    /// # Errors
    ///
    /// Returns `CoreError::AlreadyExists` if a resource with the same
    /// name was already declared in this stack.
    pub fn declare(
        &mut self,
        kind: ResourceKind,
        name: &str,
        spec: serde_json::Value,
    ) -> CoreResult<ResourceId> {
        let id = ResourceId::from_name(self.id, name);
        if self.resources.contains_key(&id) {
            return Err(CoreError::AlreadyExists {
                kind: "Resource".to_string(),
                id: name.to_string(),
            });
        }
        self.resources.insert(
            id,
            Resource {
                id,
                kind,
                name: name.to_string(),
                spec,
            },
        );
        Ok(id)
    }

    /// Record a cross-stack reference to the stack owning a consumed
    /// handle. References to self are not edges and are ignored.
    pub fn record_reference(&mut self, producer: StackId) {
        if producer != self.id {
            self.references.insert(producer);
        }
    }

    /// Export a named output
    ///
    /// # Errors
    ///
    /// Returns `CoreError::AlreadyExists` if the key is already exported.
    pub fn add_output(&mut self, key: &str, value: &str) -> CoreResult<()> {
        if self.outputs.contains_key(key) {
            return Err(CoreError::AlreadyExists {
                kind: "Output".to_string(),
                id: key.to_string(),
            });
        }
        self.outputs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Declared resources, in declaration order
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Find a declared resource by name
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(&ResourceId::from_name(self.id, name))
    }

    /// Exported outputs, in export order
    pub fn outputs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outputs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Stacks this stack consumes handles from
    #[must_use]
    pub const fn references(&self) -> &IndexSet<StackId> {
        &self.references
    }

    /// Number of declared resources
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}
