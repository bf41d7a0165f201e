//! The deployable plan produced by synthesis.
//!
//! A plan is a side-effect-free description of everything a deployment
//! run declared: stacks in dependency order, each stack's resources in
//! declaration order, and the collected outputs. It serializes to JSON
//! for operator consumption.

use serde::{Deserialize, Serialize};
use stratus_core::{CoreResult, Environment, ResourceId, StackId};

use crate::stack::ResourceKind;

/// Deployable plan for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Stacks, in construction (dependency) order
    pub stacks: Vec<PlanStack>,
    /// Outputs collected from all stacks
    pub outputs: Vec<PlanOutput>,
}

impl Plan {
    /// Render as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find a stack by name
    #[must_use]
    pub fn stack(&self, name: &str) -> Option<&PlanStack> {
        self.stacks.iter().find(|s| s.name == name)
    }

    /// Find an output by key, across all stacks
    #[must_use]
    pub fn output(&self, key: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.key == key)
            .map(|o| o.value.as_str())
    }
}

/// One stack within a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStack {
    /// Stack identifier
    pub id: StackId,
    /// Stack name
    pub name: String,
    /// Target environment
    pub environment: Environment,
    /// Names of stacks this stack consumes handles from
    pub depends_on: Vec<String>,
    /// Declared resources, in declaration order
    pub resources: Vec<PlanResource>,
}

impl PlanStack {
    /// Find a resource by name
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<&PlanResource> {
        self.resources.iter().find(|r| r.name == name)
    }
}

/// One declared resource within a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResource {
    /// Resource identifier
    pub id: ResourceId,
    /// Resource kind
    pub kind: ResourceKind,
    /// Resource name, unique within its stack
    pub name: String,
    /// Kind-specific declaration payload
    pub spec: serde_json::Value,
}

/// One exported output within a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutput {
    /// Name of the exporting stack
    pub stack: String,
    /// Output key
    pub key: String,
    /// Output value
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::stack::Stack;
    use serde_json::json;

    fn sample_plan() -> Plan {
        let env = Environment::new(None, "us-east-1");
        let mut app = App::new();

        let mut network = Stack::new("network", env.clone());
        network
            .declare(
                ResourceKind::PrivateNetwork,
                "app-vpc",
                json!({"max_azs": 2, "nat_gateways": 1}),
            )
            .unwrap();
        app.add_stack(network).unwrap();

        app.synth().unwrap()
    }

    #[test]
    fn test_plan_json_round_trip() {
        let plan = sample_plan();
        let rendered = plan.to_json_pretty().unwrap();
        let parsed: Plan = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, plan);
    }

    #[test]
    fn test_plan_lookups() {
        let plan = sample_plan();
        let stack = plan.stack("network").unwrap();
        let resource = stack.resource("app-vpc").unwrap();
        assert_eq!(resource.kind, ResourceKind::PrivateNetwork);
        assert_eq!(resource.spec["nat_gateways"], 1);

        assert!(plan.stack("missing").is_none());
        assert!(plan.output("missing").is_none());
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let rendered = serde_json::to_string(&ResourceKind::LoadBalancedService).unwrap();
        assert_eq!(rendered, "\"load-balanced-service\"");
    }
}
