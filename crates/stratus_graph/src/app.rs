//! The deployment app: the graph of stacks and the synthesis commit point.
//!
//! Stacks are added in construction order. Synthesis consumes the app,
//! so the commit point runs exactly once per deployment run.

use indexmap::{IndexMap, IndexSet};
use stratus_core::{CoreError, CoreResult, StackId};

use crate::plan::{Plan, PlanOutput, PlanResource, PlanStack};
use crate::stack::Stack;

/// Graph of constructed stacks for one deployment run
#[derive(Debug, Default)]
pub struct App {
    stacks: IndexMap<StackId, Stack>,
}

impl App {
    /// Create an empty app
    #[must_use]
    pub fn new() -> Self {
        Self {
            stacks: IndexMap::new(),
        }
    }

    /// Add a fully constructed stack
    ///
    /// Order matters: a stack must be added before any stack that
    /// consumes one of its handles.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::AlreadyExists` if a stack with the same
    /// identifier was already added.
    pub fn add_stack(&mut self, stack: Stack) -> CoreResult<()> {
        let id = stack.id();
        if self.stacks.contains_key(&id) {
            return Err(CoreError::AlreadyExists {
                kind: "Stack".to_string(),
                id: stack.name().to_string(),
            });
        }
        self.stacks.insert(id, stack);
        Ok(())
    }

    /// Number of stacks in the app
    #[must_use]
    pub fn stack_count(&self) -> usize {
        self.stacks.len()
    }

    /// Validate the cross-stack reference graph
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a reference to an unknown stack, `Cycle`
    /// when references form a loop, and `Validation` when a producer
    /// stack was added after one of its consumers or two stacks target
    /// different environments.
    pub fn validate(&self) -> CoreResult<()> {
        for stack in self.stacks.values() {
            for referenced in stack.references() {
                if !self.stacks.contains_key(referenced) {
                    return Err(CoreError::NotFound {
                        kind: "Stack".to_string(),
                        id: format!("{}", referenced),
                    });
                }
            }
        }

        for &id in self.stacks.keys() {
            if self.on_cycle(id) {
                let name = self.stacks[&id].name().to_string();
                return Err(CoreError::Cycle { stack: name });
            }
        }

        // Producer-before-consumer: every reference must point at an
        // earlier stack, which is what makes the order total.
        for (pos, stack) in self.stacks.values().enumerate() {
            for referenced in stack.references() {
                let producer_pos = self.stacks.get_index_of(referenced);
                if producer_pos.is_none_or(|p| p >= pos) {
                    return Err(CoreError::Validation {
                        field: "cross-stack-reference".to_string(),
                        reason: format!(
                            "stack {} consumes a handle from {}, which is not constructed before it",
                            stack.name(),
                            self.stacks[referenced].name()
                        ),
                    });
                }
            }
        }

        if let Some(first) = self.stacks.values().next() {
            for stack in self.stacks.values() {
                if stack.env() != first.env() {
                    return Err(CoreError::Validation {
                        field: "environment".to_string(),
                        reason: format!(
                            "stack {} targets {} but stack {} targets {}",
                            first.name(),
                            first.env(),
                            stack.name(),
                            stack.env()
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    /// Walk references out of `start`; true if the walk reaches `start`
    /// again.
    fn on_cycle(&self, start: StackId) -> bool {
        let mut visited = IndexSet::new();
        let mut pending: Vec<StackId> =
            self.stacks[&start].references().iter().copied().collect();

        while let Some(current) = pending.pop() {
            if current == start {
                return true;
            }
            if visited.insert(current) {
                if let Some(stack) = self.stacks.get(&current) {
                    pending.extend(stack.references().iter().copied());
                }
            }
        }

        false
    }

    /// Synthesize the declared graph into a deployable plan
    ///
    /// Consumes the app: synthesis is the single commit point and can
    /// only happen once. Stacks appear in the plan in construction
    /// order, resources in declaration order.
    ///
    /// # Errors
    ///
    /// Returns any [`validate`](Self::validate) error.
    pub fn synth(self) -> CoreResult<Plan> {
        self.validate()?;

        let mut plan_stacks = Vec::with_capacity(self.stacks.len());
        let mut outputs = Vec::new();

        for stack in self.stacks.values() {
            let depends_on = stack
                .references()
                .iter()
                .map(|id| self.stacks[id].name().to_string())
                .collect();

            let resources = stack
                .resources()
                .map(|r| PlanResource {
                    id: r.id,
                    kind: r.kind,
                    name: r.name.clone(),
                    spec: r.spec.clone(),
                })
                .collect();

            plan_stacks.push(PlanStack {
                id: stack.id(),
                name: stack.name().to_string(),
                environment: stack.env().clone(),
                depends_on,
                resources,
            });

            for (key, value) in stack.outputs() {
                outputs.push(PlanOutput {
                    stack: stack.name().to_string(),
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(Plan {
            stacks: plan_stacks,
            outputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::ResourceKind;
    use serde_json::json;
    use stratus_core::Environment;

    fn test_env() -> Environment {
        Environment::new(Some("123"), "us-east-1")
    }

    #[test]
    fn test_add_stack_duplicate() {
        let mut app = App::new();
        app.add_stack(Stack::new("network", test_env())).unwrap();
        let result = app.add_stack(Stack::new("network", test_env()));
        assert!(matches!(result, Err(CoreError::AlreadyExists { .. })));
        assert_eq!(app.stack_count(), 1);
    }

    #[test]
    fn test_synth_orders_stacks_and_outputs() {
        let mut app = App::new();

        let mut network = Stack::new("network", test_env());
        network
            .declare(ResourceKind::PrivateNetwork, "app-vpc", json!({}))
            .unwrap();
        let network_id = network.id();
        app.add_stack(network).unwrap();

        let mut service = Stack::new("service", test_env());
        service.record_reference(network_id);
        service
            .declare(ResourceKind::ContainerCluster, "app-cluster", json!({}))
            .unwrap();
        service.add_output("load_balancer_dns", "web.example.com").unwrap();
        app.add_stack(service).unwrap();

        let plan = app.synth().unwrap();
        assert_eq!(plan.stacks.len(), 2);
        assert_eq!(plan.stacks[0].name, "network");
        assert_eq!(plan.stacks[1].name, "service");
        assert_eq!(plan.stacks[1].depends_on, ["network"]);
        assert_eq!(plan.outputs.len(), 1);
        assert_eq!(plan.outputs[0].key, "load_balancer_dns");
    }

    #[test]
    fn test_validate_unknown_reference() {
        let mut app = App::new();
        let mut service = Stack::new("service", test_env());
        service.record_reference(stratus_core::StackId::from_name("missing"));
        app.add_stack(service).unwrap();

        assert!(matches!(app.validate(), Err(CoreError::NotFound { .. })));
    }

    #[test]
    fn test_validate_consumer_before_producer() {
        let mut app = App::new();

        let network = Stack::new("network", test_env());
        let network_id = network.id();

        let mut service = Stack::new("service", test_env());
        service.record_reference(network_id);
        app.add_stack(service).unwrap();
        app.add_stack(network).unwrap();

        assert!(matches!(app.validate(), Err(CoreError::Validation { .. })));
    }

    #[test]
    fn test_validate_reference_cycle() {
        let mut app = App::new();

        let mut a = Stack::new("a", test_env());
        let mut b = Stack::new("b", test_env());
        a.record_reference(b.id());
        b.record_reference(a.id());
        app.add_stack(a).unwrap();
        app.add_stack(b).unwrap();

        assert!(matches!(app.validate(), Err(CoreError::Cycle { .. })));
    }

    #[test]
    fn test_validate_mismatched_environments() {
        let mut app = App::new();
        app.add_stack(Stack::new("network", test_env())).unwrap();
        app.add_stack(Stack::new("service", Environment::new(Some("123"), "eu-west-1")))
            .unwrap();

        let result = app.validate();
        assert!(matches!(result, Err(CoreError::Validation { field, .. }) if field == "environment"));
    }

    #[test]
    fn test_synth_empty_app() {
        let plan = App::new().synth().unwrap();
        assert!(plan.stacks.is_empty());
        assert!(plan.outputs.is_empty());
    }
}
