//! Unique identifiers for STRATUS entities.
//!
//! Identifiers are name-derived UUIDs (v5) so that the same topology
//! always synthesizes to the same plan.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stack identifier - identifies one stack within a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StackId(Uuid);

impl StackId {
    /// Derive a StackId from the stack's name
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_DNS, name.as_bytes()))
    }

    /// Create from UUID bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for StackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stk_{}", self.0)
    }
}

/// Resource identifier - identifies a declared resource within a stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(Uuid);

impl ResourceId {
    /// Derive a ResourceId from the owning stack and resource name
    #[must_use]
    pub fn from_name(stack: StackId, name: &str) -> Self {
        Self(Uuid::new_v5(&stack.as_uuid(), name.as_bytes()))
    }

    /// Create from UUID bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Short hex form, used when deriving resource-scoped names
    #[must_use]
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "res_{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_id_deterministic() {
        let a = StackId::from_name("network");
        let b = StackId::from_name("network");
        assert_eq!(a, b);

        let c = StackId::from_name("service");
        assert_ne!(a, c);
    }

    #[test]
    fn test_resource_id_scoped_to_stack() {
        let s1 = StackId::from_name("network");
        let s2 = StackId::from_name("service");
        assert_ne!(
            ResourceId::from_name(s1, "app-vpc"),
            ResourceId::from_name(s2, "app-vpc")
        );
    }

    #[test]
    fn test_display_prefixes() {
        let stack = StackId::from_name("network");
        assert!(format!("{}", stack).starts_with("stk_"));

        let resource = ResourceId::from_name(stack, "app-vpc");
        assert!(format!("{}", resource).starts_with("res_"));
    }

    #[test]
    fn test_short_is_eight_hex_chars() {
        let stack = StackId::from_name("network");
        let resource = ResourceId::from_name(stack, "app-vpc");
        let short = resource.short();
        assert_eq!(short.len(), 8);
        assert!(short.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
