//! Permission statements attached to runtime identities.

use serde::{Deserialize, Serialize};

/// Statement effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Grant the listed actions
    Allow,
    /// Deny the listed actions
    Deny,
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Deny => write!(f, "deny"),
        }
    }
}

/// A permission statement: effect, actions, and resource scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyStatement {
    /// Statement effect
    pub effect: Effect,
    /// Actions the statement covers
    pub actions: Vec<String>,
    /// Resource scope; `["*"]` is unrestricted
    pub resources: Vec<String>,
}

impl PolicyStatement {
    /// Create an allow statement
    #[must_use]
    pub fn allow(actions: &[&str], resources: &[&str]) -> Self {
        Self {
            effect: Effect::Allow,
            actions: actions.iter().map(|s| (*s).to_string()).collect(),
            resources: resources.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Whether the statement's resource scope is unrestricted
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.resources.iter().any(|r| r == "*")
    }
}
