//! Target deployment environment resolution.
//!
//! The environment is resolved once per run and shared read-only by
//! every stack, so all resources land in the same account/region pair.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Environment variable naming the target account (optional)
pub const ACCOUNT_VAR: &str = "STRATUS_ACCOUNT";

/// Environment variable naming the target region (required)
pub const REGION_VAR: &str = "STRATUS_REGION";

/// Target account and region for a deployment run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Target account; `None` means the provider's ambient default
    pub account: Option<String>,
    /// Target region
    pub region: String,
}

impl Environment {
    /// Create an environment with an explicit account and region
    #[must_use]
    pub fn new(account: Option<&str>, region: &str) -> Self {
        Self {
            account: account.map(str::to_string),
            region: region.to_string(),
        }
    }

    /// Resolve from the process environment
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Config` if the region variable is unset or
    /// empty. An unset account is not an error; interpreting it is the
    /// Resource Provider's responsibility.
    pub fn resolve() -> CoreResult<Self> {
        Self::resolve_from(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary variable lookup
    ///
    /// Tests and callers layering overrides inject their own lookup
    /// here instead of mutating process-global state.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Config` if the lookup yields no region.
    pub fn resolve_from<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let account = lookup(ACCOUNT_VAR).filter(|v| !v.is_empty());
        let region = lookup(REGION_VAR)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CoreError::Config {
                reason: format!("{} is not set", REGION_VAR),
            })?;
        Ok(Self { account, region })
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.account {
            Some(account) => write!(f, "{}/{}", account, self.region),
            None => write!(f, "<default>/{}", self.region),
        }
    }
}
