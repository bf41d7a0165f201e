//! Core error types for STRATUS.

use thiserror::Error;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
///
/// Configuration errors are raised before any resource declaration
/// begins; provider errors carry the provider's message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Missing or invalid configuration value
    #[error("configuration error: {reason}")]
    Config {
        /// What was missing or invalid
        reason: String,
    },

    /// Resource Provider failure while declaring a resource
    #[error("provider error for {resource}: {message}")]
    Provider {
        /// Resource being declared when the provider failed
        resource: String,
        /// Provider message, propagated unmodified
        message: String,
    },

    /// Validation error
    #[error("validation failed for {field}: {reason}")]
    Validation {
        /// Field or structure that failed validation
        field: String,
        /// Why validation failed
        reason: String,
    },

    /// Not found
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind
        kind: String,
        /// Entity identifier
        id: String,
    },

    /// Already exists
    #[error("{kind} already exists: {id}")]
    AlreadyExists {
        /// Entity kind
        kind: String,
        /// Entity identifier
        id: String,
    },

    /// Dependency cycle between stacks
    #[error("dependency cycle involving stack {stack}")]
    Cycle {
        /// A stack on the cycle
        stack: String,
    },
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation {
            field: "json".to_string(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Config {
            reason: "STRATUS_REGION is not set".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "configuration error: STRATUS_REGION is not set"
        );

        let err = CoreError::NotFound {
            kind: "Stack".to_string(),
            id: "network".to_string(),
        };
        assert_eq!(format!("{}", err), "Stack not found: network");
    }

    #[test]
    fn test_provider_error_keeps_message() {
        let err = CoreError::Provider {
            resource: "app-cluster".to_string(),
            message: "quota exceeded".to_string(),
        };
        let s = format!("{}", err);
        assert!(s.contains("app-cluster"));
        assert!(s.contains("quota exceeded"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = CoreError::Cycle {
            stack: "network".to_string(),
        };
        let err2 = CoreError::Cycle {
            stack: "network".to_string(),
        };
        assert_eq!(err1, err2);

        let err3 = CoreError::Cycle {
            stack: "service".to_string(),
        };
        assert_ne!(err1, err3);
    }
}
