//! Error types for the abilities registry

use thiserror::Error;

/// Abilities registry errors
///
/// Both definition errors are raised synchronously and abort the current
/// `define`/`alias` call. Work already applied before the failing entry is
/// not rolled back.
#[derive(Debug, Error)]
pub enum AbilitiesError {
    /// An argument was neither a string nor a list of strings, or a role
    /// name passed to `define` was empty
    #[error("{operation}: expected \"{value}\" to be an array or string")]
    InvalidArgument {
        /// Operation that rejected the argument (`can`, `extend`, `alias`, `define`)
        operation: &'static str,
        /// Rendering of the offending value
        value: String,
    },

    /// A referenced role has not been defined
    #[error("{operation}: role \"{role}\" not defined to be extended")]
    NotFound {
        /// Operation that performed the lookup
        operation: &'static str,
        /// Missing role name
        role: String,
    },

    /// Malformed definitions document
    #[error("Definitions error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AbilitiesError {
    pub(crate) fn invalid_argument(operation: &'static str, value: impl ToString) -> Self {
        Self::InvalidArgument {
            operation,
            value: value.to_string(),
        }
    }

    pub(crate) fn not_found(operation: &'static str, role: impl Into<String>) -> Self {
        Self::NotFound {
            operation,
            role: role.into(),
        }
    }

    /// Name of the operation that raised this error, if any
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { operation, .. } | Self::NotFound { operation, .. } => {
                Some(*operation)
            }
            Self::Json(_) => None,
        }
    }
}

/// Result type for abilities operations
pub type Result<T> = std::result::Result<T, AbilitiesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = AbilitiesError::invalid_argument("can", 123);
        assert_eq!(err.to_string(), "can: expected \"123\" to be an array or string");
        assert_eq!(err.operation(), Some("can"));
    }

    #[test]
    fn test_not_found_display() {
        let err = AbilitiesError::not_found("extend", "auditor");
        assert!(err.to_string().contains("auditor"));
        assert!(err.to_string().starts_with("extend:"));
    }
}
