//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use dynect_provider::{ApiErrorKind, DynectError};

/// Core layer error type
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The reconcile request itself is unusable.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A step the run cannot continue without failed.
    #[error("Failed to {operation} (Zone=\"{zone}\", Node=\"{node}\") - {source}")]
    Aborted {
        operation: String,
        zone: String,
        node: String,
        source: DynectError,
    },

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] DynectError),
}

impl CoreError {
    /// Whether the error comes from user input or an expected provider answer.
    ///
    /// Callers log `true` at `warn` and `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) => true,
            Self::Aborted { source, .. } | Self::Provider(source) => source.is_expected(),
        }
    }

    /// The provider error underneath, if any.
    pub fn provider_error(&self) -> Option<&DynectError> {
        match self {
            Self::ValidationError(_) => None,
            Self::Aborted { source, .. } | Self::Provider(source) => Some(source),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aborted_names_operation_and_target() {
        let err = CoreError::Aborted {
            operation: "create node".to_string(),
            zone: "example.org".to_string(),
            node: "www.example.org.".to_string(),
            source: DynectError::Api {
                kind: ApiErrorKind::PermissionDenied,
                detail: "node: Permission denied".to_string(),
            },
        };
        let text = err.to_string();
        assert!(
            text.starts_with(
                "Failed to create node (Zone=\"example.org\", Node=\"www.example.org.\") - "
            ),
            "unexpected message: {text}"
        );
        assert!(text.contains("node: Permission denied"));
    }

    #[test]
    fn expectedness_follows_provider_error() {
        assert!(CoreError::ValidationError("zone is empty".into()).is_expected());

        let timed_out = CoreError::Provider(DynectError::OperationTimedOut {
            resource: "REST/Node/example.org/a.example.org".into(),
            max_tries: 12,
        });
        assert_eq!(
            timed_out.is_expected(),
            timed_out.provider_error().is_some_and(DynectError::is_expected)
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let err = CoreError::ValidationError("node is empty".into());
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["code"], "ValidationError");
        assert_eq!(value["details"], "node is empty");
    }
}
