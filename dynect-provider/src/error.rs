use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes the provider reports in the `ERR_CD` field of envelope messages.
///
/// Every code in this set is fatal: the classifier raises
/// [`DynectError::Api`] for the first one it finds in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorKind {
    /// The operation is not permitted in the current state.
    IllegalOperation,
    /// The provider hit an internal failure.
    InternalError,
    /// A request field failed validation.
    InvalidData,
    /// The request itself is malformed.
    InvalidRequest,
    /// The requested API version is not supported.
    InvalidVersion,
    /// A required field is missing from the request.
    MissingData,
    /// The zone, node, record or job does not exist.
    NotFound,
    /// The provider accepted the request but could not complete it.
    OperationFailed,
    /// The session user lacks permission for the operation.
    PermissionDenied,
    /// The API is temporarily unavailable.
    ServiceUnavailable,
    /// The object being created already exists.
    TargetExists,
    /// Catch-all reported by the provider.
    UnknownError,
}

impl ApiErrorKind {
    /// All kinds, in taxonomy order.
    pub const ALL: [Self; 12] = [
        Self::IllegalOperation,
        Self::InternalError,
        Self::InvalidData,
        Self::InvalidRequest,
        Self::InvalidVersion,
        Self::MissingData,
        Self::NotFound,
        Self::OperationFailed,
        Self::PermissionDenied,
        Self::ServiceUnavailable,
        Self::TargetExists,
        Self::UnknownError,
    ];

    /// Map a raw `ERR_CD` value to its kind. Unrecognized codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// The wire code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            Self::IllegalOperation => "ILLEGAL_OPERATION",
            Self::InternalError => "INTERNAL_ERROR",
            Self::InvalidData => "INVALID_DATA",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidVersion => "INVALID_VERSION",
            Self::MissingData => "MISSING_DATA",
            Self::NotFound => "NOT_FOUND",
            Self::OperationFailed => "OPERATION_FAILED",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::TargetExists => "TARGET_EXISTS",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Unified error type for all Dynect operations.
///
/// [`Api`](Self::Api) carries one of the provider's error codes together with
/// its free-text detail. The remaining variants are raised by the client itself.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum DynectError {
    /// The provider answered with an error-coded message.
    #[error("[dynect] {kind}: {detail}")]
    Api {
        /// Error kind decoded from `ERR_CD`.
        kind: ApiErrorKind,
        /// The provider's `INFO` text.
        detail: String,
    },

    /// The operation is still running as an asynchronous job.
    ///
    /// Only ever observed inside the client's retry loop, which polls
    /// `job_path` instead of surfacing this error.
    #[error("[dynect] Operation redirected to job {job_path}")]
    Redirect {
        /// Job resource path extracted from the response body.
        job_path: String,
    },

    /// The retry budget ran out while the provider kept redirecting to a job.
    #[error("[dynect] Maximum number of tries ({max_tries}) exceeded on resource: {resource}")]
    OperationTimedOut {
        /// The resource originally requested.
        resource: String,
        /// Configured try ceiling.
        max_tries: u32,
    },

    /// An rdata string does not split into the number of fields the record type needs.
    #[error(
        "[dynect] {record_type} records require {} parameter(s) ({}) but {} parameter(s) were given ({})",
        .expected.len(),
        .expected.join(", "),
        .given.len(),
        .given.join(", ")
    )]
    FieldCountMismatch {
        /// Record type tag.
        record_type: String,
        /// Field names required by the schema.
        expected: Vec<String>,
        /// Tokens found in the rdata string.
        given: Vec<String>,
    },

    /// The record type is outside the supported set.
    #[error("[dynect] Unsupported record type: {record_type}")]
    UnsupportedRecordType {
        /// The rejected type tag.
        record_type: String,
    },

    /// A network-level error occurred (connection refused, TLS failure, etc.).
    #[error("[dynect] Network error: {detail}")]
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out at the transport.
    #[error("[dynect] Request timeout: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The response body is neither an envelope nor a job redirect.
    #[error("[dynect] Parse error: {detail}")]
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// A request body could not be serialized.
    #[error("[dynect] Serialization error: {detail}")]
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl DynectError {
    /// The provider error kind, if this is an [`Api`](Self::Api) error.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether the provider reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        self.api_kind() == Some(ApiErrorKind::NotFound)
    }

    /// Whether the failure stems from input or remote state rather than a fault.
    ///
    /// Callers log `true` at `warn` level and `false` at `error` level.
    /// **Keep in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Api { kind, .. } => matches!(
                kind,
                ApiErrorKind::NotFound
                    | ApiErrorKind::TargetExists
                    | ApiErrorKind::InvalidData
                    | ApiErrorKind::MissingData
                    | ApiErrorKind::PermissionDenied
                    | ApiErrorKind::IllegalOperation
            ),
            Self::FieldCountMismatch { .. } | Self::UnsupportedRecordType { .. } => true,
            Self::Redirect { .. }
            | Self::OperationTimedOut { .. }
            | Self::NetworkError { .. }
            | Self::Timeout { .. }
            | Self::ParseError { .. }
            | Self::SerializationError { .. } => false,
        }
    }
}

/// Convenience type alias for `Result<T, DynectError>`.
pub type Result<T> = std::result::Result<T, DynectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_maps_back_to_its_kind() {
        for kind in ApiErrorKind::ALL {
            assert_eq!(ApiErrorKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn unknown_code_is_not_in_taxonomy() {
        assert_eq!(ApiErrorKind::from_code("SERVICE_NOTICE"), None);
        assert_eq!(ApiErrorKind::from_code("not_found"), None);
        assert_eq!(ApiErrorKind::from_code(""), None);
    }

    #[test]
    fn serde_uses_wire_codes() {
        let json = serde_json::to_string(&ApiErrorKind::TargetExists).unwrap();
        assert_eq!(json, "\"TARGET_EXISTS\"");
    }

    #[test]
    fn display_api_error() {
        let e = DynectError::Api {
            kind: ApiErrorKind::NotFound,
            detail: "node: Not in zone".to_string(),
        };
        assert_eq!(e.to_string(), "[dynect] NOT_FOUND: node: Not in zone");
    }

    #[test]
    fn display_operation_timed_out() {
        let e = DynectError::OperationTimedOut {
            resource: "REST/ARecord/example.org/www.example.org".to_string(),
            max_tries: 12,
        };
        assert_eq!(
            e.to_string(),
            "[dynect] Maximum number of tries (12) exceeded on resource: REST/ARecord/example.org/www.example.org"
        );
    }

    #[test]
    fn display_field_count_mismatch() {
        let e = DynectError::FieldCountMismatch {
            record_type: "MX".to_string(),
            expected: vec!["preference".to_string(), "exchange".to_string()],
            given: vec!["mail.example.org.".to_string()],
        };
        assert_eq!(
            e.to_string(),
            "[dynect] MX records require 2 parameter(s) (preference, exchange) but 1 parameter(s) were given (mail.example.org.)"
        );
    }

    #[test]
    fn serialize_tags_variant() {
        let e = DynectError::OperationTimedOut {
            resource: "REST/Job/1".to_string(),
            max_tries: 3,
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"OperationTimedOut\""));
        assert!(json.contains("\"max_tries\":3"));
    }

    #[test]
    fn not_found_helpers() {
        let e = DynectError::Api {
            kind: ApiErrorKind::NotFound,
            detail: String::new(),
        };
        assert!(e.is_not_found());
        assert!(e.is_expected());

        let e = DynectError::Api {
            kind: ApiErrorKind::ServiceUnavailable,
            detail: String::new(),
        };
        assert!(!e.is_not_found());
        assert!(!e.is_expected());
    }

    #[test]
    fn transport_errors_are_unexpected() {
        let e = DynectError::NetworkError {
            detail: "connection refused".into(),
        };
        assert_eq!(e.api_kind(), None);
        assert!(!e.is_expected());
    }
}
