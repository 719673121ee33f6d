use serde::{Deserialize, Serialize};

/// Unified error type for all external-service client operations.
///
/// Each variant carries a `service` field naming the client that produced the
/// error (`"zone"`, `"proxy"`, `"mailer"`), plus variant-specific context. All
/// variants are serializable for structured error reporting.
///
/// Expected "resource already absent" responses from delete operations are
/// **not** errors: those are surfaced as typed outcomes
/// ([`DeleteZoneOutcome`](crate::types::DeleteZoneOutcome),
/// [`RemoveRouteOutcome`](crate::types::RemoveRouteOutcome)) so callers can
/// converge idempotently. `NotFound` here is reserved for lookups where the
/// caller asked about a resource it believed to exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ClientError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, unreadable body, etc.).
    NetworkError {
        /// Service that produced the error.
        service: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Service that produced the error.
        service: String,
        /// Error details.
        detail: String,
    },

    /// The configured credentials were rejected (HTTP 401/403).
    InvalidCredentials {
        /// Service that produced the error.
        service: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A queried resource was not found (HTTP 404 on a lookup).
    NotFound {
        /// Service that produced the error.
        service: String,
        /// Identifier of the resource that was not found.
        resource: String,
    },

    /// A request parameter was rejected by the API (e.g. malformed domain).
    InvalidParameter {
        /// Service that produced the error.
        service: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The API returned a non-success response not covered by a more
    /// specific variant.
    ApiError {
        /// Service that produced the error.
        service: String,
        /// HTTP status code of the response.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// Failed to parse the API's response body.
    ParseError {
        /// Service that produced the error.
        service: String,
        /// Details about the parse failure.
        detail: String,
    },
}

impl ClientError {
    /// Whether this is expected behavior (bad input, missing resource) rather
    /// than an infrastructure fault, used for log-level selection.
    ///
    /// Returns `true` for `warn`-level errors, `false` for `error`-level.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::InvalidParameter { .. } | Self::InvalidCredentials { .. }
        )
    }

    /// Whether the failure is transient (network, timeout). The orchestrator
    /// does not retry in-process either way; this only informs logging.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { service, detail } => {
                write!(f, "[{service}] Network error: {detail}")
            }
            Self::Timeout { service, detail } => {
                write!(f, "[{service}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                service,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{service}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{service}] Invalid credentials")
                }
            }
            Self::NotFound { service, resource } => {
                write!(f, "[{service}] Resource '{resource}' not found")
            }
            Self::InvalidParameter {
                service,
                param,
                detail,
            } => {
                write!(f, "[{service}] Invalid parameter '{param}': {detail}")
            }
            Self::ApiError {
                service,
                status,
                message,
            } => {
                write!(f, "[{service}] API error (HTTP {status}): {message}")
            }
            Self::ParseError { service, detail } => {
                write!(f, "[{service}] Parse error: {detail}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
