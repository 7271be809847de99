//! Error types for Grafana operations.
//!
//! Errors are categorized so callers can give appropriate feedback.
//! Nothing in this crate retries: every error aborts the current pass and
//! carries the remote status and body verbatim where there is one.

use std::fmt;

/// Result type alias for Grafana operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of Grafana errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection, TLS, timeout or decoding failure.
    Network,
    /// The API answered with an unexpected status code.
    Api,
    /// Organization lookup or switch failed.
    Organization,
    /// The declaration is incomplete or inconsistent.
    Validation,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Could not talk to Grafana",
            Self::Api => "Grafana rejected the request",
            Self::Organization => "Organization scope could not be set",
            Self::Validation => "Invalid contact point declaration",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check the Grafana URL, TLS settings and that the server is reachable",
            Self::Api => "Check credentials, permissions and the response body above",
            Self::Organization => "Verify the user is a member of the requested organization",
            Self::Validation => "Fix the declaration and run again; nothing was sent",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while reconciling contact points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be completed or its response could not be decoded.
    #[error("transport error: {0}")]
    Transport(String),

    /// Grafana answered with a status code the operation does not accept.
    #[error("unable to {operation}: HTTP {status}: {body}")]
    RemoteApi {
        /// What was being attempted, e.g. "create contact point email".
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// The authenticated user is not a member of the named organization.
    #[error("current user isn't member of organization: {0}")]
    OrgNotFound(String),

    /// Switching the active organization did not succeed.
    #[error("unable to switch to organization {org_id}: HTTP {status}: {body}")]
    OrgSwitch {
        /// Requested organization id.
        org_id: i64,
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// A required field is missing for the requested state/type combination.
    #[error("invalid declaration: {0}")]
    Validation(String),
}

impl Error {
    /// Create a remote API error.
    pub fn remote(operation: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::RemoteApi {
            operation: operation.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Transport(_) => ErrorCategory::Network,
            Error::RemoteApi { .. } => ErrorCategory::Api,
            Error::OrgNotFound(_) | Error::OrgSwitch { .. } => ErrorCategory::Organization,
            Error::Validation(_) => ErrorCategory::Validation,
        }
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteApi { status, .. } | Error::OrgSwitch { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(format!("invalid JSON: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_description_and_advice() {
        for category in [
            ErrorCategory::Network,
            ErrorCategory::Api,
            ErrorCategory::Organization,
            ErrorCategory::Validation,
        ] {
            assert!(!category.description().is_empty());
            assert!(!category.advice().is_empty());
        }
    }

    #[test]
    fn test_remote_error_display_carries_status_and_body() {
        let err = Error::remote("create contact point email", 500, "{\"message\":\"boom\"}");
        let display = err.to_string();
        assert!(display.contains("create contact point email"));
        assert!(display.contains("500"));
        assert!(display.contains("boom"));
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.category(), ErrorCategory::Api);
    }

    #[test]
    fn test_org_errors_category() {
        assert_eq!(
            Error::OrgNotFound("Main".into()).category(),
            ErrorCategory::Organization
        );
        let err = Error::OrgSwitch {
            org_id: 7,
            status: 401,
            body: String::new(),
        };
        assert_eq!(err.category(), ErrorCategory::Organization);
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.status().is_none());
    }

    #[test]
    fn test_validation_constructor() {
        let err = Error::validation("uid is required");
        assert_eq!(err.to_string(), "invalid declaration: uid is required");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
