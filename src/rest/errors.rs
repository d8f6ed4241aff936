//! Error taxonomy of the request pipeline and the fluent builders.
//!
//! # Error Handling
//!
//! Every operation resolves to `Result<T, ArmError>`. The variants separate
//! where a failure happened:
//!
//! - [`ArmError::Validation`]: a required parameter was missing; raised before
//!   any network call
//! - [`ArmError::Transport`]: the request produced no response
//! - [`ArmError::Cloud`]: the service answered with a status code the
//!   operation does not register as success; see [`CloudError::kind`]
//! - [`ArmError::Commit`]: one or more calls of a builder commit failed
//! - [`ArmError::Decode`] / [`ArmError::UnexpectedEmptyBody`]: a success
//!   response could not be turned into the declared type
//!
//! Nothing is retried internally.
//!
//! # Example
//!
//! ```rust,ignore
//! use arm_fluent::rest::{ArmError, CloudErrorKind};
//!
//! match profile.refresh().await {
//!     Ok(()) => println!("refreshed"),
//!     Err(ArmError::Cloud(e)) if e.kind() == CloudErrorKind::NotFound => {
//!         println!("profile was deleted, keeping last known state");
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::CredentialError;
use crate::clients::{HttpError, HttpResponse, InvalidHttpRequestError, TransportError};
use crate::error::ConfigError;

/// One entry of the `details` array of a service error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudErrorDetail {
    /// Service-defined error code.
    #[serde(default)]
    pub code: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// The element the error refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Coarse classification of a [`CloudError`] for branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloudErrorKind {
    /// 400: the service rejected the request as invalid.
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// 412
    PreconditionFailed,
    /// 429
    TooManyRequests,
    /// 5xx
    ServerError,
    /// Any other status.
    Other,
}

impl CloudErrorKind {
    /// Classifies a status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            412 => Self::PreconditionFailed,
            429 => Self::TooManyRequests,
            500..=599 => Self::ServerError,
            _ => Self::Other,
        }
    }
}

/// A structured error returned by the service.
///
/// Built only by the pipeline from a response whose status code is not
/// registered as success for the operation.
///
/// # Example
///
/// ```rust
/// use arm_fluent::clients::HttpResponse;
/// use arm_fluent::rest::{CloudError, CloudErrorKind};
/// use std::collections::HashMap;
///
/// let response = HttpResponse::new(
///     409,
///     HashMap::new(),
///     r#"{"error":{"code":"Conflict","message":"Endpoint name already taken"}}"#,
/// );
/// let error = CloudError::from_response(&response);
///
/// assert_eq!(error.kind(), CloudErrorKind::Conflict);
/// assert_eq!(error.code, "Conflict");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Status code {status}, {code}: {message}")]
pub struct CloudError {
    /// The HTTP status code.
    pub status: u16,
    /// Service-defined error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// The element the error refers to.
    pub target: Option<String>,
    /// Nested errors (e.g. one per invalid field).
    pub details: Vec<CloudErrorDetail>,
    /// The `x-ms-request-id` of the failed request.
    pub request_id: Option<String>,
}

#[derive(Deserialize)]
struct CloudErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    details: Vec<CloudErrorDetail>,
}

#[derive(Deserialize)]
struct CloudErrorEnvelope {
    error: CloudErrorBody,
}

impl CloudError {
    /// Builds a `CloudError` from a non-success response.
    ///
    /// Accepts both the wrapped `{"error": {...}}` shape and a bare
    /// `{"code": ..., "message": ...}` object. Bodies in neither shape keep
    /// the raw text as the message.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let parsed = serde_json::from_str::<CloudErrorEnvelope>(&response.body)
            .map(|envelope| envelope.error)
            .or_else(|_| serde_json::from_str::<CloudErrorBody>(&response.body))
            .ok()
            .filter(|body| body.code.is_some() || body.message.is_some());

        let request_id = response.request_id().map(ToString::to_string);

        match parsed {
            Some(body) => Self {
                status: response.code,
                code: body
                    .code
                    .unwrap_or_else(|| Self::default_code(response.code)),
                message: body.message.unwrap_or_default(),
                target: body.target,
                details: body.details,
                request_id,
            },
            None => Self {
                status: response.code,
                code: Self::default_code(response.code),
                message: if response.has_body() {
                    response.body.trim().to_string()
                } else {
                    "(empty body)".to_string()
                },
                target: None,
                details: Vec::new(),
                request_id,
            },
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> CloudErrorKind {
        CloudErrorKind::from_status(self.status)
    }

    fn default_code(status: u16) -> String {
        format!("HttpStatus{status}")
    }
}

/// A local precondition failed; nothing was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A path parameter was absent or empty.
    #[error("Parameter '{parameter}' is required and cannot be empty for {operation}.")]
    MissingParameter {
        /// The operation being built.
        operation: &'static str,
        /// The missing parameter.
        parameter: String,
    },

    /// A PUT or PATCH operation was built without a body.
    #[error("{operation} requires a request body.")]
    MissingBody {
        /// The operation being built.
        operation: &'static str,
    },

    /// The HTTP request itself failed validation.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A resource id string could not be parsed.
    #[error("Invalid resource id '{id}': {reason}.")]
    InvalidResourceId {
        /// The offending id.
        id: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// An update referred to a child the parent does not hold.
    #[error("{kind} '{name}' does not exist in '{parent}'.")]
    UnknownChild {
        /// The child resource kind (e.g. "Endpoint").
        kind: &'static str,
        /// The requested child name.
        name: String,
        /// The parent resource name.
        parent: String,
    },

    /// A configuration value was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The action a commit performs for one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitAction {
    /// PUT a new child.
    Create,
    /// PATCH an existing child.
    Update,
    /// DELETE a child.
    Delete,
}

impl fmt::Display for CommitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// One call of a builder commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constituent {
    /// The parent resource's own create or update call.
    Parent {
        /// Parent resource name.
        name: String,
    },
    /// A call for one pending child.
    Child {
        /// Child resource name.
        name: String,
        /// What was attempted.
        action: CommitAction,
    },
}

impl Constituent {
    /// Returns the resource name of this constituent.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Parent { name } | Self::Child { name, .. } => name,
        }
    }
}

impl fmt::Display for Constituent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent { name } => write!(f, "parent '{name}'"),
            Self::Child { name, action } => write!(f, "child '{name}' ({action})"),
        }
    }
}

/// A failed constituent of a commit, with its own error.
#[derive(Debug, Error)]
#[error("{constituent}: {error}")]
pub struct ConstituentFailure {
    /// Which call failed.
    pub constituent: Constituent,
    /// Why it failed.
    #[source]
    pub error: ArmError,
}

/// Aggregate error of a builder commit.
///
/// Lists every failed call. If the parent call failed, child calls were not
/// attempted and `failures` holds only the parent.
#[derive(Debug, Error)]
#[error("Commit of '{resource}' failed: {}", summarize(.failures))]
pub struct CommitError {
    /// The name of the resource whose commit failed.
    pub resource: String,
    /// The failed calls, in the order they were issued.
    pub failures: Vec<ConstituentFailure>,
}

fn summarize(failures: &[ConstituentFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CommitError {
    /// Returns `true` if the parent call itself failed.
    #[must_use]
    pub fn parent_failed(&self) -> bool {
        self.failures
            .iter()
            .any(|failure| matches!(failure.constituent, Constituent::Parent { .. }))
    }

    /// Returns the names of the children whose calls failed.
    #[must_use]
    pub fn failed_children(&self) -> Vec<&str> {
        self.failures
            .iter()
            .filter_map(|failure| match &failure.constituent {
                Constituent::Child { name, .. } => Some(name.as_str()),
                Constituent::Parent { .. } => None,
            })
            .collect()
    }

    /// Returns the failure recorded for the named constituent.
    #[must_use]
    pub fn failure_for(&self, name: &str) -> Option<&ConstituentFailure> {
        self.failures
            .iter()
            .find(|failure| failure.constituent.name() == name)
    }
}

/// The error type of every operation in this crate.
#[derive(Debug, Error)]
pub enum ArmError {
    /// A local precondition failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request produced no response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service returned an error.
    #[error(transparent)]
    Cloud(#[from] CloudError),

    /// A builder commit failed.
    #[error(transparent)]
    Commit(#[from] CommitError),

    /// No bearer token could be obtained.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// A success body could not be decoded.
    #[error("Failed to decode {type_name} from response with status {status}: {source}")]
    Decode {
        /// The status code of the response.
        status: u16,
        /// The declared success type.
        type_name: &'static str,
        /// The serde error.
        #[source]
        source: serde_json::Error,
    },

    /// A request body could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A registered success response had no body where a value is required.
    #[error("Response with status {status} has no body, expected {type_name}")]
    UnexpectedEmptyBody {
        /// The status code of the response.
        status: u16,
        /// The declared success type.
        type_name: &'static str,
    },

    /// A blocking or callback form was used without a suitable runtime.
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the problem.
        message: String,
    },
}

impl ArmError {
    /// Returns the service error, if this is a [`ArmError::Cloud`].
    #[must_use]
    pub const fn cloud_error(&self) -> Option<&CloudError> {
        match self {
            Self::Cloud(error) => Some(error),
            _ => None,
        }
    }

    /// Returns `true` for a service 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.cloud_error()
            .is_some_and(|error| error.kind() == CloudErrorKind::NotFound)
    }

    /// Returns `true` for errors raised before anything was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<HttpError> for ArmError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::InvalidRequest(e) => Self::Validation(ValidationError::InvalidRequest(e)),
            HttpError::Transport(e) => Self::Transport(e),
            HttpError::Credential(e) => Self::Credential(e),
        }
    }
}

impl From<ConfigError> for ArmError {
    fn from(error: ConfigError) -> Self {
        Self::Validation(ValidationError::Config(error))
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ArmError>();
    assert_send_sync::<CommitError>();
    assert_send_sync::<CloudError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(code: u16, body: &str) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("x-ms-request-id".to_string(), vec!["req-9".to_string()]);
        HttpResponse::new(code, headers, body)
    }

    #[test]
    fn test_cloud_error_from_wrapped_body() {
        let error = CloudError::from_response(&response(
            400,
            r#"{"error":{"code":"InvalidParameter","message":"bad origin","target":"origins","details":[{"code":"Sub","message":"m"}]}}"#,
        ));

        assert_eq!(error.status, 400);
        assert_eq!(error.code, "InvalidParameter");
        assert_eq!(error.message, "bad origin");
        assert_eq!(error.target.as_deref(), Some("origins"));
        assert_eq!(error.details.len(), 1);
        assert_eq!(error.request_id.as_deref(), Some("req-9"));
        assert_eq!(error.kind(), CloudErrorKind::BadRequest);
    }

    #[test]
    fn test_cloud_error_from_bare_body() {
        let error = CloudError::from_response(&response(
            404,
            r#"{"code":"ResourceNotFound","message":"gone"}"#,
        ));

        assert_eq!(error.code, "ResourceNotFound");
        assert_eq!(error.kind(), CloudErrorKind::NotFound);
    }

    #[test]
    fn test_cloud_error_from_unstructured_body() {
        let error = CloudError::from_response(&response(502, "Bad Gateway"));
        assert_eq!(error.code, "HttpStatus502");
        assert_eq!(error.message, "Bad Gateway");
        assert_eq!(error.kind(), CloudErrorKind::ServerError);

        let empty = CloudError::from_response(&response(409, ""));
        assert_eq!(empty.message, "(empty body)");
        assert_eq!(empty.kind(), CloudErrorKind::Conflict);
    }

    #[test]
    fn test_arm_error_helpers() {
        let not_found: ArmError = CloudError::from_response(&response(404, "")).into();
        assert!(not_found.is_not_found());
        assert!(!not_found.is_validation());

        let validation: ArmError = ValidationError::MissingBody {
            operation: "Profiles.create",
        }
        .into();
        assert!(validation.is_validation());
        assert!(validation.cloud_error().is_none());
    }

    #[test]
    fn test_http_error_conversion() {
        let error: ArmError = HttpError::from(TransportError::connection("refused")).into();
        assert!(matches!(error, ArmError::Transport(_)));

        let error: ArmError = HttpError::from(InvalidHttpRequestError::MissingBody {
            method: "PUT".to_string(),
        })
        .into();
        assert!(error.is_validation());
    }

    #[test]
    fn test_commit_error_names_failed_constituents() {
        let error = CommitError {
            resource: "profile1".to_string(),
            failures: vec![ConstituentFailure {
                constituent: Constituent::Child {
                    name: "ep2".to_string(),
                    action: CommitAction::Create,
                },
                error: CloudError::from_response(&response(409, "")).into(),
            }],
        };

        assert!(!error.parent_failed());
        assert_eq!(error.failed_children(), vec!["ep2"]);
        assert!(error.failure_for("ep2").is_some());
        assert!(error.failure_for("ep1").is_none());

        let message = error.to_string();
        assert!(message.contains("profile1"));
        assert!(message.contains("child 'ep2' (create)"));
        assert!(message.contains("409"));
    }
}
