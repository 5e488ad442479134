//! Error taxonomy for the job layer.
//!
//! Every failure a job or the dispatcher can produce is a variant here,
//! with a stable kind string for callers that branch on the error class
//! and the HTTP status the (external) routing layer maps it to. The
//! dispatcher never swallows or downgrades one of these; each error is
//! scoped to the single request that produced it.

use thiserror::Error;

/// Result alias used throughout the job layer.
pub type ApiResult<T> = Result<T, ApiError>;

/// Typed failure of a job invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Required arguments are missing from the argument set.
    #[error("Required argument(s) missing: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    /// An argument is present but violates a business rule.
    #[error("{0}")]
    Policy(String),

    /// The job requires an authenticated caller.
    #[error("Not logged in")]
    Authentication,

    /// The job requires the caller to have a confirmed e-mail address.
    #[error("Need e-mail address confirmation to continue")]
    UnconfirmedEmail,

    /// The caller's access rank is below the resolved privilege threshold.
    /// The payload names the privilege that failed.
    #[error("Insufficient privileges")]
    InsufficientPrivilege(String),

    /// Uniqueness violation on a user name.
    #[error("User with this name is already registered")]
    DuplicateName(String),

    /// Uniqueness violation on a confirmed e-mail address.
    #[error("User with this e-mail is already registered")]
    DuplicateEmail(String),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Failure in the storage layer or another internal collaborator.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Creates a policy error with a message.
    pub fn policy(msg: impl Into<String>) -> Self {
        Self::Policy(msg.into())
    }

    /// Creates a not-found error with a message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates an internal error with a message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable kind identifier callers branch on.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "ValidationError",
            ApiError::Policy(_) => "PolicyError",
            ApiError::Authentication => "AuthenticationError",
            ApiError::UnconfirmedEmail => "UnconfirmedEmailError",
            ApiError::InsufficientPrivilege(_) => "InsufficientPrivilegeError",
            ApiError::DuplicateName(_) => "DuplicateNameError",
            ApiError::DuplicateEmail(_) => "DuplicateEmailError",
            ApiError::NotFound(_) => "NotFoundError",
            ApiError::Internal(_) => "InternalError",
        }
    }

    /// HTTP status the routing layer maps this error to.
    pub fn http_status(&self) -> u16 {
        match self {
            ApiError::Validation { .. } | ApiError::Policy(_) => 400,
            ApiError::Authentication => 401,
            ApiError::UnconfirmedEmail | ApiError::InsufficientPrivilege(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::DuplicateName(_) | ApiError::DuplicateEmail(_) => 409,
            ApiError::Internal(_) => 500,
        }
    }
}
