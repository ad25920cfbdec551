//! Error types for the query engine and the service boundary.
//!
//! `QueryError` is raised inside the engine. The boundary converts it into a
//! `Status` (what the server answers), and callers of a remote binding see a
//! `CallError`, which additionally separates transport failures from answers.

use crate::storage::types::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Engine-level errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    /// Year range reversed or outside the supported interval.
    #[error("invalid year range: {message}")]
    InvalidRange { message: String },

    /// Missing or unrecognized request field.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The index handed out an id the store does not hold.
    #[error("index references missing record {id}")]
    DanglingRecord { id: RecordId },

    /// The snapshot could not be read.
    #[error("snapshot unavailable: {message}")]
    Unavailable { message: String },
}

impl QueryError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        QueryError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_range(message: impl Into<String>) -> Self {
        QueryError::InvalidRange {
            message: message.into(),
        }
    }

    /// Boundary code for this error.
    pub fn code(&self) -> Code {
        match self {
            QueryError::InvalidRange { .. } | QueryError::InvalidArgument { .. } => {
                Code::InvalidArgument
            }
            QueryError::DanglingRecord { .. } | QueryError::Unavailable { .. } => Code::Internal,
        }
    }
}

/// Failure classes a server can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    InvalidArgument,
    Internal,
    DeadlineExceeded,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::Internal => "INTERNAL",
            Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
        };
        f.write_str(name)
    }
}

/// A failure answered by the service, with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct Status {
    pub code: Code,
    pub message: String,
}

impl Status {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Code::Internal, message)
    }
}

impl From<QueryError> for Status {
    fn from(err: QueryError) -> Self {
        Status::new(err.code(), err.to_string())
    }
}

/// What a caller of `LaureateService` can get back instead of a response.
#[derive(Debug, Error)]
pub enum CallError {
    /// The service was reached and answered with a failure.
    #[error("{0}")]
    Status(#[from] Status),

    /// The service could not be reached.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// No answer arrived within the caller's budget.
    #[error("call timed out after {elapsed:?}")]
    Timeout { elapsed: Duration },

    /// Something answered, but not with a response this client understands.
    #[error("malformed response: {message}")]
    Malformed { message: String },
}

impl CallError {
    /// True when the failure happened before the service could answer.
    pub fn is_transport(&self) -> bool {
        !matches!(self, CallError::Status(_))
    }

    pub fn status(&self) -> Option<&Status> {
        match self {
            CallError::Status(status) => Some(status),
            _ => None,
        }
    }
}

impl From<QueryError> for CallError {
    fn from(err: QueryError) -> Self {
        CallError::Status(err.into())
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
