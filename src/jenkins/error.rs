//! Error types for Jenkins operations

use thiserror::Error;

/// A single HTTP exchange that did not produce usable data
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The request never got a response
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("{status} {message}")]
    Status { status: u16, message: String },

    /// The response body was not what we expected
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl RemoteError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures of the job client's operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobError {
    /// A status or queue query failed
    #[error("{0}")]
    RemoteQuery(RemoteError),

    /// Jenkins refused the trigger request
    #[error("{0}")]
    Trigger(RemoteError),
}

impl JobError {
    /// The underlying remote failure
    pub fn cause(&self) -> &RemoteError {
        match self {
            Self::RemoteQuery(e) | Self::Trigger(e) => e,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        self.cause().status_code()
    }
}
