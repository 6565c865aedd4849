//! Jenkins job client
//!
//! [`JenkinsJob`] talks to one job through an [`HttpTransport`], so the
//! polling logic can run against scripted responses in tests and against
//! [`ReqwestTransport`] in production.

pub mod api;
pub mod error;
pub mod http;
pub mod job;

use crate::core::Credentials;
use async_trait::async_trait;
use std::collections::HashMap;

pub use error::{JobError, RemoteError};
pub use http::{ReqwestTransport, TransportConfig};
pub use job::JenkinsJob;

/// Status and body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Convert a non-2xx response into a [`RemoteError::Status`]
    pub fn error_for_status(self) -> Result<Self, RemoteError> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = self.body.trim().to_string();
            Err(RemoteError::status(self.status, message))
        }
    }
}

/// Logical HTTP operations the job client needs
///
/// Implementations return `Ok` for any response the server sent, whatever
/// its status; `Err` is reserved for requests that got no response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, auth: Option<&Credentials>) -> Result<HttpResponse, RemoteError>;

    /// POST, form-encoding `form` when given
    async fn post(
        &self,
        url: &str,
        auth: Option<&Credentials>,
        form: Option<&HashMap<String, String>>,
    ) -> Result<HttpResponse, RemoteError>;
}
