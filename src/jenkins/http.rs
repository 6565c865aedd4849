//! reqwest-backed transport

use crate::core::Credentials;
use crate::jenkins::{HttpResponse, HttpTransport, RemoteError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Timeout for each request
    pub timeout: Duration,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: crate::core::config::DEFAULT_REQUEST_TIMEOUT,
            user_agent: concat!("jenkins-wait/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP transport over a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: TransportConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| RemoteError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn send(&self, request: RequestBuilder, auth: Option<&Credentials>) -> Result<HttpResponse, RemoteError> {
        let request = match auth {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(format!("Failed to read response body: {}", e)))?;

        debug!("HTTP {} ({} bytes)", status, body.len());
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, auth: Option<&Credentials>) -> Result<HttpResponse, RemoteError> {
        debug!("GET {}", url);
        self.send(self.client.get(url), auth).await
    }

    async fn post(
        &self,
        url: &str,
        auth: Option<&Credentials>,
        form: Option<&HashMap<String, String>>,
    ) -> Result<HttpResponse, RemoteError> {
        debug!("POST {}", url);
        let request = match form {
            Some(form) => self.client.post(url).form(form),
            None => self.client.post(url),
        };
        self.send(request, auth).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_config_builder() {
        let config = TransportConfig::new().with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.user_agent.starts_with("jenkins-wait/"));
    }

    #[test]
    fn test_transport_builds() {
        assert!(ReqwestTransport::new(TransportConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let transport =
            ReqwestTransport::new(TransportConfig::new().with_timeout(Duration::from_secs(2))).unwrap();
        let result = transport.get("http://127.0.0.1:9/api/json", None).await;
        assert!(matches!(result, Err(RemoteError::Transport(_))));
    }
}
