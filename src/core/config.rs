//! Trigger configuration - the plain record the CLI hands to the core

use crate::core::identity::{ConfigError, JobIdentity};
use std::time::Duration;

/// Default delay between polls of the Jenkins API
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Default timeout for a single HTTP request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to trigger and follow one build
#[derive(Clone)]
pub struct TriggerConfig {
    /// Jenkins host, with or without protocol
    pub base_jenkins: String,

    /// Path of the job below the host, e.g. `job/myproject`
    pub job_location: String,

    pub username: Option<String>,

    pub password: Option<String>,

    /// Use `https://` rather than `http://`
    pub use_https: bool,

    /// Delay between successive polls while waiting
    pub poll_interval: Duration,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
}

impl std::fmt::Debug for TriggerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerConfig")
            .field("base_jenkins", &self.base_jenkins)
            .field("job_location", &self.job_location)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("use_https", &self.use_https)
            .field("poll_interval", &self.poll_interval)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl TriggerConfig {
    pub fn new(base_jenkins: impl Into<String>, job_location: impl Into<String>) -> Self {
        Self {
            base_jenkins: base_jenkins.into(),
            job_location: job_location.into(),
            username: None,
            password: None,
            use_https: true,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    pub fn with_https(mut self, use_https: bool) -> Self {
        self.use_https = use_https;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Build the job identity this configuration points at
    pub fn identity(&self) -> Result<JobIdentity, ConfigError> {
        JobIdentity::new(
            self.base_jenkins.clone(),
            self.job_location.clone(),
            self.use_https,
            self.username.clone(),
            self.password.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TriggerConfig::new("ci.example.com", "job/app");
        assert!(config.use_https);
        assert_eq!(config.poll_interval, Duration::from_millis(1000));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.username.is_none());
    }

    #[test]
    fn test_builder_and_identity() {
        let config = TriggerConfig::new("http://ci.example.com/", "/job/app/")
            .with_https(false)
            .with_credentials(Some("bob".into()), Some("secret".into()))
            .with_poll_interval(Duration::from_millis(250));

        let identity = config.identity().unwrap();
        assert_eq!(identity.url(), "http://ci.example.com/job/app");
        assert!(identity.credentials().is_some());
        assert_eq!(config.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_identity_rejects_partial_credentials() {
        let config = TriggerConfig::new("ci", "job/app").with_credentials(Some("bob".into()), None);
        assert_eq!(config.identity().unwrap_err(), ConfigError::PartialCredentials);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = TriggerConfig::new("ci", "job/app")
            .with_credentials(Some("bob".into()), Some("hunter2".into()));
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
