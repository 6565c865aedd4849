//! Operations against a single Jenkins job

use crate::core::JobIdentity;
use crate::execution::delay::delay;
use crate::jenkins::api::{BuildSummary, JobSummary};
use crate::jenkins::{HttpTransport, JobError, RemoteError};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client for one Jenkins job
///
/// Every request targets the job's canonical URL (or a build URL Jenkins
/// reported for it) and carries the identity's credentials, if any.
pub struct JenkinsJob<T> {
    identity: JobIdentity,
    transport: T,
}

/// Join a Jenkins URL and a sub-path, tolerating a trailing slash
fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

fn parse_json<D: DeserializeOwned>(body: &str) -> Result<D, RemoteError> {
    serde_json::from_str(body).map_err(|e| RemoteError::Parse(e.to_string()))
}

impl<T: HttpTransport> JenkinsJob<T> {
    pub fn new(identity: JobIdentity, transport: T) -> Self {
        Self { identity, transport }
    }

    /// Canonical URL of the job
    pub fn url(&self) -> &str {
        self.identity.url()
    }

    /// GET a JSON document, treating any non-2xx status as an error
    async fn get_json<D: DeserializeOwned>(&self, url: &str) -> Result<D, RemoteError> {
        let response = self
            .transport
            .get(url, self.identity.credentials())
            .await?
            .error_for_status()?;
        parse_json(&response.body)
    }

    async fn job_summary(&self) -> Result<JobSummary, JobError> {
        self.get_json(&endpoint(self.url(), "api/json"))
            .await
            .map_err(JobError::RemoteQuery)
    }

    async fn build_summary(&self, build_url: &str) -> Result<BuildSummary, JobError> {
        self.get_json(&endpoint(build_url, "api/json"))
            .await
            .map_err(JobError::RemoteQuery)
    }

    /// Whether the job can be read
    ///
    /// Any failure, including a network error, reads as `false`.
    pub async fn exists(&self) -> bool {
        let url = endpoint(self.url(), "api/json");
        match self.get_json::<serde_json::Value>(&url).await {
            Ok(_) => true,
            Err(e) => {
                debug!("Job {} not readable: {}", self.url(), e);
                false
            }
        }
    }

    /// The number Jenkins will give the next build of this job
    pub async fn next_build_number(&self) -> Result<u64, JobError> {
        let summary = self.job_summary().await?;
        summary.next_build_number.ok_or_else(|| {
            JobError::RemoteQuery(RemoteError::Parse(
                "response has no nextBuildNumber".to_string(),
            ))
        })
    }

    /// Queue a build, with parameters if any are given
    pub async fn trigger(&self, parameters: &HashMap<String, String>) -> Result<(), JobError> {
        let (url, form) = if parameters.is_empty() {
            (endpoint(self.url(), "build"), None)
        } else {
            (endpoint(self.url(), "buildWithParameters"), Some(parameters))
        };

        info!("Triggering {} ({} parameters)", url, parameters.len());

        let response = self
            .transport
            .post(&url, self.identity.credentials(), form)
            .await
            .map_err(JobError::Trigger)?;

        response.error_for_status().map_err(JobError::Trigger)?;
        Ok(())
    }

    /// Poll until build `build_number` is listed and has started
    ///
    /// Returns the build's URL. There is no attempt cap: if Jenkins never
    /// lists that number this loops forever.
    pub async fn await_start(&self, build_number: u64, poll_interval: Duration) -> Result<String, JobError> {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            let summary = self.job_summary().await?;

            match summary.build(build_number) {
                Some(build) => {
                    let status = self.build_summary(&build.url).await?;
                    if status.duration > 0.0 {
                        info!("Build #{} started at {}", build_number, build.url);
                        return Ok(build.url.clone());
                    }
                    debug!("Build #{} listed but not started (poll {})", build_number, attempt);
                }
                None => {
                    debug!("Build #{} not listed yet (poll {})", build_number, attempt);
                }
            }

            delay(poll_interval, ()).await;
        }
    }

    /// Poll until the build at `build_url` reports a result
    ///
    /// Returns the result label and, if it could be fetched, the console log.
    pub async fn await_completion(
        &self,
        build_url: &str,
        poll_interval: Duration,
    ) -> Result<(String, Option<String>), JobError> {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            let status = self.build_summary(build_url).await?;

            if let Some(result) = status.result {
                info!("Build {} finished: {}", build_url, result);
                let console = self.console_text(build_url).await;
                return Ok((result, console));
            }

            debug!("Build {} still running (poll {})", build_url, attempt);
            delay(poll_interval, ()).await;
        }
    }

    /// Console log of a build, or `None` if it could not be fetched
    async fn console_text(&self, build_url: &str) -> Option<String> {
        let url = endpoint(build_url, "consoleText");
        let result = match self.transport.get(&url, self.identity.credentials()).await {
            Ok(response) => response.error_for_status().map(|r| r.body),
            Err(e) => Err(e),
        };

        match result {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Could not fetch console text from {}: {}", url, e);
                None
            }
        }
    }
}
