//! Test utilities: a scripted HTTP transport and job fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use jenkins_wait::core::Credentials;
use jenkins_wait::{HttpResponse, HttpTransport, JenkinsJob, JobIdentity, RemoteError};
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub const JOB_URL: &str = "https://ci.example.com/job/app";

/// One request the mock received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub form: Option<HashMap<String, String>>,
    pub authenticated: bool,
}

type Reply = Result<HttpResponse, RemoteError>;

/// Transport that answers from per-URL scripts
///
/// Each `(method, url)` has a queue of replies. Replies are consumed in
/// order; the last one repeats forever. Unscripted URLs answer 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    scripts: Arc<Mutex<HashMap<(&'static str, String), VecDeque<Reply>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: &'static str, url: &str, reply: Reply) -> &Self {
        self.scripts
            .lock()
            .unwrap()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn on_get(&self, url: &str, status: u16, body: impl Into<String>) -> &Self {
        self.push("GET", url, Ok(HttpResponse::new(status, body)))
    }

    pub fn on_get_json(&self, url: &str, body: serde_json::Value) -> &Self {
        self.on_get(url, 200, body.to_string())
    }

    pub fn on_get_error(&self, url: &str, message: &str) -> &Self {
        self.push("GET", url, Err(RemoteError::Transport(message.to_string())))
    }

    pub fn on_post(&self, url: &str, status: u16) -> &Self {
        self.push("POST", url, Ok(HttpResponse::new(status, "")))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, url: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    fn reply(&self, request: RecordedRequest) -> Reply {
        let key = (request.method, request.url.clone());
        self.requests.lock().unwrap().push(request);

        let mut scripts = self.scripts.lock().unwrap();
        let not_found = || Ok(HttpResponse::new(404, "Not Found"));
        let Some(queue) = scripts.get_mut(&key) else {
            return not_found();
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap_or_else(not_found)
        } else {
            queue.front().cloned().unwrap_or_else(not_found)
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str, auth: Option<&Credentials>) -> Result<HttpResponse, RemoteError> {
        self.reply(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            form: None,
            authenticated: auth.is_some(),
        })
    }

    async fn post(
        &self,
        url: &str,
        auth: Option<&Credentials>,
        form: Option<&HashMap<String, String>>,
    ) -> Result<HttpResponse, RemoteError> {
        self.reply(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            form: form.cloned(),
            authenticated: auth.is_some(),
        })
    }
}

pub fn identity() -> JobIdentity {
    JobIdentity::new("ci.example.com", "job/app", true, None, None).unwrap()
}

pub fn job(transport: &MockTransport) -> JenkinsJob<MockTransport> {
    JenkinsJob::new(identity(), transport.clone())
}

pub fn job_api() -> String {
    format!("{}/api/json", JOB_URL)
}

pub fn build_url(number: u64) -> String {
    format!("{}/{}/", JOB_URL, number)
}

pub fn build_api(number: u64) -> String {
    format!("{}/{}/api/json", JOB_URL, number)
}

pub fn console_url(number: u64) -> String {
    format!("{}/{}/consoleText", JOB_URL, number)
}

/// Job listing with the given next number and listed builds
pub fn job_listing(next_build_number: u64, listed: &[u64]) -> serde_json::Value {
    let builds: Vec<_> = listed
        .iter()
        .map(|n| json!({ "number": n, "url": build_url(*n) }))
        .collect();
    json!({
        "_class": "hudson.model.FreeStyleProject",
        "nextBuildNumber": next_build_number,
        "builds": builds,
    })
}

pub fn build_status(duration: u64, result: Option<&str>) -> serde_json::Value {
    json!({ "duration": duration, "result": result })
}

/// Script a full run for build `number` ending in `result`
pub fn script_build(transport: &MockTransport, number: u64, result: &str) {
    script_build_with_polls(transport, number, result, 1);
}

/// Like [`script_build`], with `running_polls` polls before the result
pub fn script_build_with_polls(transport: &MockTransport, number: u64, result: &str, running_polls: usize) {
    // discover and allocate see the job before the trigger, await_start after
    transport
        .on_get_json(&job_api(), job_listing(number, &[]))
        .on_get_json(&job_api(), job_listing(number, &[]))
        .on_get_json(&job_api(), job_listing(number + 1, &[number]));
    transport.on_post(&format!("{}/build", JOB_URL), 201);
    transport.on_post(&format!("{}/buildWithParameters", JOB_URL), 201);
    // started, then still running for a few polls, then finished
    transport.on_get_json(&build_api(number), build_status(1, None));
    for _ in 0..running_polls {
        transport.on_get_json(&build_api(number), build_status(5, None));
    }
    transport.on_get_json(&build_api(number), build_status(1200, Some(result)));
    transport.on_get(&console_url(number), 200, format!("Started by user\nFinished: {}\n", result));
}
