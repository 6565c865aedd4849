//! jenkins-wait - trigger a Jenkins job and wait for the build it started

pub mod cli;
pub mod core;
pub mod execution;
pub mod jenkins;

// Re-export commonly used types
pub use self::core::{BuildContext, JobIdentity, Stage, TriggerConfig, Verbosity};
pub use execution::{BuildOutcome, StageError, TriggerEngine, TriggerEvent};
pub use jenkins::{HttpResponse, HttpTransport, JenkinsJob, JobError, RemoteError, ReqwestTransport};
