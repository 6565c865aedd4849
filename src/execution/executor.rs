//! Stage executor - runs individual pipeline stages against the job client

use crate::{
    core::{exit_code_for, BuildContext, Stage},
    jenkins::{HttpTransport, JenkinsJob, JobError},
};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a stage failed, prefixed with the lifecycle phase it happened in
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StageError {
    #[error("Cannot find project, or unable to authenticate")]
    ProjectNotFound,

    #[error("Error getting build number: {0}")]
    BuildNumber(JobError),

    #[error("Error triggering the job: {0}")]
    Trigger(JobError),

    #[error("Error waiting for the build to start: {0}")]
    AwaitStart(JobError),

    #[error("Error getting build status: {0}")]
    BuildStatus(JobError),

    #[error("Build not successful: {label}")]
    BuildUnsuccessful { label: String, exit_code: i32 },

    #[error("The {stage} stage needs {field}, which no earlier stage recorded")]
    MissingContext { stage: Stage, field: &'static str },
}

impl StageError {
    /// Exit code the process should report for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            StageError::BuildUnsuccessful { exit_code, .. } => *exit_code,
            _ => 1,
        }
    }

    /// HTTP status behind the failure, if there was one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            StageError::BuildNumber(e)
            | StageError::Trigger(e)
            | StageError::AwaitStart(e)
            | StageError::BuildStatus(e) => e.status_code(),
            _ => None,
        }
    }
}

/// Result of executing a stage
///
/// The context is handed back either way so later reporting can see what
/// the stage recorded before failing.
#[derive(Debug, Clone)]
pub enum StageResult {
    /// Stage succeeded; `title` replaces the stage's running title
    Completed { context: BuildContext, title: String },
    /// Stage failed; the pipeline must stop here
    Failed { context: BuildContext, error: StageError },
}

impl StageResult {
    fn failed(context: BuildContext, error: StageError) -> Self {
        StageResult::Failed { context, error }
    }
}

/// Executes single stages
pub struct StageExecutor<T> {
    job: JenkinsJob<T>,
    poll_interval: Duration,
}

impl<T: HttpTransport> StageExecutor<T> {
    pub fn new(job: JenkinsJob<T>, poll_interval: Duration) -> Self {
        Self { job, poll_interval }
    }

    pub fn job(&self) -> &JenkinsJob<T> {
        &self.job
    }

    /// Run `stage` with the context produced by the stages before it
    pub async fn execute(&self, stage: Stage, context: BuildContext) -> StageResult {
        debug!("Executing stage: {}", stage);
        match stage {
            Stage::Discover => self.discover(context).await,
            Stage::Allocate => self.allocate(context).await,
            Stage::Trigger => self.trigger(context).await,
            Stage::AwaitStart => self.await_start(context).await,
            Stage::AwaitCompletion => self.await_completion(context).await,
        }
    }

    async fn discover(&self, context: BuildContext) -> StageResult {
        if !self.job.exists().await {
            return StageResult::failed(context, StageError::ProjectNotFound);
        }
        StageResult::Completed {
            context,
            title: "Project found".to_string(),
        }
    }

    async fn allocate(&self, mut context: BuildContext) -> StageResult {
        let number = match self.job.next_build_number().await {
            Ok(number) => number,
            Err(e) => return StageResult::failed(context, StageError::BuildNumber(e)),
        };

        if !context.record_build_number(number) {
            warn!(
                "Build number already captured as {:?}; ignoring {}",
                context.next_build_number, number
            );
        }

        let title = match context.next_build_number {
            Some(n) => format!("Next build number will be {}", n),
            None => format!("Next build number will be {}", number),
        };
        StageResult::Completed { context, title }
    }

    async fn trigger(&self, context: BuildContext) -> StageResult {
        if let Err(e) = self.job.trigger(&context.build_parameters).await {
            return StageResult::failed(context, StageError::Trigger(e));
        }

        let title = match context.next_build_number {
            Some(n) => format!("Job added to the queue => {}/{}", self.job.url(), n),
            None => format!("Job added to the queue => {}", self.job.url()),
        };
        StageResult::Completed { context, title }
    }

    async fn await_start(&self, mut context: BuildContext) -> StageResult {
        let Some(number) = context.next_build_number else {
            return StageResult::failed(
                context,
                StageError::MissingContext {
                    stage: Stage::AwaitStart,
                    field: "next_build_number",
                },
            );
        };

        match self.job.await_start(number, self.poll_interval).await {
            Ok(url) => {
                context.record_build_url(url);
                StageResult::Completed {
                    context,
                    title: "Build started".to_string(),
                }
            }
            Err(e) => StageResult::failed(context, StageError::AwaitStart(e)),
        }
    }

    async fn await_completion(&self, mut context: BuildContext) -> StageResult {
        let Some(url) = context.build_url.clone() else {
            return StageResult::failed(
                context,
                StageError::MissingContext {
                    stage: Stage::AwaitCompletion,
                    field: "build_url",
                },
            );
        };

        let (label, console_text) = match self.job.await_completion(&url, self.poll_interval).await {
            Ok(finished) => finished,
            Err(e) => return StageResult::failed(context, StageError::BuildStatus(e)),
        };

        let exit_code = exit_code_for(&label);
        info!("Build {} result {} (exit code {})", url, label, exit_code);
        context.record_result(label.clone(), console_text, exit_code);

        if exit_code != 0 {
            return StageResult::failed(context, StageError::BuildUnsuccessful { label, exit_code });
        }

        StageResult::Completed {
            context,
            title: format!("Build {}", label),
        }
    }
}
