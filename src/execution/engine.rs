//! Trigger engine - runs the five-stage build pipeline

use crate::{
    core::{BuildContext, Stage, StageRecord, Verbosity},
    execution::{ProgressTicker, StageError, StageExecutor, StageResult},
    jenkins::{HttpTransport, JenkinsJob},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Events that can occur during a run
#[derive(Debug, Clone)]
pub enum TriggerEvent {
    PipelineStarted {
        run_id: Uuid,
        job_url: String,
        verbosity: Verbosity,
    },
    StageStarted {
        stage: Stage,
    },
    /// Emitted once per second while a waiting stage blocks
    StageProgress {
        stage: Stage,
        elapsed_secs: u64,
    },
    StageCompleted {
        stage: Stage,
        title: String,
    },
    StageFailed {
        stage: Stage,
        error: String,
    },
    PipelineFinished {
        run_id: Uuid,
        exit_code: i32,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(TriggerEvent) + Send + Sync>;

/// Deliver `event` to every handler
pub(crate) fn emit_to(handlers: &[EventHandler], event: &TriggerEvent) {
    for handler in handlers {
        handler(event.clone());
    }
}

/// The stage a run stopped at, and why
#[derive(Debug, Clone, Serialize)]
pub struct StageFailure {
    pub stage: Stage,
    pub message: String,
    #[serde(skip)]
    pub error: StageError,
}

/// Final result of a run
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutcome {
    pub run_id: Uuid,
    pub exit_code: i32,
    pub context: BuildContext,
    pub failure: Option<StageFailure>,
    pub stages: Vec<StageRecord>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none() && self.exit_code == 0
    }

    pub fn console_text(&self) -> Option<&str> {
        self.context.console_text.as_deref()
    }
}

/// Runs the trigger pipeline against one job
pub struct TriggerEngine<T> {
    executor: StageExecutor<T>,
    event_handlers: Vec<EventHandler>,
}

impl<T: HttpTransport> TriggerEngine<T> {
    pub fn new(job: JenkinsJob<T>, poll_interval: Duration) -> Self {
        Self {
            executor: StageExecutor::new(job, poll_interval),
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(TriggerEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    pub fn job_url(&self) -> &str {
        self.executor.job().url()
    }

    fn emit_event(&self, event: TriggerEvent) {
        emit_to(&self.event_handlers, &event);
    }

    /// Trigger a build and follow it to completion
    ///
    /// Stages run strictly in order and the first failure stops the run.
    /// `verbosity` is passed through to event handlers only.
    pub async fn run(&self, build_parameters: HashMap<String, String>, verbosity: Verbosity) -> BuildOutcome {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        info!("Starting run {} for {}", run_id, self.job_url());
        self.emit_event(TriggerEvent::PipelineStarted {
            run_id,
            job_url: self.job_url().to_string(),
            verbosity,
        });

        let mut context = BuildContext::new(build_parameters);
        let mut stages = Vec::with_capacity(Stage::ALL.len());
        let mut failure = None;

        for stage in Stage::ALL {
            self.emit_event(TriggerEvent::StageStarted { stage });
            let stage_started = Utc::now();

            let result = {
                let _ticker = stage
                    .is_waiting()
                    .then(|| ProgressTicker::start(stage, self.event_handlers.clone()));
                self.executor.execute(stage, context).await
            };

            match result {
                StageResult::Completed { context: next, title } => {
                    info!("[{}] {}", stage, title);
                    stages.push(StageRecord::succeeded(stage, title.clone(), stage_started));
                    self.emit_event(TriggerEvent::StageCompleted { stage, title });
                    context = next;
                }
                StageResult::Failed { context: next, error } => {
                    let message = error.to_string();
                    debug!("[{}] {}", stage, message);
                    stages.push(StageRecord::failed(stage, message.clone(), stage_started));
                    self.emit_event(TriggerEvent::StageFailed {
                        stage,
                        error: message.clone(),
                    });
                    context = next;
                    failure = Some(StageFailure { stage, message, error });
                    break;
                }
            }
        }

        let exit_code = match &failure {
            Some(failure) => failure.error.exit_code(),
            None => context.exit_code.unwrap_or(0),
        };

        info!("Run {} finished with exit code {}", run_id, exit_code);
        self.emit_event(TriggerEvent::PipelineFinished { run_id, exit_code });

        BuildOutcome {
            run_id,
            exit_code,
            context,
            failure,
            stages,
            started_at,
            finished_at: Utc::now(),
        }
    }
}
