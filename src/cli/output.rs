//! CLI output formatting

use crate::{
    core::{Stage, Verbosity},
    execution::{BuildOutcome, TriggerEvent},
};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a spinner for a running stage
pub fn create_spinner(stage: Stage) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_prefix(format_stage_prefix(stage));
    spinner.set_message(stage.title());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// `[N/5]` position marker for a stage
pub fn format_stage_prefix(stage: Stage) -> String {
    style(format!("[{}/{}]", stage.position(), Stage::ALL.len()))
        .dim()
        .to_string()
}

/// Message shown while a stage waits
pub fn format_waiting(stage: Stage, elapsed_secs: u64) -> String {
    format!("{} (waiting for {}s)", stage.title(), elapsed_secs)
}

/// Format a trigger event as a single line
pub fn format_trigger_event(event: &TriggerEvent) -> String {
    match event {
        TriggerEvent::PipelineStarted { run_id, job_url, .. } => format!(
            "{} Triggering {} ({})",
            ROCKET,
            style(job_url).bold(),
            style(&run_id.to_string()[..8]).dim()
        ),
        TriggerEvent::StageStarted { stage } => {
            format!("{} {} {}", SPINNER, format_stage_prefix(*stage), style(stage.title()).cyan())
        }
        TriggerEvent::StageProgress { stage, elapsed_secs } => {
            format!("{} {}", INFO, style(format_waiting(*stage, *elapsed_secs)).dim())
        }
        TriggerEvent::StageCompleted { stage, title } => {
            format!("{} {} {}", CHECK, format_stage_prefix(*stage), style(title).green())
        }
        TriggerEvent::StageFailed { stage, error } => {
            format!("{} {} {}", CROSS, format_stage_prefix(*stage), style(error).red())
        }
        TriggerEvent::PipelineFinished { run_id, exit_code } => {
            let status = if *exit_code == 0 {
                style("succeeded".to_string()).green()
            } else {
                style(format!("failed (exit code {})", exit_code)).red()
            };
            format!(
                "{} Run ({}) {}",
                INFO,
                style(&run_id.to_string()[..8]).dim(),
                status
            )
        }
    }
}

/// Renders trigger events to the terminal
///
/// Silent shows nothing, Default keeps a spinner per stage, Verbose prints
/// one line per event. The level is taken from `PipelineStarted`.
/// Spinners are only drawn when stderr is a terminal; otherwise Default
/// prints stage results as plain lines.
pub struct Renderer {
    state: Mutex<RenderState>,
}

#[derive(Default)]
struct RenderState {
    verbosity: Verbosity,
    interactive: bool,
    spinner: Option<ProgressBar>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_interactive(console::user_attended_stderr())
    }

    /// Renderer with terminal detection overridden
    pub fn with_interactive(interactive: bool) -> Self {
        Self {
            state: Mutex::new(RenderState {
                interactive,
                ..RenderState::default()
            }),
        }
    }

    pub fn handle(&self, event: TriggerEvent) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        if let TriggerEvent::PipelineStarted { verbosity, .. } = &event {
            state.verbosity = *verbosity;
        }

        match state.verbosity {
            Verbosity::Silent => {
                if let TriggerEvent::StageFailed { .. } = &event {
                    println!("{}", format_trigger_event(&event));
                }
            }
            Verbosity::Verbose => println!("{}", format_trigger_event(&event)),
            Verbosity::Default => Self::render_default(&mut state, &event),
        }
    }

    fn render_default(state: &mut RenderState, event: &TriggerEvent) {
        if !state.interactive {
            if !matches!(event, TriggerEvent::StageStarted { .. } | TriggerEvent::StageProgress { .. }) {
                println!("{}", format_trigger_event(event));
            }
            return;
        }

        match event {
            TriggerEvent::StageStarted { stage } => {
                if let Some(previous) = state.spinner.take() {
                    previous.finish_and_clear();
                }
                state.spinner = Some(create_spinner(*stage));
            }
            TriggerEvent::StageProgress { stage, elapsed_secs } => {
                if let Some(spinner) = &state.spinner {
                    spinner.set_message(format_waiting(*stage, *elapsed_secs));
                }
            }
            TriggerEvent::StageCompleted { .. } | TriggerEvent::StageFailed { .. } => {
                let line = format_trigger_event(event);
                match state.spinner.take() {
                    Some(spinner) => spinner.finish_with_message(line),
                    None => println!("{}", line),
                }
            }
            TriggerEvent::PipelineStarted { .. } | TriggerEvent::PipelineFinished { .. } => {
                println!("{}", format_trigger_event(event));
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Horizontal rule as wide as the terminal
pub fn separator() -> String {
    let width = term_size::dimensions_stdout().map(|(w, _)| w).unwrap_or(80);
    "─".repeat(width)
}

/// Console text framed by separators
pub fn format_console_text(text: &str) -> String {
    let rule = style(separator()).dim().to_string();
    format!("{}\n{}\n{}", rule, text.trim_end(), rule)
}

/// Closing summary of a successful run
///
/// Failures are already reported by the renderer when the stage fails, so
/// nothing is returned for them. Silent runs print no summary. Verbose runs
/// list how long each stage took.
pub fn format_outcome(outcome: &BuildOutcome, verbosity: Verbosity) -> Option<String> {
    if outcome.failure.is_some() || verbosity == Verbosity::Silent {
        return None;
    }

    let mut summary = format!(
        "{} Build {} {}",
        CHECK,
        outcome.context.build_url.as_deref().unwrap_or("?"),
        style(outcome.context.build_status.as_deref().unwrap_or("SUCCESS")).green()
    );
    if verbosity == Verbosity::Verbose {
        for record in &outcome.stages {
            summary.push_str(&format!(
                "\n   {} {} ({:.1}s)",
                format_stage_prefix(record.stage),
                record.title,
                record.elapsed().num_milliseconds() as f64 / 1000.0
            ));
        }
    }
    Some(summary)
}
