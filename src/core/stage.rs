//! Pipeline stages and rendering verbosity

use serde::Serialize;
use std::fmt;

/// One phase of the build lifecycle, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Check that the job exists and we can read it
    Discover,
    /// Capture the number the next build will get
    Allocate,
    /// Ask Jenkins to queue a build
    Trigger,
    /// Wait for the captured build number to start
    AwaitStart,
    /// Wait for the build to produce a result
    AwaitCompletion,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 5] = [
        Stage::Discover,
        Stage::Allocate,
        Stage::Trigger,
        Stage::AwaitStart,
        Stage::AwaitCompletion,
    ];

    /// Title shown while the stage is running
    pub fn title(&self) -> &'static str {
        match self {
            Stage::Discover => "Finding the project",
            Stage::Allocate => "Getting next build number",
            Stage::Trigger => "Triggering build job",
            Stage::AwaitStart => "Waiting for build to start",
            Stage::AwaitCompletion => "Waiting for build to finish",
        }
    }

    /// Whether the stage blocks on a polling loop
    pub fn is_waiting(&self) -> bool {
        matches!(self, Stage::AwaitStart | Stage::AwaitCompletion)
    }

    /// 1-indexed position in the pipeline
    pub fn position(&self) -> usize {
        Stage::ALL.iter().position(|s| s == self).map_or(0, |i| i + 1)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Discover => "discover",
            Stage::Allocate => "allocate",
            Stage::Trigger => "trigger",
            Stage::AwaitStart => "await-start",
            Stage::AwaitCompletion => "await-completion",
        };
        f.write_str(name)
    }
}

/// How much the renderer should show
///
/// Only presentation reads this; it never changes what the pipeline does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Silent,
    #[default]
    Default,
    Verbose,
}

impl Verbosity {
    /// Verbose wins over silent
    pub fn from_flags(silent: bool, verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else if silent {
            Verbosity::Silent
        } else {
            Verbosity::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        assert_eq!(Stage::ALL[0], Stage::Discover);
        assert_eq!(Stage::ALL[4], Stage::AwaitCompletion);
        assert_eq!(Stage::Discover.position(), 1);
        assert_eq!(Stage::AwaitCompletion.position(), 5);
    }

    #[test]
    fn test_only_await_stages_wait() {
        let waiting: Vec<_> = Stage::ALL.iter().filter(|s| s.is_waiting()).collect();
        assert_eq!(waiting, vec![&Stage::AwaitStart, &Stage::AwaitCompletion]);
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Default);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Silent);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
    }
}
