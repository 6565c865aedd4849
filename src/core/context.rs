//! Build context - the record threaded through the trigger pipeline

use serde::Serialize;
use std::collections::HashMap;

/// Everything the pipeline has learned about the build so far
///
/// Each stage takes the context produced by the previous stage and hands an
/// updated one to the next. A context belongs to exactly one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildContext {
    /// Parameters sent with the trigger request
    pub build_parameters: HashMap<String, String>,

    /// Build number captured before triggering; never revised once set
    pub next_build_number: Option<u64>,

    /// URL of the build correlated with `next_build_number`
    pub build_url: Option<String>,

    /// Result label reported by Jenkins (e.g. `SUCCESS`)
    pub build_status: Option<String>,

    /// Console log of the finished build
    pub console_text: Option<String>,

    /// Exit code derived from `build_status`
    pub exit_code: Option<i32>,
}

impl BuildContext {
    /// Create a context for a run with the given build parameters
    pub fn new(build_parameters: HashMap<String, String>) -> Self {
        Self {
            build_parameters,
            ..Self::default()
        }
    }

    /// Record the captured build number
    ///
    /// Returns `false` and leaves the context untouched if a number was
    /// already recorded.
    pub fn record_build_number(&mut self, number: u64) -> bool {
        if self.next_build_number.is_some() {
            return false;
        }
        self.next_build_number = Some(number);
        true
    }

    /// Record the URL of the started build
    pub fn record_build_url(&mut self, url: String) {
        self.build_url = Some(url);
    }

    /// Record the final result of the build
    pub fn record_result(&mut self, status: String, console_text: Option<String>, exit_code: i32) {
        self.build_status = Some(status);
        self.console_text = console_text;
        self.exit_code = Some(exit_code);
    }
}
