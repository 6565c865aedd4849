//! Command-line interface

pub mod output;

use crate::core::{parse_params, TriggerConfig, Verbosity};
use clap::{ArgAction, Parser};
use std::collections::HashMap;
use std::ffi::OsString;
use std::time::Duration;

/// A patient script for automating your automation
#[derive(Debug, Parser, Clone)]
#[command(name = "jenkins-wait")]
#[command(version)]
#[command(about = "Trigger a Jenkins job and wait for the build to finish", long_about = None)]
#[command(after_help = "Examples:\n  \
    jenkins-wait --base-jenkins ci.myCompany.com --job-location companyspace/job/myproject\n  \
    jenkins-wait -b ci.myCompany.com -j /job/otherproject -r branch:main -r deploy:true")]
pub struct Cli {
    /// Jenkins host, with or without protocol
    #[arg(short = 'b', long, env = "JENKINS_URL")]
    pub base_jenkins: String,

    /// Path of the job on the Jenkins host, e.g. job/myproject
    #[arg(short = 'j', long)]
    pub job_location: String,

    /// Username for basic auth
    #[arg(short, long, env = "JENKINS_USERNAME")]
    pub username: Option<String>,

    /// Password or API token for basic auth
    #[arg(short, long, env = "JENKINS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Delay between polls, in milliseconds
    #[arg(short = 'i', long, default_value_t = 1000)]
    pub poll_interval: u64,

    /// Use https (true) or plain http (false)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub use_https: bool,

    /// Build parameters as key:value
    #[arg(short = 'r', long, num_args = 1..)]
    pub parameters: Vec<String>,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, default_value_t = 30)]
    pub request_timeout: u64,

    /// Render nothing while waiting
    #[arg(short, long)]
    pub silent: bool,

    /// Render every event and enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the build's console text when it finishes
    #[arg(short, long)]
    pub console: bool,

    /// Print the final outcome as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }

    /// The configuration record the core consumes
    pub fn trigger_config(&self) -> TriggerConfig {
        TriggerConfig::new(self.base_jenkins.clone(), self.job_location.clone())
            .with_credentials(self.username.clone(), self.password.clone())
            .with_https(self.use_https)
            .with_poll_interval(Duration::from_millis(self.poll_interval))
            .with_request_timeout(Duration::from_secs(self.request_timeout))
    }

    pub fn build_parameters(&self) -> HashMap<String, String> {
        parse_params(&self.parameters)
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.silent, self.verbose)
    }
}
