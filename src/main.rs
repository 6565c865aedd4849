mod cli;
mod core;
mod execution;
mod jenkins;

use anyhow::{Context, Result};
use cli::output::{format_console_text, format_outcome, Renderer, CROSS};
use cli::Cli;
use execution::TriggerEngine;
use jenkins::{JenkinsJob, ReqwestTransport, TransportConfig};
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{} {:#}", CROSS, e);
            1
        }
    };
    std::process::exit(code);
}

async fn run() -> Result<i32> {
    let cli = Cli::from_args();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to set logging subscriber")?;

    let config = cli.trigger_config();
    debug!("Configuration: {:?}", config);

    let identity = config.identity().context("Invalid configuration")?;
    let transport = ReqwestTransport::new(TransportConfig::new().with_timeout(config.request_timeout))
        .context("Failed to create HTTP client")?;

    let mut engine = TriggerEngine::new(JenkinsJob::new(identity, transport), config.poll_interval);

    let renderer = Arc::new(Renderer::new());
    let handler = renderer.clone();
    engine.add_event_handler(move |event| handler.handle(event));

    let outcome = engine.run(cli.build_parameters(), cli.verbosity()).await;

    if cli.console {
        if let Some(text) = outcome.console_text() {
            println!("{}", format_console_text(text));
        }
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?
        );
    } else if let Some(summary) = format_outcome(&outcome, cli.verbosity()) {
        println!("{}", summary);
    }

    Ok(outcome.exit_code)
}
