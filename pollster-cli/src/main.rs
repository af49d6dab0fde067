//! Pollster CLI
//!
//! Polls a JSON resource from the command line, printing every payload until
//! a stop condition is met, a request fails, or the user interrupts.

mod config;
mod output;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use pollster_client::ReqwestClient;
use pollster_runner::{PollOptions, Poller};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::types::StopCondition;

/// Default log filter; failed polls are already printed by `output::print_error`,
/// so the runner only logs errors
const DEFAULT_LOG_FILTER: &str = "pollster=info,pollster_runner=error";

#[derive(Parser)]
#[command(name = "pollster")]
#[command(about = "Poll a JSON resource over HTTP", long_about = None)]
struct Cli {
    /// Resource to poll
    #[arg(env = "POLLSTER_URL")]
    url: String,

    /// Delay between polls, in milliseconds
    #[arg(long, env = "POLLSTER_DELAY_MS", default_value_t = 30_000)]
    delay_ms: u64,

    /// Keep polling after a failed request
    #[arg(long, env = "POLLSTER_CONTINUE_ON_ERROR")]
    continue_on_error: bool,

    /// HTTP request timeout, in seconds
    #[arg(long, env = "POLLSTER_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Stop once a payload matches POINTER=VALUE (e.g. /status=finished)
    #[arg(long, value_name = "POINTER=VALUE")]
    until: Option<StopCondition>,

    /// Stop after this many successfully decoded payloads
    #[arg(long)]
    max_payloads: Option<u64>,

    /// Print the final poll summary as JSON
    #[arg(long)]
    summary: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            delay: Duration::from_millis(self.delay_ms),
            continue_on_error: self.continue_on_error,
            timeout: Duration::from_secs(self.timeout_secs),
            until: self.until,
            max_payloads: self.max_payloads,
            summary: self.summary,
            ..Config::new(self.url)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so payloads on stdout stay pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Cli::parse().into_config();
    config.validate()?;

    run(config).await
}

async fn run(config: Config) -> Result<()> {
    let http = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .context("Failed to build HTTP client")?;
    let client = Arc::new(ReqwestClient::with_client(http));

    let mut stop_rule = config.stop_rule();

    let callback = move |payload: Value| {
        let control = stop_rule.observe(&payload);
        output::print_payload(stop_rule.received(), &payload);
        control
    };

    let options = PollOptions::new()
        .delay(config.delay)
        .continue_on_error(config.continue_on_error)
        .on_error(output::print_error);

    let poller = Poller::spawn(config.url.clone(), callback, options, client)
        .context("Failed to start poller")?;

    let summary = tokio::select! {
        summary = poller.wait() => summary,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping poller");
            poller.stop();
            poller.summary()
        }
    };

    if config.summary {
        output::print_summary(&summary);
    }

    if summary.last_failed {
        anyhow::bail!("Last poll of {} failed", summary.url);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_silences_runner_warnings() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        assert!(DEFAULT_LOG_FILTER.contains("pollster_runner=error"));
    }

    #[test]
    fn test_cli_max_payloads_flag() {
        let cli = Cli::try_parse_from([
            "pollster",
            "http://localhost:8080/status",
            "--max-payloads",
            "3",
            "--until",
            "/status=finished",
        ])
        .unwrap();
        let config = cli.into_config();

        assert_eq!(config.max_payloads, Some(3));
        assert!(config.until.is_some());
        assert!(config.validate().is_ok());
    }
}
