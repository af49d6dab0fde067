//! Configuration module
//!
//! Resolved settings for a single `pollster` run.

use std::time::Duration;

use crate::types::{StopCondition, StopRule};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Resource to poll
    pub url: String,

    /// Delay between the end of one poll and the start of the next
    pub delay: Duration,

    /// Keep polling after a failed request
    pub continue_on_error: bool,

    /// HTTP request timeout
    pub timeout: Duration,

    /// Stop once a payload satisfies this condition
    pub until: Option<StopCondition>,

    /// Stop after this many successfully decoded payloads
    pub max_payloads: Option<u64>,

    /// Print the final poll summary as JSON
    pub summary: bool,
}

impl Config {
    /// Creates a configuration with defaults for `url`
    pub fn new(url: String) -> Self {
        Self {
            url,
            delay: pollster_core::options::DEFAULT_DELAY,
            continue_on_error: false,
            timeout: Duration::from_secs(30),
            until: None,
            max_payloads: None,
            summary: false,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.url.is_empty() {
            anyhow::bail!("url cannot be empty");
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            anyhow::bail!("url must start with http:// or https://");
        }

        if self.delay.is_zero() {
            anyhow::bail!("delay must be greater than 0");
        }

        if self.timeout.is_zero() {
            anyhow::bail!("timeout must be greater than 0");
        }

        if self.max_payloads == Some(0) {
            anyhow::bail!("max_payloads must be greater than 0");
        }

        Ok(())
    }

    /// Builds the stop rule applied to each payload
    pub fn stop_rule(&self) -> StopRule {
        StopRule::new(self.until.clone(), self.max_payloads)
    }
}
