//! Common types used across CLI modules

use pollster_core::Control;
use serde_json::Value;
use std::str::FromStr;

/// Stop condition given as `POINTER=VALUE`
///
/// `POINTER` is a JSON pointer into each payload (e.g. `/status`) and `VALUE`
/// is parsed as JSON, falling back to a plain string, so `/done=true` compares
/// against a boolean and `/status=finished` against the string `"finished"`.
#[derive(Debug, Clone, PartialEq)]
pub struct StopCondition {
    pub pointer: String,
    pub value: Value,
}

impl StopCondition {
    /// Check whether a payload satisfies the condition
    pub fn matches(&self, payload: &Value) -> bool {
        payload.pointer(&self.pointer) == Some(&self.value)
    }
}

impl FromStr for StopCondition {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (pointer, raw) = input
            .split_once('=')
            .ok_or_else(|| format!("expected POINTER=VALUE, got '{}'", input))?;

        if !pointer.is_empty() && !pointer.starts_with('/') {
            return Err(format!(
                "JSON pointer must be empty or start with '/', got '{}'",
                pointer
            ));
        }

        let value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

        Ok(Self {
            pointer: pointer.to_string(),
            value,
        })
    }
}

/// Decides after each payload whether the CLI should stop polling
///
/// Failed attempts never reach the rule, so `max_payloads` counts decoded
/// payloads only.
#[derive(Debug, Clone)]
pub struct StopRule {
    until: Option<StopCondition>,
    max_payloads: Option<u64>,
    received: u64,
}

impl StopRule {
    pub fn new(until: Option<StopCondition>, max_payloads: Option<u64>) -> Self {
        Self {
            until,
            max_payloads,
            received: 0,
        }
    }

    /// Number of payloads observed so far
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Records a payload and returns whether polling should go on
    pub fn observe(&mut self, payload: &Value) -> Control {
        self.received += 1;

        let limit_reached = self.max_payloads.is_some_and(|max| self.received >= max);
        let matched = self
            .until
            .as_ref()
            .is_some_and(|until| until.matches(payload));
        Control::from(limit_reached || matched)
    }
}
