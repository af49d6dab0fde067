//! Poller lifecycle state

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a poller
///
/// A poller enters `Polling` at construction and `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollState {
    Polling,
    Stopped,
}

impl PollState {
    pub fn is_stopped(self) -> bool {
        matches!(self, PollState::Stopped)
    }
}

impl std::fmt::Display for PollState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollState::Polling => write!(f, "polling"),
            PollState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Point-in-time view of a poller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSummary {
    pub id: Uuid,
    pub url: String,
    pub state: PollState,
    /// Finished attempts, successful or not
    pub attempts: u64,
    /// Attempts that ended in a fetch error
    pub failures: u64,
    /// Whether the most recent finished attempt failed
    pub last_failed: bool,
}
