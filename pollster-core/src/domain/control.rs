//! Poll control returned by payload callbacks

use serde::{Deserialize, Serialize};

/// Decision returned by a payload callback after each successful poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    /// Schedule another poll after the configured delay
    #[default]
    Continue,
    /// Stop polling; no further requests are issued
    Stop,
}

impl Control {
    pub fn is_stop(self) -> bool {
        matches!(self, Control::Stop)
    }
}

impl From<bool> for Control {
    /// `true` means "done", matching the classic polling-callback convention.
    fn from(done: bool) -> Self {
        if done { Control::Stop } else { Control::Continue }
    }
}

impl From<()> for Control {
    fn from(_: ()) -> Self {
        Control::Continue
    }
}
