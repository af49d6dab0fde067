//! Poller options
//!
//! Scheduling knobs plus the optional hooks a poller calls after each attempt.

use std::time::Duration;

use crate::error::{FetchError, PollerError};

/// Delay between the end of one poll and the start of the next
pub const DEFAULT_DELAY: Duration = Duration::from_secs(30);

/// Hook invoked once per failed attempt
pub type ErrorHook = Box<dyn FnMut(&FetchError) + Send>;

/// Hook invoked once per finished attempt
pub type CompleteHook = Box<dyn FnMut() + Send>;

/// Options for a single poller
///
/// # Example
/// ```
/// use pollster_core::PollOptions;
/// use std::time::Duration;
///
/// let options = PollOptions::new()
///     .delay(Duration::from_secs(5))
///     .continue_on_error(true)
///     .on_error(|err| eprintln!("poll failed: {err}"));
/// assert!(options.continues_on_error());
/// ```
pub struct PollOptions {
    delay: Duration,
    continue_on_error: bool,
    on_error: Option<ErrorHook>,
    on_complete: Option<CompleteHook>,
}

impl PollOptions {
    /// Creates options with the defaults: 30s delay, stop on first error, no hooks
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            continue_on_error: false,
            on_error: None,
            on_complete: None,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Keeps polling after a failed attempt instead of stopping
    pub fn continue_on_error(mut self, enabled: bool) -> Self {
        self.continue_on_error = enabled;
        self
    }

    pub fn on_error(mut self, hook: impl FnMut(&FetchError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    /// Registers a hook that runs after every attempt, after the payload
    /// callback or `on_error` has run
    pub fn on_complete(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    pub fn poll_delay(&self) -> Duration {
        self.delay
    }

    pub fn continues_on_error(&self) -> bool {
        self.continue_on_error
    }

    /// Validates the scheduling options
    pub fn validate(&self) -> Result<(), PollerError> {
        if self.delay.is_zero() {
            return Err(PollerError::InvalidDelay);
        }
        Ok(())
    }

    /// Splits the options into scheduling settings and hooks
    pub fn into_parts(self) -> (Duration, bool, Option<ErrorHook>, Option<CompleteHook>) {
        (
            self.delay,
            self.continue_on_error,
            self.on_error,
            self.on_complete,
        )
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PollOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollOptions")
            .field("delay", &self.delay)
            .field("continue_on_error", &self.continue_on_error)
            .field("on_error", &self.on_error.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = PollOptions::default();
        assert_eq!(options.poll_delay(), Duration::from_millis(30_000));
        assert!(!options.continues_on_error());
        assert!(options.on_error.is_none());
        assert!(options.on_complete.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_delay_is_rejected() {
        let options = PollOptions::new().delay(Duration::ZERO);
        assert_eq!(options.validate(), Err(PollerError::InvalidDelay));
    }

    #[test]
    fn test_into_parts_keeps_hooks() {
        let (delay, continue_on_error, on_error, on_complete) = PollOptions::new()
            .delay(Duration::from_secs(60))
            .continue_on_error(true)
            .on_complete(|| {})
            .into_parts();

        assert_eq!(delay, Duration::from_secs(60));
        assert!(continue_on_error);
        assert!(on_error.is_none());
        assert!(on_complete.is_some());
    }
}
