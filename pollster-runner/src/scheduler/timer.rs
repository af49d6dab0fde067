//! Tokio-backed scheduler

use pollster_core::{PollerError, Scheduler, Task, TimerHandle};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{self, Instant};

/// Schedules poll cycles as tasks on a tokio runtime
///
/// Each scheduled task is a spawned tokio task that sleeps until its deadline
/// first; cancelling the returned handle aborts it.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Creates a scheduler on the runtime the caller is running in
    pub fn current() -> Result<Self, PollerError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| PollerError::NoRuntime)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, task: Task) -> TimerHandle {
        // Deadline is fixed now, not when the spawned task is first polled.
        // `None` means the delay is past what `Instant` can represent.
        let deadline = Instant::now().checked_add(delay);

        let handle = self.runtime.spawn(async move {
            if !delay.is_zero() {
                match deadline {
                    Some(deadline) => time::sleep_until(deadline).await,
                    None => time::sleep(delay).await,
                }
            }
            task.await;
        });

        let abort = handle.abort_handle();
        TimerHandle::new(move || abort.abort())
    }
}
