//! Scheduler collaborator
//!
//! A scheduler runs a task once after a delay and hands back an owned
//! [`TimerHandle`] that can cancel it.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Unit of work handed to a scheduler
pub type Task = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Single-shot delayed execution
pub trait Scheduler: Send + Sync {
    /// Runs `task` once `delay` has elapsed
    ///
    /// A zero delay runs the task as soon as the scheduler can, with no
    /// timer wait in between.
    fn schedule_after(&self, delay: Duration, task: Task) -> TimerHandle;
}

/// Owned cancellation token for a scheduled task
///
/// Dropping the handle does not cancel the task; call [`TimerHandle::cancel`].
pub struct TimerHandle {
    cancel: Box<dyn FnOnce() + Send>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Box::new(cancel),
        }
    }

    /// Cancels the task if it has not run yet
    pub fn cancel(self) {
        (self.cancel)()
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle").finish_non_exhaustive()
    }
}
