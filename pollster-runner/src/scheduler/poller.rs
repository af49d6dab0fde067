//! Resource poller
//!
//! Polls a single URL, hands each decoded payload to a callback and decides
//! after every attempt whether another cycle is scheduled.
//! Cycles never overlap: the next one is scheduled only once the current
//! response (or failure) has been fully processed.

use pollster_core::options::{CompleteHook, ErrorHook};
use pollster_core::{
    Control, HttpClient, PollOptions, PollState, PollSummary, PollerError, Scheduler, TimerHandle,
};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::timer::TokioScheduler;

type PayloadCallback = Box<dyn FnMut(Value) -> Control + Send>;

/// User callbacks, owned by whoever is currently running them
struct Handlers {
    callback: PayloadCallback,
    on_error: Option<ErrorHook>,
    on_complete: Option<CompleteHook>,
}

struct Shared {
    id: Uuid,
    url: String,
    delay: Duration,
    continue_on_error: bool,
    client: Arc<dyn HttpClient>,
    scheduler: Arc<dyn Scheduler>,
    state: watch::Sender<PollState>,
    /// `None` while a cycle is running the callbacks, and for good once stopped
    handlers: Mutex<Option<Handlers>>,
    /// Pending timer; taken by the cycle it wakes
    timer: Mutex<Option<TimerHandle>>,
    attempts: AtomicU64,
    failures: AtomicU64,
    last_failed: AtomicBool,
}

/// Handle to a running polling lifecycle
///
/// Cloning is cheap and every clone controls the same poller. Dropping all
/// handles does not stop polling; the scheduled cycle keeps it alive until it
/// reaches `Stopped`.
#[derive(Clone)]
pub struct Poller {
    shared: Arc<Shared>,
}

impl Poller {
    /// Starts polling `url`
    ///
    /// The first request is issued right away. `callback` receives every
    /// decoded payload and returns anything convertible to [`Control`]:
    /// `Control` itself, `bool` (`true` stops) or `()` (keeps polling).
    ///
    /// # Errors
    /// Returns an error without scheduling anything when `url` is blank or the
    /// configured delay is zero.
    pub fn start<F, R>(
        url: impl Into<String>,
        mut callback: F,
        options: PollOptions,
        client: Arc<dyn HttpClient>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self, PollerError>
    where
        F: FnMut(Value) -> R + Send + 'static,
        R: Into<Control>,
    {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(PollerError::EmptyUrl);
        }
        options.validate()?;

        let (delay, continue_on_error, on_error, on_complete) = options.into_parts();
        let (state, _) = watch::channel(PollState::Polling);

        let shared = Arc::new(Shared {
            id: Uuid::new_v4(),
            url,
            delay,
            continue_on_error,
            client,
            scheduler,
            state,
            handlers: Mutex::new(Some(Handlers {
                callback: Box::new(move |data: Value| -> Control { callback(data).into() }),
                on_error,
                on_complete,
            })),
            timer: Mutex::new(None),
            attempts: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            last_failed: AtomicBool::new(false),
        });

        info!(
            poller = %shared.id,
            url = %shared.url,
            "Starting poller (delay: {:?}, continue_on_error: {})",
            shared.delay,
            shared.continue_on_error
        );

        shared.schedule(Duration::ZERO);

        Ok(Self { shared })
    }

    /// Starts polling on the current tokio runtime
    pub fn spawn<F, R>(
        url: impl Into<String>,
        callback: F,
        options: PollOptions,
        client: Arc<dyn HttpClient>,
    ) -> Result<Self, PollerError>
    where
        F: FnMut(Value) -> R + Send + 'static,
        R: Into<Control>,
    {
        let scheduler = TokioScheduler::current()?;
        Self::start(url, callback, options, client, Arc::new(scheduler))
    }

    /// Stops polling
    ///
    /// Cancels the pending cycle and releases the callbacks. A response that
    /// is already in flight is discarded. Calling this again, or from inside
    /// one of the poller's own callbacks, is fine.
    pub fn stop(&self) {
        self.shared.finish("stopped manually");
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    pub fn url(&self) -> &str {
        &self.shared.url
    }

    pub fn state(&self) -> PollState {
        *self.shared.state.borrow()
    }

    pub fn is_stopped(&self) -> bool {
        self.state().is_stopped()
    }

    pub fn summary(&self) -> PollSummary {
        let shared = &self.shared;
        PollSummary {
            id: shared.id,
            url: shared.url.clone(),
            state: self.state(),
            attempts: shared.attempts.load(Ordering::SeqCst),
            failures: shared.failures.load(Ordering::SeqCst),
            last_failed: shared.last_failed.load(Ordering::SeqCst),
        }
    }

    /// Waits until the poller has stopped and returns its final summary
    pub async fn wait(&self) -> PollSummary {
        let mut state = self.shared.state.subscribe();
        // The sender lives as long as `self.shared`, so this cannot fail
        let _ = state.wait_for(|state| state.is_stopped()).await;
        self.summary()
    }
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("id", &self.shared.id)
            .field("url", &self.shared.url)
            .field("state", &self.state())
            .finish()
    }
}

impl Shared {
    fn is_stopped(&self) -> bool {
        self.state.borrow().is_stopped()
    }

    /// Schedules the next cycle unless the poller has stopped
    fn schedule(self: &Arc<Self>, delay: Duration) {
        let mut timer = lock(&self.timer);
        if self.is_stopped() {
            return;
        }

        debug!(poller = %self.id, "Next poll in {:?}", delay);
        let cycle = Box::pin(Arc::clone(self).run_cycle());
        *timer = Some(self.scheduler.schedule_after(delay, cycle));
    }

    /// Performs one poll cycle
    async fn run_cycle(self: Arc<Self>) {
        lock(&self.timer).take();
        if self.is_stopped() {
            return;
        }

        debug!(poller = %self.id, url = %self.url, "Polling");
        let result = self.client.get_json(&self.url).await;

        let Some(mut handlers) = lock(&self.handlers).take() else {
            debug!(poller = %self.id, "Poller stopped while request was in flight, discarding response");
            return;
        };
        let _guard = StopOnPanic(&self);

        self.attempts.fetch_add(1, Ordering::SeqCst);

        let (keep_polling, reason) = match result {
            Ok(data) => {
                self.last_failed.store(false, Ordering::SeqCst);
                match (handlers.callback)(data) {
                    Control::Continue => (true, ""),
                    Control::Stop => (false, "callback requested stop"),
                }
            }
            Err(err) => {
                self.last_failed.store(true, Ordering::SeqCst);
                self.failures.fetch_add(1, Ordering::SeqCst);
                warn!(poller = %self.id, url = %self.url, "Poll failed: {}", err);

                if let Some(on_error) = handlers.on_error.as_mut() {
                    on_error(&err);
                }
                (self.continue_on_error, "request failed")
            }
        };

        if let Some(on_complete) = handlers.on_complete.as_mut() {
            on_complete();
        }

        if keep_polling && !self.is_stopped() {
            self.restore_handlers(handlers);
            self.schedule(self.delay);
        } else {
            drop(handlers);
            self.finish(reason);
        }
    }

    /// Puts the callbacks back for the next cycle
    ///
    /// `finish` marks the state before taking the handlers, so a stop that
    /// raced past the caller's check is seen here and the handlers are
    /// released instead of parked in a stopped poller.
    fn restore_handlers(&self, handlers: Handlers) {
        let released = {
            let mut slot = lock(&self.handlers);
            *slot = Some(handlers);
            if self.is_stopped() { slot.take() } else { None }
        };
        drop(released);
    }

    /// Transitions to `Stopped`, cancelling the pending timer and releasing callbacks
    fn finish(&self, reason: &str) {
        let previous = self.state.send_replace(PollState::Stopped);

        let timer = lock(&self.timer).take();
        if let Some(timer) = timer {
            timer.cancel();
        }
        let handlers = lock(&self.handlers).take();
        drop(handlers);

        if previous == PollState::Polling {
            info!(
                poller = %self.id,
                url = %self.url,
                "Poller stopped after {} attempt(s): {}",
                self.attempts.load(Ordering::SeqCst),
                reason
            );
        }
    }
}

/// Moves the poller to `Stopped` if a user callback panics mid-cycle
struct StopOnPanic<'a>(&'a Shared);

impl Drop for StopOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.finish("callback panicked");
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
