#![allow(dead_code)]

use async_trait::async_trait;
use pollster_core::{FetchError, HttpClient, Scheduler, Task, TimerHandle};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory HTTP client that answers every request with the current scripted response
pub struct ScriptedClient {
    response: Mutex<Result<Value, FetchError>>,
    latency: Duration,
    requests: AtomicUsize,
}

impl ScriptedClient {
    /// Client answering `["item1", "item2"]`
    pub fn new() -> Arc<Self> {
        Self::with_latency(Duration::ZERO)
    }

    pub fn with_latency(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Ok(json!(["item1", "item2"]))),
            latency,
            requests: AtomicUsize::new(0),
        })
    }

    pub fn respond_with(&self, response: Result<Value, FetchError>) {
        *self.response.lock().unwrap() = response;
    }

    pub fn respond_with_status(&self, status: u16) {
        self.respond_with(Err(FetchError::status(status, "")));
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn get_json(&self, _url: &str) -> Result<Value, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.response.lock().unwrap().clone()
    }
}

/// Counts how many times the closures it hands out were called
#[derive(Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn hook(&self) -> impl FnMut() + Send + 'static {
        let counter = self.clone();
        move || counter.record()
    }

    pub fn error_hook(&self) -> impl FnMut(&FetchError) + Send + 'static {
        let counter = self.clone();
        move |_| counter.record()
    }
}

/// Lets every ready task run without advancing the paused clock
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Advances the paused clock by `duration` and lets due cycles finish
pub async fn advance(duration: Duration) {
    tokio::time::sleep(duration).await;
    settle().await;
}

pub const DEFAULT_DELAY: Duration = Duration::from_secs(30);

struct QueuedTask {
    delay: Duration,
    task: Task,
    cancelled: Arc<AtomicBool>,
}

/// Scheduler that queues tasks until the test runs them and records cancellations
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<Vec<QueuedTask>>,
    cancels: Arc<AtomicUsize>,
}

impl ManualScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Delays of the tasks that are queued and not cancelled
    pub fn pending(&self) -> Vec<Duration> {
        self.queue
            .lock()
            .unwrap()
            .iter()
            .filter(|queued| !queued.cancelled.load(Ordering::SeqCst))
            .map(|queued| queued.delay)
            .collect()
    }

    pub fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }

    /// Runs the oldest task that has not been cancelled, returning its delay
    pub async fn run_next(&self) -> Option<Duration> {
        let next = {
            let mut queue = self.queue.lock().unwrap();
            queue.retain(|queued| !queued.cancelled.load(Ordering::SeqCst));
            if queue.is_empty() {
                None
            } else {
                Some(queue.remove(0))
            }
        };

        let queued = next?;
        queued.task.await;
        Some(queued.delay)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, task: Task) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.queue.lock().unwrap().push(QueuedTask {
            delay,
            task,
            cancelled: Arc::clone(&cancelled),
        });

        let cancels = Arc::clone(&self.cancels);
        TimerHandle::new(move || {
            cancelled.store(true, Ordering::SeqCst);
            cancels.fetch_add(1, Ordering::SeqCst);
        })
    }
}

/// Counts drops of the tokens it hands out
#[derive(Clone, Default)]
pub struct DropCounter {
    drops: Arc<AtomicUsize>,
}

pub struct DropToken(Arc<AtomicUsize>);

impl Drop for DropToken {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> DropToken {
        DropToken(Arc::clone(&self.drops))
    }

    pub fn dropped(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}
