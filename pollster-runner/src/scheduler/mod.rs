//! Scheduler layer
//!
//! This layer owns the poll loop: the tokio-backed timer that delays each
//! cycle and the poller state machine that decides whether another cycle runs.

pub mod poller;
pub mod timer;

pub use poller::Poller;
pub use timer::TokioScheduler;
