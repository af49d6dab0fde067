//! Pollster Core
//!
//! Core types and abstractions for the Pollster polling helper.
//!
//! This crate contains:
//! - Domain types: poll control, lifecycle state and summaries
//! - Options: per-poller configuration and user hooks
//! - Collaborator traits: the HTTP client and the scheduler a poller is driven by
//!
//! It has no runtime dependency; the tokio-backed poller lives in `pollster-runner`.

pub mod domain;
pub mod error;
pub mod http;
pub mod options;
pub mod scheduler;

pub use domain::control::Control;
pub use domain::state::{PollState, PollSummary};
pub use error::{FetchError, PollerError};
pub use http::HttpClient;
pub use options::PollOptions;
pub use scheduler::{Scheduler, Task, TimerHandle};
