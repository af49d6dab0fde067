//! Pollster Runner
//!
//! Drives polling lifecycles on a tokio runtime.
//!
//! A [`Poller`] issues a GET immediately, hands each decoded payload to a
//! callback and keeps polling at a fixed delay until the callback returns
//! [`Control::Stop`], an attempt fails without `continue_on_error`, or
//! [`Poller::stop`] is called.
//!
//! # Example
//!
//! ```no_run
//! use pollster_runner::{Control, PollOptions, Poller};
//! use pollster_client::ReqwestClient;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pollster_runner::PollerError> {
//!     let poller = Poller::spawn(
//!         "http://localhost:8080/build/42",
//!         |build: serde_json::Value| {
//!             if build["status"] == "finished" { Control::Stop } else { Control::Continue }
//!         },
//!         PollOptions::new().delay(Duration::from_secs(5)),
//!         Arc::new(ReqwestClient::new()),
//!     )?;
//!
//!     let summary = poller.wait().await;
//!     println!("done after {} attempt(s)", summary.attempts);
//!     Ok(())
//! }
//! ```

pub mod scheduler;

pub use pollster_core::{
    Control, FetchError, HttpClient, PollOptions, PollState, PollSummary, PollerError, Scheduler,
    TimerHandle,
};
pub use scheduler::{Poller, TokioScheduler};
