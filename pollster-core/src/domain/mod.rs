//! Core domain types
//!
//! These types describe a single polling lifecycle and are shared between the
//! poller (which drives them) and front ends (which observe them).

pub mod control;
pub mod state;
