//! Bounded-attempt retry with exponential backoff.
//!
//! [`RetryExecutor`] decorates a send operation, typically a channel's
//! `send`, and retries transient failures under a [`RetryPolicy`]. The
//! inter-attempt delay is a cancellable `tokio` sleep, so retries compose
//! with shutdown and never pin a worker thread.

pub mod error;
pub mod executor;
pub mod policy;

pub use {
    error::{Error, Result},
    executor::RetryExecutor,
    policy::RetryPolicy,
};
