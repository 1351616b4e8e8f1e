//! Dispatch facade: the single entry point for sending notifications.
//!
//! The dispatcher owns an immutable registry of channels keyed by
//! [`ChannelType`](courier_common::ChannelType) and orchestrates
//! validate → route → send. Expected delivery failures come back as
//! failed [`NotificationResult`](courier_common::NotificationResult)s;
//! only caller misuse (invalid notification, unregistered channel)
//! surfaces as an error, and the settled send paths capture even those
//! into results.

pub mod dispatcher;
pub mod error;

pub use {
    dispatcher::{Dispatcher, DispatcherBuilder},
    error::{Error, Result},
};
