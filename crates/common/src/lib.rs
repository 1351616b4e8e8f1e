//! Shared data model for the courier notification library.
//!
//! Defines the notification entity and its per-channel payload variants,
//! the uniform send outcome ([`NotificationResult`]), and the message
//! template helper. Everything here is a plain value; channels, routing,
//! and retries live in their own crates.

pub mod error;
pub mod template;
pub mod types;

pub use {
    error::{Error, Result},
    template::MessageTemplate,
    types::{ChannelType, Notification, NotificationResult, NotificationStatus, Payload},
};
