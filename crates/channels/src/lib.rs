//! Notification channels and their provider backends.
//!
//! Each channel (email, SMS, push) implements the [`Channel`] trait and
//! wraps exactly one provider supplied at construction. Providers here are
//! simulations of the real backends: they validate their configuration
//! eagerly and fabricate provider message ids in the backend's id format,
//! but perform no network calls.

pub mod channel;
pub mod config;
pub mod email;
pub mod error;
pub mod push;
pub mod sms;

pub use {
    channel::Channel,
    config::ProviderConfig,
    email::{EmailChannel, EmailProvider, MailgunProvider, SendGridProvider},
    error::{Error, Result},
    push::{FirebaseProvider, OneSignalProvider, PushChannel, PushProvider},
    sms::{AmazonSnsProvider, SmsChannel, SmsProvider, TwilioProvider},
};

/// Lowercase hex id of `len` characters, used by the simulated providers
/// to fabricate backend-style message ids.
pub(crate) fn short_id(len: usize) -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(len);
    id
}
