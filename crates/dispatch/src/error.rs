use {courier_common::types::ChannelType, thiserror::Error};

pub type Result<T> = std::result::Result<T, Error>;

/// Caller and configuration errors raised by the dispatcher.
///
/// Provider failures never appear here; once a notification is validated
/// and routed, delivery problems are reported as failed results.
#[derive(Debug, Error)]
pub enum Error {
    /// The notification failed validation; `reasons` joins every
    /// collected error string.
    #[error("invalid notification: {reasons}")]
    Validation { reasons: String },

    /// No channel is registered for the notification's type.
    #[error("no channel registered for {requested}; registered channels: {registered}")]
    ChannelNotFound {
        requested: ChannelType,
        registered: String,
    },

    /// The builder finished with an empty registry.
    #[error("at least one channel must be registered")]
    NoChannels,
}
