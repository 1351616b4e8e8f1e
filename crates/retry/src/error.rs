use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A policy parameter is out of range.
    #[error("invalid retry policy: {message}")]
    InvalidPolicy { message: String },

    /// Every attempt failed. Terminal; carries the last failure reason.
    #[error("send failed after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },

    /// The executor was cancelled while waiting between attempts.
    #[error("retry interrupted during backoff delay")]
    Interrupted,
}

impl Error {
    #[must_use]
    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
        }
    }
}
