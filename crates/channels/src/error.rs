use thiserror::Error;

/// Crate-wide result type for channel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed errors shared by channels and providers.
#[derive(Debug, Error)]
pub enum Error {
    /// A required provider property is missing or blank. Fatal; raised at
    /// construction, before any send is attempted.
    #[error("missing required property '{key}' for provider {provider}")]
    Configuration { provider: String, key: String },

    /// A provider failed during a send attempt. Transient; eligible for
    /// retry under a retry policy.
    #[error("send failed: {message}")]
    Send { message: String },

    /// Input payload or parameter is invalid for this channel.
    #[error("invalid channel input: {message}")]
    InvalidInput { message: String },
}

impl Error {
    #[must_use]
    pub fn configuration(provider: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Configuration {
            provider: provider.into(),
            key: key.into(),
        }
    }

    #[must_use]
    pub fn send(message: impl std::fmt::Display) -> Self {
        Self::Send {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn invalid_input(message: impl std::fmt::Display) -> Self {
        Self::InvalidInput {
            message: message.to_string(),
        }
    }
}
