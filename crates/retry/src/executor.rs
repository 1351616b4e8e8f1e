//! Retry decorator around send operations.

use {
    crate::{
        error::{Error, Result},
        policy::RetryPolicy,
    },
    courier_common::types::NotificationResult,
    std::{future::Future, time::Duration},
    tokio_util::sync::CancellationToken,
    tracing::{debug, error, info, warn},
};

/// Applies a [`RetryPolicy`] to any send operation.
///
/// The executor is a decorator: it wraps a `FnMut` producing send futures
/// (typically a closure over a channel's `send`) and is composed around
/// channels by the caller. A failed result and a transient send error are
/// treated uniformly: both count as a failed attempt and trigger backoff.
pub struct RetryExecutor {
    policy: RetryPolicy,
    cancel: Option<CancellationToken>,
}

impl RetryExecutor {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            cancel: None,
        }
    }

    /// Abort the backoff delay when `token` is cancelled. Cancellation
    /// surfaces as [`Error::Interrupted`] instead of a silent retry.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` until it succeeds or the policy is exhausted.
    ///
    /// Success returns immediately with no further attempts and no delay.
    /// When the final attempt fails, the terminal error carries the
    /// attempt count and the last recorded failure reason.
    pub async fn execute<F, Fut>(&self, mut operation: F) -> Result<NotificationResult>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = courier_channels::Result<NotificationResult>>,
    {
        let max_attempts = self.policy.max_attempts();
        let mut last_error = String::from("unknown error");

        for attempt in 1..=max_attempts {
            debug!(attempt, max_attempts, "send attempt");

            match operation().await {
                Ok(result) if result.is_success() => {
                    if attempt > 1 {
                        info!(attempt, "send succeeded after retry");
                    }
                    return Ok(result);
                },
                Ok(result) => {
                    last_error = result
                        .error_message()
                        .unwrap_or("send reported failure without a reason")
                        .to_string();
                    warn!(attempt, error = %last_error, "attempt returned a failed result");
                },
                Err(err) => {
                    last_error = err.to_string();
                    warn!(attempt, error = %last_error, "attempt raised a transient error");
                },
            }

            if attempt < max_attempts {
                let delay = self.policy.delay_for_attempt(attempt);
                info!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "backing off before next attempt"
                );
                self.wait(delay).await?;
            }
        }

        error!(attempts = max_attempts, last_error = %last_error, "all send attempts failed");
        Err(Error::Exhausted {
            attempts: max_attempts,
            last_error,
        })
    }

    async fn wait(&self, delay: Duration) -> Result<()> {
        match &self.cancel {
            Some(token) => tokio::select! {
                () = token.cancelled() => Err(Error::Interrupted),
                () = tokio::time::sleep(delay) => Ok(()),
            },
            None => {
                tokio::time::sleep(delay).await;
                Ok(())
            },
        }
    }
}
