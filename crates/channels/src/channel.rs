use {
    crate::error::Result,
    async_trait::async_trait,
    courier_common::types::{ChannelType, Notification, NotificationResult},
    std::sync::Arc,
};

/// A per-medium send capability bound to one provider.
///
/// `send` delegates straight to the provider and returns its outcome
/// unchanged; no validation and no retries happen at this level. The
/// dispatcher validates before routing; the retry executor decorates a
/// channel's send when the caller wants backoff.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Hand the notification to the provider and return its outcome.
    async fn send(&self, notification: &Notification) -> Result<NotificationResult>;

    /// Which channel type this implementation handles. The dispatcher keys
    /// its registry on this value.
    fn channel_type(&self) -> ChannelType;

    /// Whether a provider is bound and ready. This is a liveness/config
    /// check, not a network probe; implementations may extend it to a real
    /// health check.
    fn is_available(&self) -> bool;
}

// Shared handles delegate, so a channel can be registered and still be
// observed from the outside (health checks, tests).
#[async_trait]
impl<T: Channel + ?Sized> Channel for Arc<T> {
    async fn send(&self, notification: &Notification) -> Result<NotificationResult> {
        (**self).send(notification).await
    }

    fn channel_type(&self) -> ChannelType {
        (**self).channel_type()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
