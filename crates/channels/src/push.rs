//! Push notification channel and its provider backends.

use {
    crate::{
        channel::Channel,
        config::ProviderConfig,
        error::{Error, Result},
        short_id,
    },
    async_trait::async_trait,
    courier_common::types::{ChannelType, Notification, NotificationResult, Payload},
    tracing::{debug, info},
};

/// Contract every push backend fulfils.
#[async_trait]
pub trait PushProvider: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<NotificationResult>;

    /// Provider identifier for logs and debugging.
    fn name(&self) -> &str;
}

/// Push channel wrapping exactly one provider.
pub struct PushChannel {
    provider: Box<dyn PushProvider>,
}

impl PushChannel {
    pub fn new(provider: Box<dyn PushProvider>) -> Self {
        info!(provider = provider.name(), "push channel initialised");
        Self { provider }
    }
}

#[async_trait]
impl Channel for PushChannel {
    async fn send(&self, notification: &Notification) -> Result<NotificationResult> {
        if !matches!(notification.payload, Payload::Push { .. }) {
            return Err(Error::invalid_input(format!(
                "push channel received a {} notification",
                notification.channel_type()
            )));
        }
        debug!(
            provider = self.provider.name(),
            notification_id = %notification.id,
            "delegating push send to provider"
        );
        self.provider.send(notification).await
    }

    fn channel_type(&self) -> ChannelType {
        ChannelType::Push
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Firebase Cloud Messaging backend (simulated).
pub struct FirebaseProvider {
    config: ProviderConfig,
}

impl FirebaseProvider {
    /// Fails when `project_id` or `service_account_key` is missing.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.require("project_id")?;
        config.require("service_account_key")?;
        Ok(Self { config })
    }
}

#[async_trait]
impl PushProvider for FirebaseProvider {
    async fn send(&self, notification: &Notification) -> Result<NotificationResult> {
        let project_id = self.config.require("project_id")?;
        let token_prefix: String = notification.recipient.chars().take(20).collect();
        info!(
            project_id,
            token_prefix = %token_prefix,
            notification_id = %notification.id,
            "[fcm] sending push"
        );
        if let Payload::Push { data, .. } = &notification.payload
            && !data.is_empty()
        {
            debug!(data_keys = data.len(), "[fcm] custom data payload attached");
        }

        // Real integration would POST to the FCM v1 send endpoint with an
        // OAuth2 bearer token minted from the service account key.
        let message_id = format!("projects/{project_id}/messages/fcm-{}", short_id(8));

        info!(provider_message_id = %message_id, "[fcm] push sent");
        Ok(NotificationResult::success(&notification.id, message_id))
    }

    fn name(&self) -> &str {
        "firebase-fcm"
    }
}

/// OneSignal backend (simulated).
pub struct OneSignalProvider {
    config: ProviderConfig,
}

impl OneSignalProvider {
    /// Fails when `app_id` or `api_key` is missing.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.require("app_id")?;
        config.require("api_key")?;
        Ok(Self { config })
    }
}

#[async_trait]
impl PushProvider for OneSignalProvider {
    async fn send(&self, notification: &Notification) -> Result<NotificationResult> {
        let app_id = self.config.require("app_id")?;
        info!(
            app_id,
            notification_id = %notification.id,
            "[onesignal] sending push"
        );

        // Real integration would POST to https://onesignal.com/api/v1/notifications.
        let message_id = format!("os-{}", short_id(12));

        info!(provider_message_id = %message_id, "[onesignal] push sent");
        Ok(NotificationResult::success(&notification.id, message_id))
    }

    fn name(&self) -> &str {
        "onesignal"
    }
}
