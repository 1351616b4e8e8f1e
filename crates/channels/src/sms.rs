//! SMS channel and its provider backends.

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

/// Contract every SMS backend fulfils.
#[async_trait]
pub trait SmsProvider: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<NotificationResult>;

    /// Provider identifier for logs and debugging.
    fn name(&self) -> &str;
}

/// SMS channel wrapping exactly one provider.
pub struct SmsChannel {
    provider: Box<dyn SmsProvider>,
}

impl SmsChannel {
    pub fn new(provider: Box<dyn SmsProvider>) -> Self {
        info!(provider = provider.name(), "sms channel initialised");
        Self { provider }
    }
}

#[async_trait]
impl Channel for SmsChannel {
    async fn send(&self, notification: &Notification) -> Result<NotificationResult> {
        if !matches!(notification.payload, Payload::Sms { .. }) {
            return Err(Error::invalid_input(format!(
                "sms channel received a {} notification",
                notification.channel_type()
            )));
        }
        debug!(
            provider = self.provider.name(),
            notification_id = %notification.id,
            "delegating sms send to provider"
        );
        self.provider.send(notification).await
    }

    fn channel_type(&self) -> ChannelType {
        ChannelType::Sms
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Twilio backend (simulated).
///
/// Message ids follow Twilio's `SM` + 32-hex-char SID format.
pub struct TwilioProvider {
    config: ProviderConfig,
}

impl TwilioProvider {
    /// Fails when `account_sid`, `auth_token`, or `from_number` is missing.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.require("account_sid")?;
        config.require("auth_token")?;
        config.require("from_number")?;
        Ok(Self { config })
    }
}

#[async_trait]
impl SmsProvider for TwilioProvider {
    async fn send(&self, notification: &Notification) -> Result<NotificationResult> {
        let from = self.config.require("from_number")?;
        info!(
            from,
            to = %notification.recipient,
            notification_id = %notification.id,
            "[twilio] sending sms"
        );

        // Real integration would POST to the Twilio Messages endpoint with
        // basic auth on the account SID and token.
        let message_sid = format!("SM{}", short_id(16));

        info!(provider_message_id = %message_sid, "[twilio] sms queued");
        Ok(NotificationResult::success(&notification.id, message_sid))
    }

    fn name(&self) -> &str {
        "twilio"
    }
}

/// Amazon SNS backend (simulated).
pub struct AmazonSnsProvider {
    config: ProviderConfig,
}

impl AmazonSnsProvider {
    /// Fails when `access_key`, `secret_key`, or `region` is missing.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.require("access_key")?;
        config.require("secret_key")?;
        config.require("region")?;
        Ok(Self { config })
    }
}

#[async_trait]
impl SmsProvider for AmazonSnsProvider {
    async fn send(&self, notification: &Notification) -> Result<NotificationResult> {
        let region = self.config.require("region")?;
        info!(
            region,
            to = %notification.recipient,
            notification_id = %notification.id,
            "[sns] publishing sms"
        );

        // Real integration would call sns:Publish with a SigV4-signed request.
        let message_id = format!("sns-{}", short_id(12));

        info!(provider_message_id = %message_id, "[sns] sms published");
        Ok(NotificationResult::success(&notification.id, message_id))
    }

    fn name(&self) -> &str {
        "amazon-sns"
    }
}
