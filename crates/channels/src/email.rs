//! Email channel and its provider backends.

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

/// Contract every email backend fulfils.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Deliver the email and return the provider's outcome, including the
    /// message id the backend assigned.
    async fn send(&self, notification: &Notification) -> Result<NotificationResult>;

    /// Provider identifier for logs and debugging.
    fn name(&self) -> &str;
}

/// Email channel wrapping exactly one provider.
pub struct EmailChannel {
    provider: Box<dyn EmailProvider>,
}

impl EmailChannel {
    pub fn new(provider: Box<dyn EmailProvider>) -> Self {
        info!(provider = provider.name(), "email channel initialised");
        Self { provider }
    }
}

#[async_trait]
impl Channel for EmailChannel {
    async fn send(&self, notification: &Notification) -> Result<NotificationResult> {
        if !matches!(notification.payload, Payload::Email { .. }) {
            return Err(Error::invalid_input(format!(
                "email channel received a {} notification",
                notification.channel_type()
            )));
        }
        debug!(
            provider = self.provider.name(),
            notification_id = %notification.id,
            "delegating email send to provider"
        );
        self.provider.send(notification).await
    }

    fn channel_type(&self) -> ChannelType {
        ChannelType::Email
    }

    fn is_available(&self) -> bool {
        // Provider is bound at construction; extend for real health checks.
        true
    }
}

/// SendGrid backend (simulated).
pub struct SendGridProvider {
    config: ProviderConfig,
}

impl SendGridProvider {
    /// Fails when `api_key` or `from_email` is missing.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.require("api_key")?;
        config.require("from_email")?;
        Ok(Self { config })
    }
}

#[async_trait]
impl EmailProvider for SendGridProvider {
    async fn send(&self, notification: &Notification) -> Result<NotificationResult> {
        let from = self.config.require("from_email")?;
        info!(
            from,
            to = %notification.recipient,
            notification_id = %notification.id,
            "[sendgrid] sending email"
        );

        // Real integration would POST to https://api.sendgrid.com/v3/mail/send.
        let provider_message_id = format!("sg-{}", short_id(12));

        info!(provider_message_id = %provider_message_id, "[sendgrid] email accepted");
        Ok(NotificationResult::success(&notification.id, provider_message_id))
    }

    fn name(&self) -> &str {
        "sendgrid"
    }
}

/// Mailgun backend (simulated).
pub struct MailgunProvider {
    config: ProviderConfig,
}

impl MailgunProvider {
    /// Fails when `api_key` or `domain` is missing.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.require("api_key")?;
        config.require("domain")?;
        Ok(Self { config })
    }
}

#[async_trait]
impl EmailProvider for MailgunProvider {
    async fn send(&self, notification: &Notification) -> Result<NotificationResult> {
        let domain = self.config.require("domain")?;
        info!(
            domain,
            to = %notification.recipient,
            notification_id = %notification.id,
            "[mailgun] sending email"
        );

        // Real integration would POST to https://api.mailgun.net/v3/<domain>/messages.
        let provider_message_id = format!("mg-{}", short_id(12));

        info!(provider_message_id = %provider_message_id, "[mailgun] email queued");
        Ok(NotificationResult::success(&notification.id, provider_message_id))
    }

    fn name(&self) -> &str {
        "mailgun"
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn sendgrid_config() -> ProviderConfig {
        ProviderConfig::builder("sendgrid")
            .property("api_key", "SG.test")
            .property("from_email", "noreply@app.example")
            .build()
            .unwrap()
    }

    fn email() -> Notification {
        Notification::email("user@example.com", "body").subject("subject").build()
    }

    #[test]
    fn sendgrid_rejects_missing_api_key() {
        let config = ProviderConfig::builder("sendgrid")
            .property("from_email", "noreply@app.example")
            .build()
            .unwrap();
        let err = SendGridProvider::new(config).err().unwrap();
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn mailgun_rejects_missing_domain() {
        let config = ProviderConfig::builder("mailgun")
            .property("api_key", "key-test")
            .build()
            .unwrap();
        assert!(MailgunProvider::new(config).is_err());
    }

    #[tokio::test]
    async fn sendgrid_send_returns_prefixed_message_id() {
        let provider = SendGridProvider::new(sendgrid_config()).unwrap();
        let notification = email();
        let result = provider.send(&notification).await.unwrap();
        assert!(result.is_success());
        assert_eq!(result.notification_id(), notification.id);
        assert!(result.provider_message_id().unwrap().starts_with("sg-"));
    }

    #[tokio::test]
    async fn channel_delegates_to_provider() {
        let channel = EmailChannel::new(Box::new(SendGridProvider::new(sendgrid_config()).unwrap()));
        assert_eq!(channel.channel_type(), ChannelType::Email);
        assert!(channel.is_available());

        let result = channel.send(&email()).await.unwrap();
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn channel_rejects_wrong_payload_variant() {
        let channel = EmailChannel::new(Box::new(SendGridProvider::new(sendgrid_config()).unwrap()));
        let sms = Notification::sms("+51999888777", "hi").build();
        let err = channel.send(&sms).await.err().unwrap();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }
}
