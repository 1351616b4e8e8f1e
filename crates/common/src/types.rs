//! Notification entity, per-channel payloads, and send outcomes.

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::collections::{BTreeSet, HashMap},
    uuid::Uuid,
};

/// Delivery channels supported by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// Electronic mail (SendGrid, Mailgun, SES).
    Email,
    /// Text message (Twilio, Amazon SNS).
    Sms,
    /// Mobile push notification (Firebase FCM, OneSignal).
    Push,
}

impl ChannelType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Push => "push",
        }
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel-specific notification fields.
///
/// The payload variant is the single source of truth for which channel a
/// notification belongs to; there is no separate discriminant field to
/// drift out of sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum Payload {
    Email {
        subject: String,
        /// Sender address (e.g. "noreply@app.example").
        from: Option<String>,
        /// HTML alternative to the plain-text body.
        html_body: Option<String>,
        cc: BTreeSet<String>,
        bcc: BTreeSet<String>,
    },
    Sms {
        /// Originating number in E.164 form (e.g. "+15551234567").
        from: Option<String>,
    },
    Push {
        title: String,
        image_url: Option<String>,
        /// Custom key/value payload handed to the receiving app.
        data: HashMap<String, String>,
    },
}

impl Payload {
    #[must_use]
    pub fn channel_type(&self) -> ChannelType {
        match self {
            Self::Email { .. } => ChannelType::Email,
            Self::Sms { .. } => ChannelType::Sms,
            Self::Push { .. } => ChannelType::Push,
        }
    }
}

/// An outbound notification.
///
/// The id and creation timestamp are assigned when the builder finishes;
/// callers own the value and hand it to the dispatcher by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Opaque unique id, generated at creation (for tracking and logs).
    pub id: String,
    /// Destination: email address, E.164 number, or device token
    /// depending on the channel.
    pub recipient: String,
    /// Plain-text message body.
    pub body: String,
    pub created_at: DateTime<Utc>,
    /// Free-form annotations (e.g. {"priority": "high"}).
    pub metadata: HashMap<String, String>,
    pub payload: Payload,
}

impl Notification {
    /// Start building an email notification.
    pub fn email(to: impl Into<String>, body: impl Into<String>) -> EmailBuilder {
        EmailBuilder::new(to.into(), body.into())
    }

    /// Start building an SMS notification.
    pub fn sms(to: impl Into<String>, body: impl Into<String>) -> SmsBuilder {
        SmsBuilder::new(to.into(), body.into())
    }

    /// Start building a push notification addressed to a device token.
    pub fn push(device_token: impl Into<String>, body: impl Into<String>) -> PushBuilder {
        PushBuilder::new(device_token.into(), body.into())
    }

    #[must_use]
    pub fn channel_type(&self) -> ChannelType {
        self.payload.channel_type()
    }

    fn assemble(recipient: String, body: String, metadata: HashMap<String, String>, payload: Payload) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            recipient,
            body,
            created_at: Utc::now(),
            metadata,
            payload,
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] id={}, to={}",
            self.channel_type(),
            self.id,
            self.recipient
        )
    }
}

// ── Builders ────────────────────────────────────────────────────────────────

/// Builder for [`Payload::Email`] notifications.
#[derive(Debug)]
pub struct EmailBuilder {
    to: String,
    body: String,
    subject: String,
    from: Option<String>,
    html_body: Option<String>,
    cc: BTreeSet<String>,
    bcc: BTreeSet<String>,
    metadata: HashMap<String, String>,
}

impl EmailBuilder {
    fn new(to: String, body: String) -> Self {
        Self {
            to,
            body,
            subject: String::new(),
            from: None,
            html_body: None,
            cc: BTreeSet::new(),
            bcc: BTreeSet::new(),
            metadata: HashMap::new(),
        }
    }

    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    #[must_use]
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    #[must_use]
    pub fn html_body(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }

    #[must_use]
    pub fn cc(mut self, address: impl Into<String>) -> Self {
        self.cc.insert(address.into());
        self
    }

    #[must_use]
    pub fn bcc(mut self, address: impl Into<String>) -> Self {
        self.bcc.insert(address.into());
        self
    }

    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Notification {
        Notification::assemble(
            self.to,
            self.body,
            self.metadata,
            Payload::Email {
                subject: self.subject,
                from: self.from,
                html_body: self.html_body,
                cc: self.cc,
                bcc: self.bcc,
            },
        )
    }
}

/// Builder for [`Payload::Sms`] notifications.
#[derive(Debug)]
pub struct SmsBuilder {
    to: String,
    body: String,
    from: Option<String>,
    metadata: HashMap<String, String>,
}

impl SmsBuilder {
    fn new(to: String, body: String) -> Self {
        Self {
            to,
            body,
            from: None,
            metadata: HashMap::new(),
        }
    }

    #[must_use]
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Notification {
        Notification::assemble(self.to, self.body, self.metadata, Payload::Sms { from: self.from })
    }
}

/// Builder for [`Payload::Push`] notifications.
#[derive(Debug)]
pub struct PushBuilder {
    device_token: String,
    body: String,
    title: String,
    image_url: Option<String>,
    data: HashMap<String, String>,
    metadata: HashMap<String, String>,
}

impl PushBuilder {
    fn new(device_token: String, body: String) -> Self {
        Self {
            device_token,
            body,
            title: String::new(),
            image_url: None,
            data: HashMap::new(),
            metadata: HashMap::new(),
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Notification {
        Notification::assemble(
            self.device_token,
            self.body,
            self.metadata,
            Payload::Push {
                title: self.title,
                image_url: self.image_url,
                data: self.data,
            },
        )
    }
}

// ── Send outcomes ───────────────────────────────────────────────────────────

/// Lifecycle states of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    /// Created, waiting to be sent.
    Pending,
    /// Delivery confirmed by the provider.
    Sent,
    /// Delivery failed (validation or provider error).
    Failed,
    /// Retrying after a transient failure.
    Retrying,
}

/// Outcome of one send attempt.
///
/// Built only through [`NotificationResult::success`] and
/// [`NotificationResult::failure`], so exactly one of the provider message
/// id and the error message is ever populated, matching the status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    notification_id: String,
    status: NotificationStatus,
    provider_message_id: Option<String>,
    error_message: Option<String>,
    processed_at: DateTime<Utc>,
}

impl NotificationResult {
    /// Successful send, carrying the id the provider returned.
    #[must_use]
    pub fn success(notification_id: impl Into<String>, provider_message_id: impl Into<String>) -> Self {
        Self {
            notification_id: notification_id.into(),
            status: NotificationStatus::Sent,
            provider_message_id: Some(provider_message_id.into()),
            error_message: None,
            processed_at: Utc::now(),
        }
    }

    /// Failed send, carrying a human-readable reason.
    #[must_use]
    pub fn failure(notification_id: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            notification_id: notification_id.into(),
            status: NotificationStatus::Failed,
            provider_message_id: None,
            error_message: Some(error_message.into()),
            processed_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == NotificationStatus::Sent
    }

    #[must_use]
    pub fn notification_id(&self) -> &str {
        &self.notification_id
    }

    #[must_use]
    pub fn status(&self) -> NotificationStatus {
        self.status
    }

    #[must_use]
    pub fn provider_message_id(&self) -> Option<&str> {
        self.provider_message_id.as_deref()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn processed_at(&self) -> DateTime<Utc> {
        self.processed_at
    }
}

impl std::fmt::Display for NotificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_success() {
            write!(
                f,
                "result[sent] notification_id={}, provider_message_id={}",
                self.notification_id,
                self.provider_message_id.as_deref().unwrap_or("-"),
            )
        } else {
            write!(
                f,
                "result[failed] notification_id={}, error={}",
                self.notification_id,
                self.error_message.as_deref().unwrap_or("-"),
            )
        }
    }
}
