//! Validate → route → send orchestration.

use {
    crate::error::{Error, Result},
    courier_channels::Channel,
    courier_common::types::{ChannelType, Notification, NotificationResult},
    courier_validation::NotificationValidator,
    futures::future::join_all,
    std::{collections::HashMap, sync::Arc},
    tokio_util::sync::CancellationToken,
    tracing::{error, info},
};

/// Routes notifications to the channel registered for their type.
///
/// Built once via [`Dispatcher::builder`]; the registry and validator are
/// never mutated afterwards, so a `Dispatcher` is safely shared by many
/// concurrent sends without locking.
pub struct Dispatcher {
    channels: HashMap<ChannelType, Arc<dyn Channel>>,
    validator: NotificationValidator,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("channels", &self.channels.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Send one notification, raising on caller misuse.
    ///
    /// Validation failures and missing channels are errors: they mean
    /// the caller or the configuration is wrong, not that delivery
    /// failed. Once routing succeeds, any channel error is converted
    /// into a failed result and never propagates.
    pub async fn send(&self, notification: &Notification) -> Result<NotificationResult> {
        info!(
            notification_id = %notification.id,
            channel = %notification.channel_type(),
            recipient = %notification.recipient,
            "processing notification"
        );

        self.check_valid(notification)?;
        let channel = self.channel_for(notification.channel_type())?;
        Ok(deliver(channel.as_ref(), notification).await)
    }

    /// Send one notification, capturing every failure into the result.
    ///
    /// The settled counterpart of [`Dispatcher::send`]: callers composing
    /// futures never receive an error, only a success or failure value.
    pub async fn send_settled(&self, notification: &Notification) -> NotificationResult {
        match self.send(notification).await {
            Ok(result) => result,
            Err(err) => NotificationResult::failure(&notification.id, err.to_string()),
        }
    }

    /// Fan out independent sends concurrently and collect every outcome.
    ///
    /// Results are returned in input order regardless of completion
    /// order, and one notification's failure never cancels or blocks the
    /// others.
    pub async fn send_batch(&self, notifications: &[Notification]) -> Vec<NotificationResult> {
        info!(count = notifications.len(), "sending notification batch");
        join_all(notifications.iter().map(|n| self.send_settled(n))).await
    }

    /// [`Dispatcher::send_batch`] with cooperative cancellation.
    ///
    /// Entries that resolved before cancellation keep their result;
    /// unresolved entries report a cancellation failure.
    pub async fn send_batch_cancellable(
        &self,
        notifications: &[Notification],
        cancel: &CancellationToken,
    ) -> Vec<NotificationResult> {
        info!(count = notifications.len(), "sending cancellable notification batch");
        join_all(notifications.iter().map(|notification| async move {
            tokio::select! {
                result = self.send_settled(notification) => result,
                () = cancel.cancelled() => {
                    NotificationResult::failure(&notification.id, "send cancelled before completion")
                },
            }
        }))
        .await
    }

    /// True only when a channel is registered for `channel_type` and that
    /// channel reports itself available.
    #[must_use]
    pub fn is_channel_available(&self, channel_type: ChannelType) -> bool {
        self.channels
            .get(&channel_type)
            .is_some_and(|channel| channel.is_available())
    }

    fn check_valid(&self, notification: &Notification) -> Result<()> {
        let outcome = self.validator.validate(notification);
        if outcome.is_valid() {
            Ok(())
        } else {
            Err(Error::Validation {
                reasons: outcome.errors().join(", "),
            })
        }
    }

    fn channel_for(&self, channel_type: ChannelType) -> Result<&Arc<dyn Channel>> {
        self.channels.get(&channel_type).ok_or_else(|| {
            let mut registered: Vec<&str> =
                self.channels.keys().map(|ty| ty.as_str()).collect();
            registered.sort_unstable();
            Error::ChannelNotFound {
                requested: channel_type,
                registered: registered.join(", "),
            }
        })
    }
}

/// Invoke the channel, converting any unexpected fault into a failed
/// result; past routing, the dispatcher never lets an error escape.
async fn deliver(channel: &dyn Channel, notification: &Notification) -> NotificationResult {
    match channel.send(notification).await {
        Ok(result) => {
            info!(
                notification_id = %notification.id,
                success = result.is_success(),
                "send completed"
            );
            result
        },
        Err(err) => {
            error!(
                notification_id = %notification.id,
                error = %err,
                "channel send failed"
            );
            NotificationResult::failure(&notification.id, err.to_string())
        },
    }
}

/// Accumulates channel bindings and an optional validator.
///
/// Registering a second channel for the same type replaces the first;
/// building with no channels at all is an error.
#[derive(Default)]
pub struct DispatcherBuilder {
    channels: HashMap<ChannelType, Arc<dyn Channel>>,
    validator: Option<NotificationValidator>,
}

impl DispatcherBuilder {
    /// Register a channel under its own `channel_type()`. Last
    /// registration for a type wins.
    #[must_use]
    pub fn channel(mut self, channel: impl Channel + 'static) -> Self {
        self.channels.insert(channel.channel_type(), Arc::new(channel));
        self
    }

    /// Override the default validator.
    #[must_use]
    pub fn validator(mut self, validator: NotificationValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn build(self) -> Result<Dispatcher> {
        if self.channels.is_empty() {
            return Err(Error::NoChannels);
        }

        let mut registered: Vec<&str> = self.channels.keys().map(|ty| ty.as_str()).collect();
        registered.sort_unstable();
        info!(channels = ?registered, "dispatcher ready");

        Ok(Dispatcher {
            channels: self.channels,
            validator: self.validator.unwrap_or_default(),
        })
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        async_trait::async_trait,
        courier_channels::{Error as ChannelError, Result as ChannelResult},
        std::sync::atomic::{AtomicUsize, Ordering},
        std::time::Duration,
    };

    /// Test channel that counts invocations and answers per `behaviour`.
    struct StubChannel {
        channel_type: ChannelType,
        behaviour: Behaviour,
        available: bool,
        sends: AtomicUsize,
    }

    enum Behaviour {
        Succeed,
        FailResult,
        RaiseError,
        NeverResolve,
    }

    impl StubChannel {
        fn new(channel_type: ChannelType, behaviour: Behaviour) -> Self {
            Self {
                channel_type,
                behaviour,
                available: true,
                sends: AtomicUsize::new(0),
            }
        }

        fn unavailable(channel_type: ChannelType) -> Self {
            Self {
                available: false,
                ..Self::new(channel_type, Behaviour::Succeed)
            }
        }
    }

    #[async_trait]
    impl Channel for StubChannel {
        async fn send(&self, notification: &Notification) -> ChannelResult<NotificationResult> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            match self.behaviour {
                Behaviour::Succeed => Ok(NotificationResult::success(
                    &notification.id,
                    format!("{}-msg-1", self.channel_type),
                )),
                Behaviour::FailResult => {
                    Ok(NotificationResult::failure(&notification.id, "provider said no"))
                },
                Behaviour::RaiseError => Err(ChannelError::send("connection reset")),
                Behaviour::NeverResolve => {
                    futures::future::pending::<()>().await;
                    unreachable!()
                },
            }
        }

        fn channel_type(&self) -> ChannelType {
            self.channel_type
        }

        fn is_available(&self) -> bool {
            self.available
        }
    }

    fn email() -> Notification {
        Notification::email("user@example.com", "body").subject("subject").build()
    }

    fn sms() -> Notification {
        Notification::sms("+51999888777", "hello").build()
    }

    // ── builder ─────────────────────────────────────────────────────────────

    #[test]
    fn build_without_channels_fails() {
        let err = Dispatcher::builder().build().unwrap_err();
        assert!(matches!(err, Error::NoChannels));
    }

    #[test]
    fn re_registering_a_type_replaces_the_binding() {
        let dispatcher = Dispatcher::builder()
            .channel(StubChannel::unavailable(ChannelType::Email))
            .channel(StubChannel::new(ChannelType::Email, Behaviour::Succeed))
            .build()
            .unwrap();
        // Last registration wins: the available stub is the active one.
        assert!(dispatcher.is_channel_available(ChannelType::Email));
        assert_eq!(dispatcher.channels.len(), 1);
    }

    // ── routing ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn send_routes_to_the_matching_channel_exactly_once() {
        let email_channel = Arc::new(StubChannel::new(ChannelType::Email, Behaviour::Succeed));
        let sms_channel = Arc::new(StubChannel::new(ChannelType::Sms, Behaviour::Succeed));
        let dispatcher = Dispatcher::builder()
            .channel(Arc::clone(&email_channel))
            .channel(Arc::clone(&sms_channel))
            .build()
            .unwrap();

        let result = dispatcher.send(&email()).await.unwrap();

        assert!(result.is_success());
        assert_eq!(email_channel.sends.load(Ordering::SeqCst), 1);
        assert_eq!(sms_channel.sends.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unregistered_type_lists_registered_channels() {
        let dispatcher = Dispatcher::builder()
            .channel(StubChannel::new(ChannelType::Email, Behaviour::Succeed))
            .channel(StubChannel::new(ChannelType::Sms, Behaviour::Succeed))
            .build()
            .unwrap();

        let push = Notification::push("device-token-123456", "body").title("t").build();
        let err = dispatcher.send(&push).await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("push"));
        assert!(message.contains("email"));
        assert!(message.contains("sms"));
    }

    // ── validation ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn invalid_notification_raises_and_never_reaches_the_channel() {
        let channel = Arc::new(StubChannel::new(ChannelType::Email, Behaviour::Succeed));
        let dispatcher = Dispatcher::builder().channel(Arc::clone(&channel)).build().unwrap();

        let invalid = Notification::email("not-an-email", "").build();
        let err = dispatcher.send(&invalid).await.unwrap_err();

        assert!(matches!(err, Error::Validation { .. }));
        // All collected reasons are joined into the message.
        assert!(err.to_string().contains("body"));
        assert_eq!(channel.sends.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn send_settled_captures_validation_failure_as_result() {
        let dispatcher = Dispatcher::builder()
            .channel(StubChannel::new(ChannelType::Email, Behaviour::Succeed))
            .build()
            .unwrap();

        let invalid = Notification::email("user@example.com", "body").build();
        let result = dispatcher.send_settled(&invalid).await;

        assert!(!result.is_success());
        assert_eq!(result.notification_id(), invalid.id);
        assert!(result.error_message().unwrap().contains("subject"));
    }

    // ── fault conversion ────────────────────────────────────────────────────

    #[tokio::test]
    async fn channel_error_after_routing_becomes_failed_result() {
        let dispatcher = Dispatcher::builder()
            .channel(StubChannel::new(ChannelType::Email, Behaviour::RaiseError))
            .build()
            .unwrap();

        let result = dispatcher.send(&email()).await.unwrap();

        assert!(!result.is_success());
        assert!(result.error_message().unwrap().contains("connection reset"));
    }

    #[tokio::test]
    async fn failed_result_from_channel_passes_through_unchanged() {
        let dispatcher = Dispatcher::builder()
            .channel(StubChannel::new(ChannelType::Email, Behaviour::FailResult))
            .build()
            .unwrap();

        let result = dispatcher.send(&email()).await.unwrap();
        assert_eq!(result.error_message(), Some("provider said no"));
    }

    // ── batch fan-out ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn batch_preserves_order_and_isolates_failures() {
        let dispatcher = Dispatcher::builder()
            .channel(StubChannel::new(ChannelType::Email, Behaviour::Succeed))
            .channel(StubChannel::new(ChannelType::Sms, Behaviour::Succeed))
            .build()
            .unwrap();

        let a = email();
        let b = Notification::sms("missing-plus", "hello").build(); // fails validation
        let c = email();
        let batch = vec![a.clone(), b.clone(), c.clone()];

        let results = dispatcher.send_batch(&batch).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].notification_id(), a.id);
        assert_eq!(results[1].notification_id(), b.id);
        assert_eq!(results[2].notification_id(), c.id);
        assert!(results[0].is_success());
        assert!(!results[1].is_success());
        assert!(results[2].is_success());
    }

    #[tokio::test]
    async fn empty_batch_returns_no_results() {
        let dispatcher = Dispatcher::builder()
            .channel(StubChannel::new(ChannelType::Email, Behaviour::Succeed))
            .build()
            .unwrap();
        assert!(dispatcher.send_batch(&[]).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_batch_keeps_resolved_entries_and_fails_the_rest() {
        let dispatcher = Dispatcher::builder()
            .channel(StubChannel::new(ChannelType::Email, Behaviour::Succeed))
            .channel(StubChannel::new(ChannelType::Sms, Behaviour::NeverResolve))
            .build()
            .unwrap();

        let fast = email();
        let stuck = sms();
        let batch = vec![fast.clone(), stuck.clone()];

        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let results = dispatcher.send_batch_cancellable(&batch, &cancel).await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_success());
        assert!(!results[1].is_success());
        assert!(results[1].error_message().unwrap().contains("cancelled"));
    }

    // ── availability ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn availability_requires_registration_and_a_ready_channel() {
        let dispatcher = Dispatcher::builder()
            .channel(StubChannel::new(ChannelType::Email, Behaviour::Succeed))
            .channel(StubChannel::unavailable(ChannelType::Sms))
            .build()
            .unwrap();

        assert!(dispatcher.is_channel_available(ChannelType::Email));
        assert!(!dispatcher.is_channel_available(ChannelType::Sms));
        assert!(!dispatcher.is_channel_available(ChannelType::Push));
    }

    #[tokio::test]
    async fn availability_is_idempotent() {
        let dispatcher = Dispatcher::builder()
            .channel(StubChannel::new(ChannelType::Email, Behaviour::Succeed))
            .build()
            .unwrap();

        let first = dispatcher.is_channel_available(ChannelType::Email);
        for _ in 0..5 {
            assert_eq!(dispatcher.is_channel_available(ChannelType::Email), first);
        }
    }
}
