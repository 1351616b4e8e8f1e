//! Channel-aware notification validator.

use {
    crate::result::ValidationResult,
    courier_common::types::{Notification, Payload},
    regex::Regex,
    std::sync::LazyLock,
};

/// Simplified RFC 5322 address: `local@domain.tld`, ASCII, TLD of 2+ letters.
#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern is valid")
});

/// E.164 international number: `+` then 7-15 digits, no leading zero.
#[allow(clippy::expect_used)]
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").expect("phone pattern is valid"));

/// One SMS segment under the GSM standard.
const SMS_MAX_CHARS: usize = 160;

/// Firebase and OneSignal both reject obviously truncated tokens.
const MIN_DEVICE_TOKEN_CHARS: usize = 10;

/// Validates notifications against common and per-channel rules.
///
/// Stateless; a single instance is safely shared by concurrent sends.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationValidator;

impl NotificationValidator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate a notification, collecting every applicable error.
    ///
    /// Channel-specific rules only run when the common rules pass, so a
    /// blank recipient is reported once rather than also failing the
    /// format check.
    #[must_use]
    pub fn validate(&self, notification: &Notification) -> ValidationResult {
        let mut errors = Vec::new();

        validate_common(notification, &mut errors);
        if errors.is_empty() {
            validate_specific(notification, &mut errors);
        }

        if errors.is_empty() {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(errors)
        }
    }
}

fn validate_common(notification: &Notification, errors: &mut Vec<String>) {
    if notification.recipient.trim().is_empty() {
        errors.push("recipient is required".to_string());
    }

    if notification.body.trim().is_empty() {
        errors.push("message body is required".to_string());
    }
}

fn validate_specific(notification: &Notification, errors: &mut Vec<String>) {
    match &notification.payload {
        Payload::Email { subject, .. } => validate_email(&notification.recipient, subject, errors),
        Payload::Sms { .. } => validate_sms(&notification.recipient, &notification.body, errors),
        Payload::Push { title, .. } => validate_push(&notification.recipient, title, errors),
    }
}

fn validate_email(recipient: &str, subject: &str, errors: &mut Vec<String>) {
    if !EMAIL_PATTERN.is_match(recipient) {
        errors.push(format!("invalid email address: {recipient}"));
    }

    if subject.trim().is_empty() {
        errors.push("subject is required for email".to_string());
    }
}

fn validate_sms(recipient: &str, body: &str, errors: &mut Vec<String>) {
    if !PHONE_PATTERN.is_match(recipient) {
        errors.push(format!(
            "invalid phone number (expected E.164, e.g. +51999888777): {recipient}"
        ));
    }

    let length = body.chars().count();
    if length > SMS_MAX_CHARS {
        errors.push(format!("sms body exceeds {SMS_MAX_CHARS} characters (got {length})"));
    }
}

fn validate_push(device_token: &str, title: &str, errors: &mut Vec<String>) {
    if device_token.chars().count() < MIN_DEVICE_TOKEN_CHARS {
        errors.push(format!(
            "device token is too short (minimum {MIN_DEVICE_TOKEN_CHARS} characters)"
        ));
    }

    if title.trim().is_empty() {
        errors.push("title is required for push".to_string());
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, courier_common::types::Notification};

    fn validator() -> NotificationValidator {
        NotificationValidator::new()
    }

    fn valid_email() -> Notification {
        Notification::email("user@example.com", "body").subject("subject").build()
    }

    fn valid_sms() -> Notification {
        Notification::sms("+51999888777", "short message").build()
    }

    fn valid_push() -> Notification {
        Notification::push("device-token-123456", "body").title("title").build()
    }

    // ── common rules ────────────────────────────────────────────────────────

    #[test]
    fn blank_recipient_is_invalid() {
        let email = Notification::email("   ", "body").subject("s").build();
        let result = validator().validate(&email);
        assert!(!result.is_valid());
        assert!(result.errors()[0].contains("recipient"));
    }

    #[test]
    fn blank_body_is_invalid() {
        let sms = Notification::sms("+51999888777", "").build();
        let result = validator().validate(&sms);
        assert!(!result.is_valid());
        assert!(result.errors().iter().any(|e| e.contains("body")));
    }

    #[test]
    fn blank_recipient_and_body_are_both_reported() {
        let push = Notification::push("", "").title("t").build();
        let result = validator().validate(&push);
        assert_eq!(result.errors().len(), 2);
    }

    #[test]
    fn common_failure_short_circuits_channel_checks() {
        // Blank recipient would also fail the email format check, but only
        // the common error is reported.
        let email = Notification::email("", "body").subject("s").build();
        let result = validator().validate(&email);
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("recipient"));
    }

    // ── email ───────────────────────────────────────────────────────────────

    #[test]
    fn well_formed_email_is_valid() {
        assert!(validator().validate(&valid_email()).is_valid());
    }

    #[test]
    fn malformed_email_address_is_rejected() {
        let email = Notification::email("not-an-email", "body").subject("s").build();
        let result = validator().validate(&email);
        assert!(!result.is_valid());
        assert!(result.errors()[0].contains("email"));
        assert!(result.errors()[0].contains("not-an-email"));
    }

    #[test]
    fn email_domain_needs_a_tld() {
        let email = Notification::email("user@localhost", "body").subject("s").build();
        assert!(!validator().validate(&email).is_valid());
    }

    #[test]
    fn blank_subject_is_rejected_even_with_valid_address() {
        let email = Notification::email("user@example.com", "body").build();
        let result = validator().validate(&email);
        assert!(!result.is_valid());
        assert!(result.errors()[0].contains("subject"));
    }

    #[test]
    fn bad_address_and_blank_subject_are_both_collected() {
        let email = Notification::email("nope", "body").build();
        let result = validator().validate(&email);
        assert_eq!(result.errors().len(), 2);
    }

    // ── sms ─────────────────────────────────────────────────────────────────

    #[test]
    fn e164_number_is_valid() {
        assert!(validator().validate(&valid_sms()).is_valid());
    }

    #[test]
    fn number_without_plus_prefix_is_rejected() {
        let sms = Notification::sms("999888777", "hi").build();
        let result = validator().validate(&sms);
        assert!(!result.is_valid());
        assert!(result.errors()[0].contains("phone"));
    }

    #[test]
    fn number_with_leading_zero_is_rejected() {
        let sms = Notification::sms("+0999888777", "hi").build();
        assert!(!validator().validate(&sms).is_valid());
    }

    #[test]
    fn body_of_exactly_160_chars_passes() {
        let sms = Notification::sms("+51999888777", "a".repeat(160)).build();
        assert!(validator().validate(&sms).is_valid());
    }

    #[test]
    fn body_of_161_chars_reports_the_limit_and_length() {
        let sms = Notification::sms("+51999888777", "a".repeat(161)).build();
        let result = validator().validate(&sms);
        assert!(!result.is_valid());
        assert!(result.errors()[0].contains("160"));
        assert!(result.errors()[0].contains("161"));
    }

    // ── push ────────────────────────────────────────────────────────────────

    #[test]
    fn token_of_ten_chars_with_title_passes() {
        let push = Notification::push("0123456789", "body").title("t").build();
        assert!(validator().validate(&push).is_valid());
    }

    #[test]
    fn nine_char_token_is_too_short() {
        let push = Notification::push("012345678", "body").title("t").build();
        let result = validator().validate(&push);
        assert!(!result.is_valid());
        assert!(result.errors()[0].contains("token"));
    }

    #[test]
    fn blank_title_fails_independently_of_token_length() {
        let push = Notification::push("device-token-123456", "body").build();
        let result = validator().validate(&push);
        assert!(!result.is_valid());
        assert!(result.errors()[0].contains("title"));
    }

    #[test]
    fn valid_push_notification_passes() {
        assert!(validator().validate(&valid_push()).is_valid());
    }
}
