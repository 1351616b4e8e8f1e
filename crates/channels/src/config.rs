//! Named key/value configuration for provider backends.

use {
    crate::error::{Error, Result},
    std::collections::HashMap,
};

/// Configuration bag for one provider (API keys, account ids, …).
///
/// Required keys are pulled through [`ProviderConfig::require`], which
/// fails with a configuration error naming the missing key; providers
/// call it in their constructors so a misconfigured backend is rejected
/// before any send is attempted.
#[derive(Clone)]
pub struct ProviderConfig {
    provider_name: String,
    properties: HashMap<String, String>,
}

impl ProviderConfig {
    pub fn builder(provider_name: impl Into<String>) -> ProviderConfigBuilder {
        ProviderConfigBuilder {
            provider_name: provider_name.into(),
            properties: HashMap::new(),
        }
    }

    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// An optional property, `None` when absent.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// A mandatory property. Missing or blank values are a fatal
    /// configuration error.
    pub fn require(&self, key: &str) -> Result<&str> {
        match self.properties.get(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(Error::configuration(&self.provider_name, key)),
        }
    }
}

// Debug shows which keys are configured but never their values.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ProviderConfig")
            .field("provider_name", &self.provider_name)
            .field("keys", &keys)
            .finish()
    }
}

/// Accumulates properties for a [`ProviderConfig`].
#[derive(Debug)]
pub struct ProviderConfigBuilder {
    provider_name: String,
    properties: HashMap<String, String>,
}

impl ProviderConfigBuilder {
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Fails when the provider name is blank.
    pub fn build(self) -> Result<ProviderConfig> {
        if self.provider_name.trim().is_empty() {
            return Err(Error::invalid_input("provider name must not be blank"));
        }
        Ok(ProviderConfig {
            provider_name: self.provider_name,
            properties: self.properties,
        })
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_returns_present_values() {
        let config = ProviderConfig::builder("sendgrid")
            .property("api_key", "SG.secret")
            .build()
            .unwrap();
        assert_eq!(config.require("api_key").unwrap(), "SG.secret");
    }

    #[test]
    fn require_rejects_missing_and_blank_values() {
        let config = ProviderConfig::builder("twilio")
            .property("auth_token", "   ")
            .build()
            .unwrap();

        let missing = config.require("account_sid").unwrap_err();
        assert!(missing.to_string().contains("account_sid"));
        assert!(missing.to_string().contains("twilio"));

        assert!(config.require("auth_token").is_err());
    }

    #[test]
    fn blank_provider_name_is_rejected() {
        assert!(ProviderConfig::builder("  ").build().is_err());
    }

    #[test]
    fn debug_output_hides_property_values() {
        let config = ProviderConfig::builder("sendgrid")
            .property("api_key", "SG.super-secret")
            .build()
            .unwrap();
        let printed = format!("{config:?}");
        assert!(printed.contains("api_key"));
        assert!(!printed.contains("super-secret"));
    }
}
