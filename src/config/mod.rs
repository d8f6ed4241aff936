//! Configuration types for the ARM fluent SDK.
//!
//! This module provides the process-wide configuration consumed by the
//! request pipeline: the management endpoint, the subscription every resource
//! path is rooted at, and the `User-Agent` / `accept-language` headers.
//!
//! # Overview
//!
//! - [`ArmConfig`]: The configuration struct holding all SDK settings
//! - [`ArmConfigBuilder`]: A builder for constructing [`ArmConfig`] instances
//! - [`SubscriptionId`]: A validated subscription id
//! - [`BaseUrl`]: A validated management endpoint URL
//! - [`Region`]: A normalized region name
//! - [`ApiVersion`]: A resource provider API version
//!
//! # Example
//!
//! ```rust
//! use arm_fluent::{ArmConfig, SubscriptionId};
//!
//! let config = ArmConfig::builder()
//!     .subscription_id(SubscriptionId::new("my-subscription").unwrap())
//!     .user_agent_prefix("MyApp/1.0")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://management.azure.com");
//! assert_eq!(config.accept_language(), "en-US");
//! ```

mod newtypes;
mod version;

pub use newtypes::{BaseUrl, Region, SubscriptionId};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Default value of the `accept-language` header.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US";

/// Configuration for the ARM fluent SDK.
///
/// # Thread Safety
///
/// `ArmConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ArmConfig {
    subscription_id: SubscriptionId,
    base_url: BaseUrl,
    accept_language: String,
    user_agent_prefix: Option<String>,
}

impl ArmConfig {
    /// Creates a new builder for constructing an `ArmConfig`.
    #[must_use]
    pub fn builder() -> ArmConfigBuilder {
        ArmConfigBuilder::new()
    }

    /// Returns the subscription id.
    #[must_use]
    pub const fn subscription_id(&self) -> &SubscriptionId {
        &self.subscription_id
    }

    /// Returns the management endpoint.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the `accept-language` header value.
    #[must_use]
    pub fn accept_language(&self) -> &str {
        &self.accept_language
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ArmConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ArmConfig>();
};

/// Builder for constructing [`ArmConfig`] instances.
///
/// `subscription_id` is required. All other fields have defaults.
///
/// # Defaults
///
/// - `base_url`: `https://management.azure.com`
/// - `accept_language`: `en-US`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ArmConfigBuilder {
    subscription_id: Option<SubscriptionId>,
    base_url: Option<BaseUrl>,
    accept_language: Option<String>,
    user_agent_prefix: Option<String>,
}

impl ArmConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the subscription id (required).
    #[must_use]
    pub fn subscription_id(mut self, id: SubscriptionId) -> Self {
        self.subscription_id = Some(id);
        self
    }

    /// Overrides the management endpoint (sovereign clouds, test servers).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the `accept-language` header value.
    #[must_use]
    pub fn accept_language(mut self, language: impl Into<String>) -> Self {
        self.accept_language = Some(language.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ArmConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `subscription_id` is not set.
    pub fn build(self) -> Result<ArmConfig, ConfigError> {
        let subscription_id = self
            .subscription_id
            .ok_or(ConfigError::MissingRequiredField {
                field: "subscription_id",
            })?;

        if let Some(base_url) = &self.base_url {
            tracing::debug!("Overriding management endpoint with {}", base_url.as_ref());
        }

        Ok(ArmConfig {
            subscription_id,
            base_url: self.base_url.unwrap_or_default(),
            accept_language: self
                .accept_language
                .unwrap_or_else(|| DEFAULT_ACCEPT_LANGUAGE.to_string()),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription() -> SubscriptionId {
        SubscriptionId::new("sub-123").unwrap()
    }

    #[test]
    fn test_builder_requires_subscription_id() {
        let result = ArmConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "subscription_id"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ArmConfig::builder()
            .subscription_id(subscription())
            .build()
            .unwrap();

        assert_eq!(config.base_url(), &BaseUrl::default());
        assert_eq!(config.accept_language(), DEFAULT_ACCEPT_LANGUAGE);
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ArmConfig>();
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let base_url = BaseUrl::new("http://localhost:9000").unwrap();

        let config = ArmConfig::builder()
            .subscription_id(subscription())
            .base_url(base_url.clone())
            .accept_language("de-DE")
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.subscription_id().as_ref(), "sub-123");
        assert_eq!(config.base_url(), &base_url);
        assert_eq!(config.accept_language(), "de-DE");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }
}
