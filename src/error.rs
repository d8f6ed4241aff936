//! Error types for the ARM fluent SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use arm_fluent::{ConfigError, SubscriptionId};
//!
//! let result = SubscriptionId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptySubscriptionId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Subscription id cannot be empty.
    #[error("Subscription id cannot be empty. Please provide the subscription to operate on.")]
    EmptySubscriptionId,

    /// Subscription id contains characters that cannot appear in a path segment.
    #[error("Invalid subscription id '{id}'. Subscription ids cannot contain '/' or whitespace.")]
    InvalidSubscriptionId {
        /// The invalid id that was provided.
        id: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM-DD' optionally followed by '-preview'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://management.azure.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Region name is invalid.
    #[error("Invalid region '{region}'. Region names are non-empty and contain no whitespace.")]
    InvalidRegion {
        /// The invalid region that was provided.
        region: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_subscription_error_message() {
        let error = ConfigError::EmptySubscriptionId;
        let message = error.to_string();
        assert!(message.contains("Subscription id cannot be empty"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("scheme"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "subscription_id",
        };
        let message = error.to_string();
        assert!(message.contains("subscription_id"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptySubscriptionId;
        let _: &dyn std::error::Error = &error;
    }
}
