//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated subscription id.
///
/// The subscription is the first segment of every resource path, so the
/// value must be non-empty and usable as a single path segment.
///
/// # Example
///
/// ```rust
/// use arm_fluent::SubscriptionId;
///
/// let sub = SubscriptionId::new("00000000-0000-0000-0000-000000000000").unwrap();
/// assert_eq!(sub.as_ref(), "00000000-0000-0000-0000-000000000000");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(String);

impl SubscriptionId {
    /// Creates a new validated subscription id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySubscriptionId`] if the id is empty and
    /// [`ConfigError::InvalidSubscriptionId`] if it contains `/` or whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        let id = id.trim().to_string();
        if id.is_empty() {
            return Err(ConfigError::EmptySubscriptionId);
        }
        if id.contains('/') || id.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidSubscriptionId { id });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for SubscriptionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for SubscriptionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SubscriptionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated base URL for the management endpoint.
///
/// Trailing slashes are stripped so that paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use arm_fluent::BaseUrl;
///
/// let url = BaseUrl::new("https://management.azure.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://management.azure.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("management.azure.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// The public cloud management endpoint.
    pub const DEFAULT: &'static str = "https://management.azure.com";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme or host,
    /// or carries a query string or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        if url.contains(['?', '#']) {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);

        if host_start == host_end {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        let url = Self::DEFAULT.to_string();
        Self {
            scheme_end: 5,
            host_start: 8,
            host_end: url.len(),
            url,
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

/// A validated region (location) name such as `westus` or `centralus`.
///
/// The service normalizes display names (`"Central US"`) to the compact
/// lowercase form, so construction does the same.
///
/// # Example
///
/// ```rust
/// use arm_fluent::Region;
///
/// let region = Region::new("Central US").unwrap();
/// assert_eq!(region.as_ref(), "centralus");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region(String);

impl Region {
    /// Creates a region from a display or compact name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRegion`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        let compact: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if compact.is_empty() || compact.contains('/') {
            return Err(ConfigError::InvalidRegion { region: name });
        }
        Ok(Self(compact))
    }

    /// `westus`
    #[must_use]
    pub fn us_west() -> Self {
        Self("westus".to_string())
    }

    /// `centralus`
    #[must_use]
    pub fn us_central() -> Self {
        Self("centralus".to_string())
    }

    /// `eastus`
    #[must_use]
    pub fn us_east() -> Self {
        Self("eastus".to_string())
    }

    /// `westeurope`
    #[must_use]
    pub fn europe_west() -> Self {
        Self("westeurope".to_string())
    }
}

impl AsRef<str> for Region {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Region {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_id_rejects_empty_string() {
        assert!(matches!(
            SubscriptionId::new(""),
            Err(ConfigError::EmptySubscriptionId)
        ));
        assert!(matches!(
            SubscriptionId::new("   "),
            Err(ConfigError::EmptySubscriptionId)
        ));
    }

    #[test]
    fn test_subscription_id_rejects_path_separators() {
        assert!(matches!(
            SubscriptionId::new("abc/def"),
            Err(ConfigError::InvalidSubscriptionId { .. })
        ));
        assert!(SubscriptionId::new("abc def").is_err());
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("https://management.azure.com/").unwrap();
        assert_eq!(url.as_ref(), "https://management.azure.com");
    }

    #[test]
    fn test_base_url_with_port_and_path() {
        let url = BaseUrl::new("http://127.0.0.1:8080/arm").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), Some("127.0.0.1"));
        assert_eq!(url.as_ref(), "http://127.0.0.1:8080/arm");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(BaseUrl::new("management.azure.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("://example.com").is_err());
        assert!(BaseUrl::new("https://example.com?x=1").is_err());
    }

    #[test]
    fn test_default_base_url_matches_parsed() {
        let parsed = BaseUrl::new(BaseUrl::DEFAULT).unwrap();
        assert_eq!(BaseUrl::default(), parsed);
    }

    #[test]
    fn test_region_normalizes_display_names() {
        assert_eq!(Region::new("Central US").unwrap(), Region::us_central());
        assert_eq!(Region::new("westus").unwrap().as_ref(), "westus");
        assert!(Region::new("  ").is_err());
    }

    #[test]
    fn test_region_round_trip_serialization() {
        let region = Region::europe_west();
        let json = serde_json::to_string(&region).unwrap();
        assert_eq!(json, r#""westeurope""#);
        let restored: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(region, restored);
    }
}
