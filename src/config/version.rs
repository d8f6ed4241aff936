//! Service API version definitions.
//!
//! Every management operation carries a mandatory `api-version` query
//! parameter whose value is fixed per resource provider. This module provides
//! the [`ApiVersion`] type used in operation tables.

use crate::error::ConfigError;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A resource provider API version such as `2016-04-02` or `2017-03-01-preview`.
///
/// Versions used in static operation tables are created with the `const`
/// constructor [`ApiVersion::from_static`]; user-provided versions go through
/// [`ApiVersion::new`], which validates the format.
///
/// # Example
///
/// ```rust
/// use arm_fluent::ApiVersion;
///
/// const CDN: ApiVersion = ApiVersion::from_static("2016-04-02");
/// assert_eq!(CDN.to_string(), "2016-04-02");
///
/// let preview: ApiVersion = "2017-03-01-preview".parse().unwrap();
/// assert!(preview.is_preview());
/// assert!(preview > CDN);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiVersion(Cow<'static, str>);

impl ApiVersion {
    const PREVIEW_SUFFIX: &'static str = "-preview";

    /// Creates a version from a static string without validation.
    ///
    /// Intended for operation tables where the value is a compile-time constant.
    #[must_use]
    pub const fn from_static(version: &'static str) -> Self {
        Self(Cow::Borrowed(version))
    }

    /// Creates a new validated API version.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] if the value is not
    /// `YYYY-MM-DD` optionally followed by `-preview`.
    pub fn new(version: impl Into<String>) -> Result<Self, ConfigError> {
        let version = version.into();
        if Self::is_valid(&version) {
            Ok(Self(Cow::Owned(version)))
        } else {
            Err(ConfigError::InvalidApiVersion { version })
        }
    }

    /// Returns `true` for `-preview` versions.
    #[must_use]
    pub fn is_preview(&self) -> bool {
        self.0.ends_with(Self::PREVIEW_SUFFIX)
    }

    /// Returns the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(version: &str) -> bool {
        let date = version
            .strip_suffix(Self::PREVIEW_SUFFIX)
            .unwrap_or(version);
        let parts: Vec<&str> = date.split('-').collect();
        if parts.len() != 3 {
            return false;
        }
        let widths = [4, 2, 2];
        let all_digits = parts
            .iter()
            .zip(widths)
            .all(|(part, width)| part.len() == width && part.chars().all(|c| c.is_ascii_digit()));
        if !all_digits {
            return false;
        }
        let month: u32 = parts[1].parse().unwrap_or(0);
        let day: u32 = parts[2].parse().unwrap_or(0);
        (1..=12).contains(&month) && (1..=31).contains(&day)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ApiVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
