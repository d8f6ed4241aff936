//! Path building infrastructure for management operations.
//!
//! Every operation addresses a resource through a path template of the form
//! `subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/{namespace}/...`.
//! A resource kind declares its templates as a `const` table of
//! [`ResourcePath`] entries; [`get_path`] picks the most specific entry whose
//! parameters are all available and [`build_path`] interpolates the values.
//!
//! # Example
//!
//! ```rust
//! use arm_fluent::rest::{ResourcePath, ResourceOperation, get_path, build_path};
//! use arm_fluent::clients::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::List,
//!         &["subscriptionId", "resourceGroupName"],
//!         "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Cdn/profiles",
//!     ),
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::List,
//!         &["subscriptionId"],
//!         "subscriptions/{subscriptionId}/providers/Microsoft.Cdn/profiles",
//!     ),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::List, &["subscriptionId"]).unwrap();
//!
//! let mut params = HashMap::new();
//! params.insert("subscriptionId", "sub-1");
//! assert_eq!(
//!     build_path(path.template, &params),
//!     "subscriptions/sub-1/providers/Microsoft.Cdn/profiles"
//! );
//! ```

use crate::clients::HttpMethod;
use std::collections::HashMap;
use std::fmt::Display;

/// Operations that can be performed on a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Read one resource (GET).
    Get,
    /// Create or replace one resource (PUT).
    CreateOrUpdate,
    /// Partially update one resource (PATCH).
    Update,
    /// Remove one resource (DELETE).
    Delete,
    /// Read a collection, possibly paged (GET).
    List,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Get | Self::List => HttpMethod::Get,
            Self::CreateOrUpdate => HttpMethod::Put,
            Self::Update => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::CreateOrUpdate => "createOrUpdate",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }
}

/// A path configuration for one resource operation.
///
/// Templates use `{name}` placeholders. `params` lists every placeholder of
/// the template; all of them are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Required path parameters in order.
    pub params: &'static [&'static str],
    /// The path template with `{name}` placeholders, relative to the base URL.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    ///
    /// This is a `const fn` to allow paths to be defined as constants.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        params: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            params,
            template,
        }
    }

    /// Returns the number of required parameters for this path.
    #[must_use]
    pub const fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Checks if all required parameters are available.
    #[must_use]
    pub fn matches_params(&self, available: &[&str]) -> bool {
        self.params.iter().all(|param| available.contains(param))
    }
}

/// Selects the best matching path for an operation.
///
/// Among the paths for `operation` whose parameters are all available, the
/// one with the most parameters (the most specific) wins.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_params(available))
        .max_by_key(|p| p.param_count())
}

/// Returns the placeholder names of a template, in order.
#[must_use]
pub fn template_params(template: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        params.push(&after[..end]);
        rest = &after[end + 1..];
    }
    params
}

/// Builds a path from a template by interpolating parameter values.
///
/// Values are percent-encoded so that each one stays a single path segment.
/// Placeholders without a value are left unchanged.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, params: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in params {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &urlencoding::encode(&value.to_string()));
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Cdn/profiles/{profileName}";

    #[test]
    fn test_template_params_in_order() {
        assert_eq!(
            template_params(PROFILE),
            vec!["subscriptionId", "resourceGroupName", "profileName"]
        );
        assert!(template_params("providers/Microsoft.Cdn/operations").is_empty());
    }

    #[test]
    fn test_build_path_interpolates_all_params() {
        let mut params = HashMap::new();
        params.insert("subscriptionId", "sub");
        params.insert("resourceGroupName", "rg1");
        params.insert("profileName", "p1");

        assert_eq!(
            build_path(PROFILE, &params),
            "subscriptions/sub/resourceGroups/rg1/providers/Microsoft.Cdn/profiles/p1"
        );
    }

    #[test]
    fn test_build_path_encodes_values() {
        let mut params = HashMap::new();
        params.insert("profileName", "a b/c");

        assert_eq!(build_path("profiles/{profileName}", &params), "profiles/a%20b%2Fc");
    }

    #[test]
    fn test_build_path_handles_missing_params() {
        let params: HashMap<&str, &str> = HashMap::new();
        assert_eq!(build_path("profiles/{profileName}", &params), "profiles/{profileName}");
    }

    #[test]
    fn test_get_path_selects_most_specific_path() {
        const PATHS: &[ResourcePath] = &[
            ResourcePath::new(
                HttpMethod::Get,
                ResourceOperation::List,
                &["subscriptionId", "resourceGroupName"],
                "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/profiles",
            ),
            ResourcePath::new(
                HttpMethod::Get,
                ResourceOperation::List,
                &["subscriptionId"],
                "subscriptions/{subscriptionId}/profiles",
            ),
            ResourcePath::new(
                HttpMethod::Delete,
                ResourceOperation::Delete,
                &["subscriptionId", "resourceGroupName", "profileName"],
                PROFILE,
            ),
        ];

        let path = get_path(
            PATHS,
            ResourceOperation::List,
            &["subscriptionId", "resourceGroupName"],
        );
        assert_eq!(
            path.unwrap().template,
            "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/profiles"
        );

        let path = get_path(PATHS, ResourceOperation::List, &["subscriptionId"]);
        assert_eq!(path.unwrap().template, "subscriptions/{subscriptionId}/profiles");

        assert!(get_path(PATHS, ResourceOperation::Delete, &["subscriptionId"]).is_none());
        assert!(get_path(PATHS, ResourceOperation::Get, &["subscriptionId"]).is_none());
    }

    #[test]
    fn test_resource_operation_default_http_method() {
        assert_eq!(ResourceOperation::Get.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::List.default_http_method(), HttpMethod::Get);
        assert_eq!(
            ResourceOperation::CreateOrUpdate.default_http_method(),
            HttpMethod::Put
        );
        assert_eq!(ResourceOperation::Update.default_http_method(), HttpMethod::Patch);
        assert_eq!(ResourceOperation::Delete.default_http_method(), HttpMethod::Delete);
    }

    #[test]
    fn test_resource_path_matches_params() {
        let path = ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Get,
            &["subscriptionId", "profileName"],
            "subscriptions/{subscriptionId}/profiles/{profileName}",
        );

        assert!(path.matches_params(&["subscriptionId", "profileName", "extra"]));
        assert!(!path.matches_params(&["profileName"]));
        assert_eq!(path.param_count(), 2);
    }
}
