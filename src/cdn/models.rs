//! Wire models of the CDN resource provider.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Pricing tier of a CDN profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkuName {
    /// Standard tier served by Verizon.
    #[serde(rename = "Standard_Verizon")]
    StandardVerizon,
    /// Premium tier served by Verizon.
    #[serde(rename = "Premium_Verizon")]
    PremiumVerizon,
    /// Custom Verizon tier.
    #[serde(rename = "Custom_Verizon")]
    CustomVerizon,
    /// Standard tier served by Akamai.
    #[serde(rename = "Standard_Akamai")]
    StandardAkamai,
}

impl SkuName {
    /// Returns the wire name of the tier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StandardVerizon => "Standard_Verizon",
            Self::PremiumVerizon => "Premium_Verizon",
            Self::CustomVerizon => "Custom_Verizon",
            Self::StandardAkamai => "Standard_Akamai",
        }
    }
}

impl fmt::Display for SkuName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pricing tier of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    /// Tier name.
    pub name: SkuName,
}

/// Read-only state of a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileProperties {
    /// Resource state (e.g. `Active`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_state: Option<String>,
    /// Provisioning state (e.g. `Succeeded`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

/// A CDN profile as sent and returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInner {
    /// Canonical id; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource name; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Namespace-qualified type; set by the service.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Region name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Resource tags.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// Pricing tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,
    /// Read-only state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ProfileProperties>,
}

/// PATCH body of a profile: only tags can change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdateParameters {
    /// The complete new tag set.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// How an endpoint treats query strings when caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryStringCachingBehavior {
    /// Cache one copy regardless of the query string.
    IgnoreQueryString,
    /// Never cache requests with a query string.
    BypassCaching,
    /// Cache each distinct URL.
    UseQueryString,
    /// Provider default.
    NotSet,
}

/// Action of a geo filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoFilterAction {
    /// Deny access from the listed countries.
    Block,
    /// Allow access only from the listed countries.
    Allow,
}

/// Country-based access rule for one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoFilter {
    /// Path the rule applies to (e.g. `/pictures/`).
    pub relative_path: String,
    /// Block or allow.
    pub action: GeoFilterAction,
    /// Two-letter ISO country codes.
    pub country_codes: Vec<String>,
}

/// Host and ports of an origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepCreatedOriginProperties {
    /// Origin address (domain name or IP).
    pub host_name: String,
    /// HTTP port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_port: Option<u16>,
    /// HTTPS port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https_port: Option<u16>,
}

/// An origin created together with its endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepCreatedOrigin {
    /// Origin name, unique within the endpoint.
    pub name: String,
    /// Host and ports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<DeepCreatedOriginProperties>,
}

/// Configuration and state of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointProperties {
    /// Public host name (`{endpoint}.azureedge.net`); set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    /// Host header sent to the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_host_header: Option<String>,
    /// Path prefix on the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_path: Option<String>,
    /// MIME types compressed at the edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_types_to_compress: Option<Vec<String>>,
    /// Whether edge compression is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_compression_enabled: Option<bool>,
    /// Whether HTTP traffic is allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_http_allowed: Option<bool>,
    /// Whether HTTPS traffic is allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_https_allowed: Option<bool>,
    /// Query string caching mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_caching_behavior: Option<QueryStringCachingBehavior>,
    /// Optimization scenario (e.g. `GeneralWebDelivery`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization_type: Option<String>,
    /// Country-based access rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_filters: Option<Vec<GeoFilter>>,
    /// Origins the endpoint pulls from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<DeepCreatedOrigin>,
    /// Resource state (e.g. `Running`); set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_state: Option<String>,
    /// Provisioning state; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

/// An endpoint as sent and returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointInner {
    /// Canonical id; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource name; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Namespace-qualified type; set by the service.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Region name; defaults to the profile's region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Resource tags.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// Configuration and state.
    #[serde(default)]
    pub properties: EndpointProperties,
}

/// Mutable endpoint settings for a PATCH.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointPropertiesUpdateParameters {
    /// Host header sent to the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_host_header: Option<String>,
    /// Path prefix on the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_path: Option<String>,
    /// MIME types compressed at the edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_types_to_compress: Option<Vec<String>>,
    /// Whether edge compression is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_compression_enabled: Option<bool>,
    /// Whether HTTP traffic is allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_http_allowed: Option<bool>,
    /// Whether HTTPS traffic is allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_https_allowed: Option<bool>,
    /// Query string caching mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_caching_behavior: Option<QueryStringCachingBehavior>,
    /// Optimization scenario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization_type: Option<String>,
    /// Country-based access rules; an empty list removes all rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_filters: Option<Vec<GeoFilter>>,
}

/// PATCH body of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointUpdateParameters {
    /// The complete new tag set.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// Settings to change.
    #[serde(default)]
    pub properties: EndpointPropertiesUpdateParameters,
}

impl From<&EndpointInner> for EndpointUpdateParameters {
    fn from(endpoint: &EndpointInner) -> Self {
        let properties = &endpoint.properties;
        Self {
            tags: endpoint.tags.clone(),
            properties: EndpointPropertiesUpdateParameters {
                origin_host_header: properties.origin_host_header.clone(),
                origin_path: properties.origin_path.clone(),
                content_types_to_compress: properties.content_types_to_compress.clone(),
                is_compression_enabled: properties.is_compression_enabled,
                is_http_allowed: properties.is_http_allowed,
                is_https_allowed: properties.is_https_allowed,
                query_string_caching_behavior: properties.query_string_caching_behavior,
                optimization_type: properties.optimization_type.clone(),
                geo_filters: properties.geo_filters.clone(),
            },
        }
    }
}
