//! Wire models of Traffic Manager endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a Traffic Manager endpoint, used as a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointType {
    /// An Azure resource (cloud service, web app, public IP).
    AzureEndpoints,
    /// An endpoint outside Azure, addressed by host name.
    ExternalEndpoints,
    /// Another Traffic Manager profile.
    NestedEndpoints,
}

impl EndpointType {
    /// Returns the path segment of this endpoint type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AzureEndpoints => "azureEndpoints",
            Self::ExternalEndpoints => "externalEndpoints",
            Self::NestedEndpoints => "nestedEndpoints",
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether traffic is routed to an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointStatus {
    /// Included in routing.
    Enabled,
    /// Excluded from routing.
    Disabled,
}

/// Settings of a Traffic Manager endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointProperties {
    /// Resource id of an Azure endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_resource_id: Option<String>,
    /// DNS name of an external endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_status: Option<EndpointStatus>,
    /// Weight for the weighted routing method (1 to 1000).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    /// Priority for the priority routing method (1 to 1000).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Region of an external or nested endpoint for performance routing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_location: Option<String>,
    /// Health reported by monitoring; read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_monitor_status: Option<String>,
    /// Minimum healthy endpoints of a nested profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_child_endpoints: Option<i64>,
}

/// A Traffic Manager endpoint as sent and returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointInner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Namespace-qualified type, e.g.
    /// `Microsoft.Network/trafficManagerProfiles/externalEndpoints`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<EndpointProperties>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_decodes_camel_case_properties() {
        let endpoint: EndpointInner = serde_json::from_value(json!({
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/trafficManagerProfiles/p/externalEndpoints/e1",
            "name": "e1",
            "type": "Microsoft.Network/trafficManagerProfiles/externalEndpoints",
            "properties": {
                "target": "www.contoso.com",
                "endpointStatus": "Enabled",
                "weight": 10,
                "endpointLocation": "westus",
                "endpointMonitorStatus": "Online"
            }
        }))
        .unwrap();

        let properties = endpoint.properties.unwrap();
        assert_eq!(properties.target.as_deref(), Some("www.contoso.com"));
        assert_eq!(properties.endpoint_status, Some(EndpointStatus::Enabled));
        assert_eq!(properties.weight, Some(10));
        assert!(properties.priority.is_none());
    }

    #[test]
    fn test_unset_fields_are_not_serialized() {
        let endpoint = EndpointInner {
            properties: Some(EndpointProperties {
                target: Some("www.contoso.com".to_string()),
                ..EndpointProperties::default()
            }),
            ..EndpointInner::default()
        };
        assert_eq!(
            serde_json::to_value(&endpoint).unwrap(),
            json!({ "properties": { "target": "www.contoso.com" } })
        );
    }

    #[test]
    fn test_endpoint_type_path_segment() {
        assert_eq!(EndpointType::NestedEndpoints.to_string(), "nestedEndpoints");
    }
}
