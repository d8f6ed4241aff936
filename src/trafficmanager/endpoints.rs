//! Operations on Traffic Manager endpoints.

use crate::clients::HttpMethod;
use crate::config::ApiVersion;
use crate::rest::{
    get_path, require_body, Operation, RequestSpec, ResourceOperation, ResourcePath,
    ResponseShape, ResponseTable, ServiceClient, ServiceResponse, ValidationError,
};
use crate::trafficmanager::models::{EndpointInner, EndpointType};

/// The api-version of every endpoint operation.
pub const API_VERSION: ApiVersion = ApiVersion::from_static("2015-11-01");

const ENDPOINT: &str = "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/trafficmanagerprofiles/{profileName}/{endpointType}/{endpointName}";

const PARAMS: &[&str] = &[
    "subscriptionId",
    "resourceGroupName",
    "profileName",
    "endpointType",
    "endpointName",
];

/// Paths of endpoint operations.
pub const PATHS: &[ResourcePath] = &[
    ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, PARAMS, ENDPOINT),
    ResourcePath::new(
        HttpMethod::Put,
        ResourceOperation::CreateOrUpdate,
        PARAMS,
        ENDPOINT,
    ),
    ResourcePath::new(HttpMethod::Patch, ResourceOperation::Update, PARAMS, ENDPOINT),
    ResourcePath::new(HttpMethod::Delete, ResourceOperation::Delete, PARAMS, ENDPOINT),
];

/// 200 or 201 with the endpoint.
pub const CREATE_OR_UPDATE_RESPONSES: ResponseTable =
    ResponseTable::new(&[(200, ResponseShape::Body), (201, ResponseShape::Body)]);

/// 200 or 204, no body.
pub const DELETE_RESPONSES: ResponseTable =
    ResponseTable::new(&[(200, ResponseShape::Empty), (204, ResponseShape::Empty)]);

/// Low-level operations on the endpoints of Traffic Manager profiles.
#[derive(Debug, Clone)]
pub struct EndpointsClient {
    client: ServiceClient,
}

impl EndpointsClient {
    /// Creates an endpoints client.
    #[must_use]
    pub const fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    fn spec(
        name: &'static str,
        operation: ResourceOperation,
        resource_group: &str,
        profile: &str,
        endpoint_type: EndpointType,
        endpoint: &str,
    ) -> Result<RequestSpec, ValidationError> {
        let path = get_path(PATHS, operation, PARAMS).ok_or_else(|| {
            ValidationError::MissingParameter {
                operation: name,
                parameter: "endpointName".to_string(),
            }
        })?;
        Ok(RequestSpec::new(name, path, API_VERSION)
            .param("resourceGroupName", resource_group)
            .param("profileName", profile)
            .param("endpointType", endpoint_type.as_str())
            .param("endpointName", endpoint))
    }

    /// Reads one endpoint.
    pub fn get(
        &self,
        resource_group: &str,
        profile: &str,
        endpoint_type: EndpointType,
        endpoint: &str,
    ) -> Operation<EndpointInner> {
        match Self::spec(
            "Endpoints.get",
            ResourceOperation::Get,
            resource_group,
            profile,
            endpoint_type,
            endpoint,
        ) {
            Ok(spec) => self
                .client
                .send::<EndpointInner>(spec, ResponseTable::OK)
                .and_then(|response| require_body(response.status(), response.into_body())),
            Err(error) => Operation::failed(error),
        }
    }

    /// Creates or replaces an endpoint.
    pub fn create_or_update(
        &self,
        resource_group: &str,
        profile: &str,
        endpoint_type: EndpointType,
        endpoint: &str,
        parameters: &EndpointInner,
    ) -> Operation<EndpointInner> {
        match Self::spec(
            "Endpoints.createOrUpdate",
            ResourceOperation::CreateOrUpdate,
            resource_group,
            profile,
            endpoint_type,
            endpoint,
        ) {
            Ok(spec) => self
                .client
                .send::<EndpointInner>(spec.body(parameters), CREATE_OR_UPDATE_RESPONSES)
                .and_then(|response| require_body(response.status(), response.into_body())),
            Err(error) => Operation::failed(error),
        }
    }

    /// Updates the given fields of an endpoint.
    pub fn update(
        &self,
        resource_group: &str,
        profile: &str,
        endpoint_type: EndpointType,
        endpoint: &str,
        parameters: &EndpointInner,
    ) -> Operation<EndpointInner> {
        match Self::spec(
            "Endpoints.update",
            ResourceOperation::Update,
            resource_group,
            profile,
            endpoint_type,
            endpoint,
        ) {
            Ok(spec) => self
                .client
                .send::<EndpointInner>(spec.body(parameters), ResponseTable::OK)
                .and_then(|response| require_body(response.status(), response.into_body())),
            Err(error) => Operation::failed(error),
        }
    }

    /// Deletes an endpoint. Deleting a missing endpoint answers 204.
    pub fn delete(
        &self,
        resource_group: &str,
        profile: &str,
        endpoint_type: EndpointType,
        endpoint: &str,
    ) -> Operation<ServiceResponse<()>> {
        match Self::spec(
            "Endpoints.delete",
            ResourceOperation::Delete,
            resource_group,
            profile,
            endpoint_type,
            endpoint,
        ) {
            Ok(spec) => self
                .client
                .send::<serde_json::Value>(spec, DELETE_RESPONSES)
                .map(|response| response.map(|_| ())),
            Err(error) => Operation::failed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operation_uses_its_default_method() {
        for operation in [
            ResourceOperation::Get,
            ResourceOperation::CreateOrUpdate,
            ResourceOperation::Update,
            ResourceOperation::Delete,
        ] {
            let path = get_path(PATHS, operation, PARAMS).unwrap();
            assert_eq!(path.http_method, operation.default_http_method());
            assert!(path.template.contains("{endpointType}"));
        }
    }

    #[test]
    fn test_list_has_no_path() {
        let error = EndpointsClient::spec(
            "Endpoints.list",
            ResourceOperation::List,
            "rg1",
            "tm1",
            EndpointType::AzureEndpoints,
            "ep1",
        )
        .unwrap_err();
        assert!(matches!(
            error,
            ValidationError::MissingParameter { operation: "Endpoints.list", .. }
        ));
    }

    #[test]
    fn test_spec_builds_the_endpoint_request() {
        let spec = EndpointsClient::spec(
            "Endpoints.get",
            ResourceOperation::Get,
            "rg1",
            "tm1",
            EndpointType::ExternalEndpoints,
            "ep1",
        )
        .unwrap();
        assert_eq!(spec.operation(), "Endpoints.get");

        let subscription = crate::config::SubscriptionId::new("sub1").unwrap();
        let request = spec.into_request(&subscription).unwrap();
        assert_eq!(
            request.path,
            "subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Network/trafficmanagerprofiles/tm1/externalEndpoints/ep1"
        );
    }

    #[test]
    fn test_status_tables() {
        assert_eq!(CREATE_OR_UPDATE_RESPONSES.statuses(), vec![200, 201]);
        assert_eq!(DELETE_RESPONSES.shape_for(204), Some(ResponseShape::Empty));
        assert!(DELETE_RESPONSES.shape_for(202).is_none());
    }
}
