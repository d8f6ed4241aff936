//! Operation tables and clients for CDN profiles and endpoints.

use crate::cdn::models::{
    EndpointInner, EndpointUpdateParameters, ProfileInner, ProfileUpdateParameters,
};
use crate::clients::HttpMethod;
use crate::config::ApiVersion;
use crate::rest::{
    get_path, require_body, Operation, PagedOperation, RequestSpec, ResourceOperation,
    ResourcePath, ResponseShape, ResponseTable, ServiceClient, ServiceResponse, ValidationError,
};

/// The api-version of every CDN operation.
pub const API_VERSION: ApiVersion = ApiVersion::from_static("2016-04-02");

/// The provider namespace of CDN resources.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.Cdn";

const PROFILE: &str = "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Cdn/profiles/{profileName}";
const ENDPOINT: &str = "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Cdn/profiles/{profileName}/endpoints/{endpointName}";

/// Paths of profile operations.
pub const PROFILE_PATHS: &[ResourcePath] = &[
    ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::Get,
        &["subscriptionId", "resourceGroupName", "profileName"],
        PROFILE,
    ),
    ResourcePath::new(
        HttpMethod::Put,
        ResourceOperation::CreateOrUpdate,
        &["subscriptionId", "resourceGroupName", "profileName"],
        PROFILE,
    ),
    ResourcePath::new(
        HttpMethod::Patch,
        ResourceOperation::Update,
        &["subscriptionId", "resourceGroupName", "profileName"],
        PROFILE,
    ),
    ResourcePath::new(
        HttpMethod::Delete,
        ResourceOperation::Delete,
        &["subscriptionId", "resourceGroupName", "profileName"],
        PROFILE,
    ),
    ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::List,
        &["subscriptionId", "resourceGroupName"],
        "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Cdn/profiles",
    ),
    ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::List,
        &["subscriptionId"],
        "subscriptions/{subscriptionId}/providers/Microsoft.Cdn/profiles",
    ),
];

/// Paths of endpoint operations.
pub const ENDPOINT_PATHS: &[ResourcePath] = &[
    ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::Get,
        &["subscriptionId", "resourceGroupName", "profileName", "endpointName"],
        ENDPOINT,
    ),
    ResourcePath::new(
        HttpMethod::Put,
        ResourceOperation::CreateOrUpdate,
        &["subscriptionId", "resourceGroupName", "profileName", "endpointName"],
        ENDPOINT,
    ),
    ResourcePath::new(
        HttpMethod::Patch,
        ResourceOperation::Update,
        &["subscriptionId", "resourceGroupName", "profileName", "endpointName"],
        ENDPOINT,
    ),
    ResourcePath::new(
        HttpMethod::Delete,
        ResourceOperation::Delete,
        &["subscriptionId", "resourceGroupName", "profileName", "endpointName"],
        ENDPOINT,
    ),
    ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::List,
        &["subscriptionId", "resourceGroupName", "profileName"],
        "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Cdn/profiles/{profileName}/endpoints",
    ),
];

/// 200, 201 or 202 with the resource; 202 may carry no body.
pub const CREATE_RESPONSES: ResponseTable = ResponseTable::new(&[
    (200, ResponseShape::Body),
    (201, ResponseShape::Body),
    (202, ResponseShape::Body),
]);

/// 200 or 202 with the resource; 202 may carry no body.
pub const UPDATE_RESPONSES: ResponseTable =
    ResponseTable::new(&[(200, ResponseShape::Body), (202, ResponseShape::Body)]);

/// 200, 202 or 204, no body.
pub const DELETE_RESPONSES: ResponseTable = ResponseTable::new(&[
    (200, ResponseShape::Empty),
    (202, ResponseShape::Empty),
    (204, ResponseShape::Empty),
]);

fn spec(
    operation_name: &'static str,
    paths: &'static [ResourcePath],
    operation: ResourceOperation,
    available: &[&str],
) -> Result<RequestSpec, ValidationError> {
    get_path(paths, operation, available)
        .map(|path| RequestSpec::new(operation_name, path, API_VERSION))
        .ok_or_else(|| ValidationError::MissingParameter {
            operation: operation_name,
            parameter: available.last().copied().unwrap_or_default().to_string(),
        })
}

const PROFILE_PARAMS: &[&str] = &["subscriptionId", "resourceGroupName", "profileName"];
const ENDPOINT_PARAMS: &[&str] = &[
    "subscriptionId",
    "resourceGroupName",
    "profileName",
    "endpointName",
];

/// Low-level operations on CDN profiles.
#[derive(Debug, Clone)]
pub struct ProfilesClient {
    client: ServiceClient,
}

impl ProfilesClient {
    /// Creates a profiles client.
    #[must_use]
    pub const fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    fn profile_spec(
        name: &'static str,
        operation: ResourceOperation,
        resource_group: &str,
        profile: &str,
    ) -> Result<RequestSpec, ValidationError> {
        Ok(spec(name, PROFILE_PATHS, operation, PROFILE_PARAMS)?
            .param("resourceGroupName", resource_group)
            .param("profileName", profile))
    }

    /// Reads one profile.
    pub fn get(&self, resource_group: &str, profile: &str) -> Operation<ProfileInner> {
        match Self::profile_spec("Profiles.get", ResourceOperation::Get, resource_group, profile) {
            Ok(spec) => self
                .client
                .send::<ProfileInner>(spec, ResponseTable::OK)
                .and_then(|response| require_body(response.status(), response.into_body())),
            Err(error) => Operation::failed(error),
        }
    }

    /// Creates or replaces a profile. `None` means the service accepted it
    /// without returning a representation.
    pub fn create(
        &self,
        resource_group: &str,
        profile: &str,
        parameters: &ProfileInner,
    ) -> Operation<Option<ProfileInner>> {
        match Self::profile_spec(
            "Profiles.create",
            ResourceOperation::CreateOrUpdate,
            resource_group,
            profile,
        ) {
            Ok(spec) => self
                .client
                .send::<ProfileInner>(spec.body(parameters), CREATE_RESPONSES)
                .map(ServiceResponse::into_body),
            Err(error) => Operation::failed(error),
        }
    }

    /// Updates the tags of a profile.
    pub fn update(
        &self,
        resource_group: &str,
        profile: &str,
        parameters: &ProfileUpdateParameters,
    ) -> Operation<Option<ProfileInner>> {
        match Self::profile_spec(
            "Profiles.update",
            ResourceOperation::Update,
            resource_group,
            profile,
        ) {
            Ok(spec) => self
                .client
                .send::<ProfileInner>(spec.body(parameters), UPDATE_RESPONSES)
                .map(ServiceResponse::into_body),
            Err(error) => Operation::failed(error),
        }
    }

    /// Deletes a profile and its endpoints.
    pub fn delete(&self, resource_group: &str, profile: &str) -> Operation<()> {
        match Self::profile_spec(
            "Profiles.delete",
            ResourceOperation::Delete,
            resource_group,
            profile,
        ) {
            Ok(spec) => self
                .client
                .send::<serde_json::Value>(spec, DELETE_RESPONSES)
                .map(|_| ()),
            Err(error) => Operation::failed(error),
        }
    }

    /// Lists the profiles of a resource group.
    pub fn list_by_resource_group(&self, resource_group: &str) -> PagedOperation<ProfileInner> {
        match spec(
            "Profiles.listByResourceGroup",
            PROFILE_PATHS,
            ResourceOperation::List,
            &["subscriptionId", "resourceGroupName"],
        ) {
            Ok(spec) => self.client.list(
                spec.param("resourceGroupName", resource_group),
                ResponseTable::OK,
            ),
            Err(error) => PagedOperation::failed(error),
        }
    }

    /// Lists the profiles of the subscription.
    pub fn list(&self) -> PagedOperation<ProfileInner> {
        match spec(
            "Profiles.list",
            PROFILE_PATHS,
            ResourceOperation::List,
            &["subscriptionId"],
        ) {
            Ok(spec) => self.client.list(spec, ResponseTable::OK),
            Err(error) => PagedOperation::failed(error),
        }
    }
}

/// Low-level operations on CDN endpoints.
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

    fn endpoint_spec(
        name: &'static str,
        operation: ResourceOperation,
        resource_group: &str,
        profile: &str,
        endpoint: &str,
    ) -> Result<RequestSpec, ValidationError> {
        Ok(spec(name, ENDPOINT_PATHS, operation, ENDPOINT_PARAMS)?
            .param("resourceGroupName", resource_group)
            .param("profileName", profile)
            .param("endpointName", endpoint))
    }

    /// Reads one endpoint.
    pub fn get(
        &self,
        resource_group: &str,
        profile: &str,
        endpoint: &str,
    ) -> Operation<EndpointInner> {
        match Self::endpoint_spec(
            "Endpoints.get",
            ResourceOperation::Get,
            resource_group,
            profile,
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
    pub fn create(
        &self,
        resource_group: &str,
        profile: &str,
        endpoint: &str,
        parameters: &EndpointInner,
    ) -> Operation<Option<EndpointInner>> {
        match Self::endpoint_spec(
            "Endpoints.create",
            ResourceOperation::CreateOrUpdate,
            resource_group,
            profile,
            endpoint,
        ) {
            Ok(spec) => self
                .client
                .send::<EndpointInner>(spec.body(parameters), CREATE_RESPONSES)
                .map(ServiceResponse::into_body),
            Err(error) => Operation::failed(error),
        }
    }

    /// Updates the mutable settings of an endpoint.
    pub fn update(
        &self,
        resource_group: &str,
        profile: &str,
        endpoint: &str,
        parameters: &EndpointUpdateParameters,
    ) -> Operation<Option<EndpointInner>> {
        match Self::endpoint_spec(
            "Endpoints.update",
            ResourceOperation::Update,
            resource_group,
            profile,
            endpoint,
        ) {
            Ok(spec) => self
                .client
                .send::<EndpointInner>(spec.body(parameters), UPDATE_RESPONSES)
                .map(ServiceResponse::into_body),
            Err(error) => Operation::failed(error),
        }
    }

    /// Deletes an endpoint.
    pub fn delete(&self, resource_group: &str, profile: &str, endpoint: &str) -> Operation<()> {
        match Self::endpoint_spec(
            "Endpoints.delete",
            ResourceOperation::Delete,
            resource_group,
            profile,
            endpoint,
        ) {
            Ok(spec) => self
                .client
                .send::<serde_json::Value>(spec, DELETE_RESPONSES)
                .map(|_| ()),
            Err(error) => Operation::failed(error),
        }
    }

    /// Lists the endpoints of a profile.
    pub fn list_by_profile(
        &self,
        resource_group: &str,
        profile: &str,
    ) -> PagedOperation<EndpointInner> {
        match spec(
            "Endpoints.listByProfile",
            ENDPOINT_PATHS,
            ResourceOperation::List,
            PROFILE_PARAMS,
        ) {
            Ok(spec) => self.client.list(
                spec
                    .param("resourceGroupName", resource_group)
                    .param("profileName", profile),
                ResponseTable::OK,
            ),
            Err(error) => PagedOperation::failed(error),
        }
    }
}
