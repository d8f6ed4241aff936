//! The request pipeline shared by every resource kind.
//!
//! [`ServiceClient`] turns a [`RequestSpec`] (operation name, method, path
//! template, api-version, parameters, body) into an [`Operation`] or a
//! [`PagedOperation`]. Required parameters are validated when the operation
//! is built: a failing spec yields an operation that resolves to
//! [`ArmError::Validation`] without touching the transport.
//!
//! # Example
//!
//! ```rust,ignore
//! use arm_fluent::rest::{RequestSpec, ResponseTable, ServiceClient};
//!
//! let spec = RequestSpec::new("Profiles.get", &PROFILE_GET, API_VERSION)
//!     .param("resourceGroupName", "rg1")
//!     .param("profileName", "p1");
//! let response = client.send::<ProfileInner>(spec, ResponseTable::OK).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::TokenCredential;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpTransport};
use crate::config::{ApiVersion, ArmConfig, SubscriptionId};
use crate::rest::codec::{encode_body, ResponseTable};
use crate::rest::errors::{ArmError, ValidationError};
use crate::rest::operation::Operation;
use crate::rest::pager::{Page, PagedOperation};
use crate::rest::path::{build_path, template_params, ResourcePath};
use crate::rest::response::ServiceResponse;

/// Name of the path parameter filled from the configured subscription.
pub const SUBSCRIPTION_PARAM: &str = "subscriptionId";

/// Description of one logical call, validated when it is sent.
#[derive(Debug)]
pub struct RequestSpec {
    operation: &'static str,
    http_method: HttpMethod,
    template: &'static str,
    api_version: ApiVersion,
    params: HashMap<&'static str, String>,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    encode_error: Option<ArmError>,
}

impl RequestSpec {
    /// Starts a spec from a path table entry.
    #[must_use]
    pub fn new(operation: &'static str, path: &ResourcePath, api_version: ApiVersion) -> Self {
        Self::with_template(operation, path.http_method, path.template, api_version)
    }

    /// Starts a spec from an explicit method and template.
    #[must_use]
    pub fn with_template(
        operation: &'static str,
        http_method: HttpMethod,
        template: &'static str,
        api_version: ApiVersion,
    ) -> Self {
        Self {
            operation,
            http_method,
            template,
            api_version,
            params: HashMap::new(),
            query: Vec::new(),
            body: None,
            encode_error: None,
        }
    }

    /// Sets a path parameter.
    #[must_use]
    pub fn param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.insert(name, value.into());
        self
    }

    /// Adds a query parameter after `api-version`.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON body. An encoding failure is reported when the spec is sent.
    #[must_use]
    pub fn body<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match encode_body(body) {
            Ok(value) => self.body = Some(value),
            Err(error) => self.encode_error = Some(error),
        }
        self
    }

    /// Returns the operation name used in errors and logs.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Validates the spec and builds the HTTP request.
    ///
    /// `subscriptionId` is taken from `subscription` unless set explicitly.
    ///
    /// # Errors
    ///
    /// - [`ArmError::Encode`] if the body could not be encoded
    /// - [`ValidationError::MissingParameter`] for an absent or blank path
    ///   parameter or api-version
    /// - [`ValidationError::MissingBody`] for PUT/PATCH/POST without a body
    pub fn into_request(self, subscription: &SubscriptionId) -> Result<HttpRequest, ArmError> {
        if let Some(error) = self.encode_error {
            return Err(error);
        }

        let mut params: HashMap<&str, &str> = HashMap::new();
        for name in template_params(self.template) {
            let value = match self.params.get(name) {
                Some(value) => value.as_str(),
                None if name == SUBSCRIPTION_PARAM => subscription.as_ref(),
                None => "",
            };
            if value.trim().is_empty() {
                return Err(ValidationError::MissingParameter {
                    operation: self.operation,
                    parameter: name.to_string(),
                }
                .into());
            }
            params.insert(name, value);
        }

        if self.api_version.as_str().trim().is_empty() {
            return Err(ValidationError::MissingParameter {
                operation: self.operation,
                parameter: "api-version".to_string(),
            }
            .into());
        }

        if self.http_method.requires_body() && self.body.is_none() {
            return Err(ValidationError::MissingBody {
                operation: self.operation,
            }
            .into());
        }

        let path = build_path(self.template, &params);
        let mut builder = HttpRequest::builder(self.http_method, path)
            .query_param("api-version", self.api_version.as_str());
        for (key, value) in self.query {
            builder = builder.query_param(key, value);
        }
        if let Some(body) = self.body {
            builder = builder.body(body);
        }

        builder
            .build()
            .map_err(|e| ArmError::Validation(ValidationError::InvalidRequest(e)))
    }
}

/// Cheaply cloneable handle to the request pipeline.
///
/// Every resource wrapper and builder holds one; clones share the same
/// [`HttpClient`].
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: Arc<HttpClient>,
}

// Verify ServiceClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ServiceClient>();
};

impl ServiceClient {
    /// Creates a client dispatching through the default `reqwest` transport.
    #[must_use]
    pub fn new(config: ArmConfig, credential: Arc<dyn TokenCredential>) -> Self {
        Self {
            http: Arc::new(HttpClient::new(config, credential)),
        }
    }

    /// Creates a client dispatching through `transport`.
    #[must_use]
    pub fn with_transport(
        config: ArmConfig,
        credential: Arc<dyn TokenCredential>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            http: Arc::new(HttpClient::with_transport(config, credential, transport)),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ArmConfig {
        self.http.config()
    }

    /// Returns the configured subscription.
    #[must_use]
    pub fn subscription_id(&self) -> &SubscriptionId {
        self.http.config().subscription_id()
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// Builds a deferred call and decodes its response through `table`.
    ///
    /// The body is `None` for an empty success.
    pub fn send<T>(
        &self,
        spec: RequestSpec,
        table: ResponseTable,
    ) -> Operation<ServiceResponse<Option<T>>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let operation = spec.operation();
        let request = match spec.into_request(self.subscription_id()) {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!("{} rejected before dispatch: {}", operation, error);
                return Operation::failed(error);
            }
        };
        self.dispatch(request, table)
    }

    /// Builds a lazily paginated list call.
    ///
    /// The first page uses `spec`; continuation links are fetched with GET
    /// verbatim and decoded through the same `table`.
    pub fn list<T>(&self, spec: RequestSpec, table: ResponseTable) -> PagedOperation<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let first = self
            .send::<Page<T>>(spec, table)
            .map(|response| response.into_body().unwrap_or_default());
        let client = self.clone();
        PagedOperation::new(first, move |link| client.next_page(link, table))
    }

    fn next_page<T>(&self, link: String, table: ResponseTable) -> Operation<Page<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        match HttpRequest::builder(HttpMethod::Get, link).build() {
            Ok(request) => self
                .dispatch::<Page<T>>(request, table)
                .map(|response| response.into_body().unwrap_or_default()),
            Err(error) => Operation::failed(ValidationError::InvalidRequest(error)),
        }
    }

    fn dispatch<T>(
        &self,
        request: HttpRequest,
        table: ResponseTable,
    ) -> Operation<ServiceResponse<Option<T>>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let http = Arc::clone(&self.http);
        Operation::new(async move {
            let response = http.request(request).await?;
            let body = table.decode::<T>(&response)?;
            Ok(ServiceResponse::from_http(body, &response))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::ResourceOperation;
    use serde_json::json;

    const ENDPOINT_PUT: ResourcePath = ResourcePath::new(
        HttpMethod::Put,
        ResourceOperation::CreateOrUpdate,
        &["subscriptionId", "resourceGroupName", "profileName", "endpointName"],
        "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Cdn/profiles/{profileName}/endpoints/{endpointName}",
    );

    const VERSION: ApiVersion = ApiVersion::from_static("2016-04-02");

    fn subscription() -> SubscriptionId {
        SubscriptionId::new("sub1").unwrap()
    }

    #[test]
    fn test_into_request_fills_subscription_and_api_version() {
        let request = RequestSpec::new("Endpoints.create", &ENDPOINT_PUT, VERSION)
            .param("resourceGroupName", "rg1")
            .param("profileName", "p1")
            .param("endpointName", "e1")
            .body(&json!({"location": "westus"}))
            .into_request(&subscription())
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Put);
        assert_eq!(
            request.path,
            "subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Cdn/profiles/p1/endpoints/e1"
        );
        assert_eq!(
            request.query,
            vec![("api-version".to_string(), "2016-04-02".to_string())]
        );
        assert_eq!(request.body, Some(json!({"location": "westus"})));
    }

    #[test]
    fn test_missing_parameter_is_reported_by_name() {
        let error = RequestSpec::new("Endpoints.create", &ENDPOINT_PUT, VERSION)
            .param("resourceGroupName", "rg1")
            .param("endpointName", "e1")
            .body(&json!({}))
            .into_request(&subscription())
            .unwrap_err();

        assert!(matches!(
            error,
            ArmError::Validation(ValidationError::MissingParameter { ref parameter, operation: "Endpoints.create" })
                if parameter == "profileName"
        ));
    }

    #[test]
    fn test_blank_parameter_is_rejected() {
        let error = RequestSpec::new("Endpoints.create", &ENDPOINT_PUT, VERSION)
            .param("resourceGroupName", "  ")
            .param("profileName", "p1")
            .param("endpointName", "e1")
            .body(&json!({}))
            .into_request(&subscription())
            .unwrap_err();
        assert!(error.is_validation());
    }

    #[test]
    fn test_put_without_body_is_rejected() {
        let error = RequestSpec::new("Endpoints.create", &ENDPOINT_PUT, VERSION)
            .param("resourceGroupName", "rg1")
            .param("profileName", "p1")
            .param("endpointName", "e1")
            .into_request(&subscription())
            .unwrap_err();
        assert!(matches!(
            error,
            ArmError::Validation(ValidationError::MissingBody { .. })
        ));
    }

    #[test]
    fn test_unencodable_body_is_reported_before_parameters() {
        let mut body = std::collections::BTreeMap::new();
        body.insert(vec![1_u8], "sequence keys are not JSON object keys");

        let error = RequestSpec::new("Endpoints.create", &ENDPOINT_PUT, VERSION)
            .param("resourceGroupName", "rg1")
            .body(&body)
            .into_request(&subscription())
            .unwrap_err();
        assert!(matches!(error, ArmError::Encode(_)));
    }

    #[test]
    fn test_empty_api_version_is_rejected() {
        let error = RequestSpec::with_template(
            "Things.list",
            HttpMethod::Get,
            "subscriptions/{subscriptionId}/things",
            ApiVersion::from_static(""),
        )
        .into_request(&subscription())
        .unwrap_err();
        assert!(matches!(
            error,
            ArmError::Validation(ValidationError::MissingParameter { ref parameter, .. })
                if parameter == "api-version"
        ));
    }

    #[test]
    fn test_extra_query_follows_api_version() {
        let request = RequestSpec::with_template(
            "Things.list",
            HttpMethod::Get,
            "subscriptions/{subscriptionId}/things",
            VERSION,
        )
        .query_param("$top", "10")
        .into_request(&subscription())
        .unwrap();
        assert_eq!(request.query[0].0, "api-version");
        assert_eq!(request.query[1], ("$top".to_string(), "10".to_string()));
    }
}
