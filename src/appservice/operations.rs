//! Operation tables and clients for web apps, site certificates,
//! certificate orders and Key Vaults.

use crate::appservice::models::{
    CertificateInner, CertificateOrderInner, HostNameBindingInner, KeyVaultBindingInner,
    SiteConfig, SiteInner, VaultInner,
};
use crate::clients::HttpMethod;
use crate::config::ApiVersion;
use crate::rest::{
    get_path, require_body, Operation, PagedOperation, RequestSpec, ResourceOperation,
    ResourcePath, ResponseShape, ResponseTable, ServiceClient, ServiceResponse, ValidationError,
};

/// The api-version of site and site certificate operations.
pub const WEB_API_VERSION: ApiVersion = ApiVersion::from_static("2016-08-01");

/// The api-version of certificate order operations.
pub const CERTIFICATE_ORDER_API_VERSION: ApiVersion = ApiVersion::from_static("2015-08-01");

/// The api-version of Key Vault operations.
pub const KEY_VAULT_API_VERSION: ApiVersion = ApiVersion::from_static("2016-10-01");

/// The provider namespace of sites and site certificates.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.Web";

/// The provider namespace of certificate orders.
pub const CERTIFICATE_ORDER_NAMESPACE: &str = "Microsoft.CertificateRegistration";

/// The provider namespace of Key Vaults.
pub const KEY_VAULT_NAMESPACE: &str = "Microsoft.KeyVault";

const SITE: &str = "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Web/sites/{name}";
const SITE_PARAMS: &[&str] = &["subscriptionId", "resourceGroupName", "name"];
const HOST_NAME_BINDING_PARAMS: &[&str] =
    &["subscriptionId", "resourceGroupName", "name", "hostName"];
const CERTIFICATE_PARAMS: &[&str] = &["subscriptionId", "resourceGroupName", "name"];
const ORDER_PARAMS: &[&str] = &["subscriptionId", "resourceGroupName", "certificateOrderName"];
const KEY_VAULT_BINDING_PARAMS: &[&str] = &[
    "subscriptionId",
    "resourceGroupName",
    "certificateOrderName",
    "name",
];
const VAULT_PARAMS: &[&str] = &["subscriptionId", "resourceGroupName", "vaultName"];

/// Paths of site operations.
pub const SITE_PATHS: &[ResourcePath] = &[
    ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, SITE_PARAMS, SITE),
    ResourcePath::new(
        HttpMethod::Put,
        ResourceOperation::CreateOrUpdate,
        SITE_PARAMS,
        SITE,
    ),
    ResourcePath::new(HttpMethod::Delete, ResourceOperation::Delete, SITE_PARAMS, SITE),
    ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::List,
        &["subscriptionId", "resourceGroupName"],
        "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Web/sites",
    ),
];

/// Paths of the `config/web` resource of a site.
pub const SITE_CONFIG_PATHS: &[ResourcePath] = &[ResourcePath::new(
    HttpMethod::Get,
    ResourceOperation::Get,
    SITE_PARAMS,
    "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Web/sites/{name}/config/web",
)];

/// Paths of host name binding operations.
pub const HOST_NAME_BINDING_PATHS: &[ResourcePath] = &[
    ResourcePath::new(
        HttpMethod::Put,
        ResourceOperation::CreateOrUpdate,
        HOST_NAME_BINDING_PARAMS,
        "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Web/sites/{name}/hostNameBindings/{hostName}",
    ),
    ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::List,
        SITE_PARAMS,
        "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Web/sites/{name}/hostNameBindings",
    ),
];

/// Paths of site certificate operations.
pub const CERTIFICATE_PATHS: &[ResourcePath] = &[ResourcePath::new(
    HttpMethod::Put,
    ResourceOperation::CreateOrUpdate,
    CERTIFICATE_PARAMS,
    "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Web/certificates/{name}",
)];

/// Paths of certificate order operations.
pub const CERTIFICATE_ORDER_PATHS: &[ResourcePath] = &[
    ResourcePath::new(
        HttpMethod::Put,
        ResourceOperation::CreateOrUpdate,
        ORDER_PARAMS,
        "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.CertificateRegistration/certificateOrders/{certificateOrderName}",
    ),
];

/// Paths of the Key Vault bindings of a certificate order.
pub const KEY_VAULT_BINDING_PATHS: &[ResourcePath] = &[
    ResourcePath::new(
        HttpMethod::Put,
        ResourceOperation::CreateOrUpdate,
        KEY_VAULT_BINDING_PARAMS,
        "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.CertificateRegistration/certificateOrders/{certificateOrderName}/certificates/{name}",
    ),
    ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::List,
        ORDER_PARAMS,
        "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.CertificateRegistration/certificateOrders/{certificateOrderName}/certificates",
    ),
];

/// Paths of Key Vault operations.
pub const VAULT_PATHS: &[ResourcePath] = &[ResourcePath::new(
    HttpMethod::Put,
    ResourceOperation::CreateOrUpdate,
    VAULT_PARAMS,
    "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.KeyVault/vaults/{vaultName}",
)];

/// 200 or 202 with the site; 202 may carry no body.
pub const SITE_WRITE_RESPONSES: ResponseTable =
    ResponseTable::new(&[(200, ResponseShape::Body), (202, ResponseShape::Body)]);

/// 200 or 204, no body.
pub const SITE_DELETE_RESPONSES: ResponseTable =
    ResponseTable::new(&[(200, ResponseShape::Empty), (204, ResponseShape::Empty)]);

/// 200 or 201 with the resource; 201 may carry no body.
pub const CREATED_RESPONSES: ResponseTable =
    ResponseTable::new(&[(200, ResponseShape::Body), (201, ResponseShape::Body)]);

fn spec(
    operation_name: &'static str,
    paths: &'static [ResourcePath],
    operation: ResourceOperation,
    available: &[&str],
    api_version: ApiVersion,
) -> Result<RequestSpec, ValidationError> {
    get_path(paths, operation, available)
        .map(|path| RequestSpec::new(operation_name, path, api_version))
        .ok_or_else(|| ValidationError::MissingParameter {
            operation: operation_name,
            parameter: available.last().copied().unwrap_or_default().to_string(),
        })
}

/// Low-level operations on web apps and their host name bindings.
#[derive(Debug, Clone)]
pub struct WebAppsClient {
    client: ServiceClient,
}

impl WebAppsClient {
    /// Creates a web apps client.
    #[must_use]
    pub const fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    fn site_spec(
        name: &'static str,
        paths: &'static [ResourcePath],
        operation: ResourceOperation,
        resource_group: &str,
        site: &str,
    ) -> Result<RequestSpec, ValidationError> {
        Ok(spec(name, paths, operation, SITE_PARAMS, WEB_API_VERSION)?
            .param("resourceGroupName", resource_group)
            .param("name", site))
    }

    /// Reads one site.
    pub fn get(&self, resource_group: &str, site: &str) -> Operation<SiteInner> {
        match Self::site_spec(
            "WebApps.get",
            SITE_PATHS,
            ResourceOperation::Get,
            resource_group,
            site,
        ) {
            Ok(spec) => self
                .client
                .send::<SiteInner>(spec, ResponseTable::OK)
                .and_then(|response| require_body(response.status(), response.into_body())),
            Err(error) => Operation::failed(error),
        }
    }

    /// Reads the `config/web` resource of a site.
    pub fn get_configuration(&self, resource_group: &str, site: &str) -> Operation<SiteConfig> {
        match Self::site_spec(
            "WebApps.getConfiguration",
            SITE_CONFIG_PATHS,
            ResourceOperation::Get,
            resource_group,
            site,
        ) {
            Ok(spec) => self
                .client
                .send::<ConfigEnvelope>(spec, ResponseTable::OK)
                .and_then(|response| require_body(response.status(), response.into_body()))
                .map(|envelope| envelope.properties),
            Err(error) => Operation::failed(error),
        }
    }

    /// Creates or replaces a site. `None` means the service accepted it
    /// without returning a representation.
    pub fn create_or_update(
        &self,
        resource_group: &str,
        site: &str,
        parameters: &SiteInner,
    ) -> Operation<Option<SiteInner>> {
        match Self::site_spec(
            "WebApps.createOrUpdate",
            SITE_PATHS,
            ResourceOperation::CreateOrUpdate,
            resource_group,
            site,
        ) {
            Ok(spec) => self
                .client
                .send::<SiteInner>(spec.body(parameters), SITE_WRITE_RESPONSES)
                .map(ServiceResponse::into_body),
            Err(error) => Operation::failed(error),
        }
    }

    /// Deletes a site.
    pub fn delete(&self, resource_group: &str, site: &str) -> Operation<()> {
        match Self::site_spec(
            "WebApps.delete",
            SITE_PATHS,
            ResourceOperation::Delete,
            resource_group,
            site,
        ) {
            Ok(spec) => self
                .client
                .send::<serde_json::Value>(spec, SITE_DELETE_RESPONSES)
                .map(|_| ()),
            Err(error) => Operation::failed(error),
        }
    }

    /// Lists the sites of a resource group.
    pub fn list_by_resource_group(&self, resource_group: &str) -> PagedOperation<SiteInner> {
        match spec(
            "WebApps.listByResourceGroup",
            SITE_PATHS,
            ResourceOperation::List,
            &["subscriptionId", "resourceGroupName"],
            WEB_API_VERSION,
        ) {
            Ok(spec) => self.client.list(
                spec.param("resourceGroupName", resource_group),
                ResponseTable::OK,
            ),
            Err(error) => PagedOperation::failed(error),
        }
    }

    /// Creates or replaces the binding of `host_name` to a site.
    pub fn create_or_update_host_name_binding(
        &self,
        resource_group: &str,
        site: &str,
        host_name: &str,
        parameters: &HostNameBindingInner,
    ) -> Operation<HostNameBindingInner> {
        match spec(
            "WebApps.createOrUpdateHostNameBinding",
            HOST_NAME_BINDING_PATHS,
            ResourceOperation::CreateOrUpdate,
            HOST_NAME_BINDING_PARAMS,
            WEB_API_VERSION,
        ) {
            Ok(spec) => self
                .client
                .send::<HostNameBindingInner>(
                    spec
                        .param("resourceGroupName", resource_group)
                        .param("name", site)
                        .param("hostName", host_name)
                        .body(parameters),
                    ResponseTable::OK,
                )
                .and_then(|response| require_body(response.status(), response.into_body())),
            Err(error) => Operation::failed(error),
        }
    }

    /// Lists the host name bindings of a site.
    pub fn list_host_name_bindings(
        &self,
        resource_group: &str,
        site: &str,
    ) -> PagedOperation<HostNameBindingInner> {
        match Self::site_spec(
            "WebApps.listHostNameBindings",
            HOST_NAME_BINDING_PATHS,
            ResourceOperation::List,
            resource_group,
            site,
        ) {
            Ok(spec) => self.client.list(spec, ResponseTable::OK),
            Err(error) => PagedOperation::failed(error),
        }
    }
}

/// `config/web` is returned as a resource whose properties are the config.
#[derive(serde::Deserialize)]
struct ConfigEnvelope {
    #[serde(default)]
    properties: SiteConfig,
}

/// Low-level operations on site certificates.
#[derive(Debug, Clone)]
pub struct CertificatesClient {
    client: ServiceClient,
}

impl CertificatesClient {
    /// Creates a certificates client.
    #[must_use]
    pub const fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Creates or replaces a certificate.
    pub fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        parameters: &CertificateInner,
    ) -> Operation<CertificateInner> {
        match spec(
            "Certificates.createOrUpdate",
            CERTIFICATE_PATHS,
            ResourceOperation::CreateOrUpdate,
            CERTIFICATE_PARAMS,
            WEB_API_VERSION,
        ) {
            Ok(spec) => self
                .client
                .send::<CertificateInner>(
                    spec
                        .param("resourceGroupName", resource_group)
                        .param("name", name)
                        .body(parameters),
                    ResponseTable::OK,
                )
                .and_then(|response| require_body(response.status(), response.into_body())),
            Err(error) => Operation::failed(error),
        }
    }
}

/// Low-level operations on App Service certificate orders.
#[derive(Debug, Clone)]
pub struct CertificateOrdersClient {
    client: ServiceClient,
}

impl CertificateOrdersClient {
    /// Creates a certificate orders client.
    #[must_use]
    pub const fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Places or replaces a certificate order.
    pub fn create_or_update(
        &self,
        resource_group: &str,
        order: &str,
        parameters: &CertificateOrderInner,
    ) -> Operation<Option<CertificateOrderInner>> {
        match spec(
            "AppServiceCertificateOrders.createOrUpdate",
            CERTIFICATE_ORDER_PATHS,
            ResourceOperation::CreateOrUpdate,
            ORDER_PARAMS,
            CERTIFICATE_ORDER_API_VERSION,
        ) {
            Ok(spec) => self
                .client
                .send::<CertificateOrderInner>(
                    spec
                        .param("resourceGroupName", resource_group)
                        .param("certificateOrderName", order)
                        .body(parameters),
                    CREATED_RESPONSES,
                )
                .map(ServiceResponse::into_body),
            Err(error) => Operation::failed(error),
        }
    }

    /// Stores the issued certificate of an order in a Key Vault.
    pub fn create_or_update_key_vault_binding(
        &self,
        resource_group: &str,
        order: &str,
        name: &str,
        parameters: &KeyVaultBindingInner,
    ) -> Operation<Option<KeyVaultBindingInner>> {
        match spec(
            "AppServiceCertificateOrders.createOrUpdateCertificate",
            KEY_VAULT_BINDING_PATHS,
            ResourceOperation::CreateOrUpdate,
            KEY_VAULT_BINDING_PARAMS,
            CERTIFICATE_ORDER_API_VERSION,
        ) {
            Ok(spec) => self
                .client
                .send::<KeyVaultBindingInner>(
                    spec
                        .param("resourceGroupName", resource_group)
                        .param("certificateOrderName", order)
                        .param("name", name)
                        .body(parameters),
                    CREATED_RESPONSES,
                )
                .map(ServiceResponse::into_body),
            Err(error) => Operation::failed(error),
        }
    }

    /// Lists the Key Vault bindings of an order.
    pub fn list_key_vault_bindings(
        &self,
        resource_group: &str,
        order: &str,
    ) -> PagedOperation<KeyVaultBindingInner> {
        match spec(
            "AppServiceCertificateOrders.listCertificates",
            KEY_VAULT_BINDING_PATHS,
            ResourceOperation::List,
            ORDER_PARAMS,
            CERTIFICATE_ORDER_API_VERSION,
        ) {
            Ok(spec) => self.client.list(
                spec
                    .param("resourceGroupName", resource_group)
                    .param("certificateOrderName", order),
                ResponseTable::OK,
            ),
            Err(error) => PagedOperation::failed(error),
        }
    }
}

/// Low-level operations on Key Vaults.
#[derive(Debug, Clone)]
pub struct VaultsClient {
    client: ServiceClient,
}

impl VaultsClient {
    /// Creates a vaults client.
    #[must_use]
    pub const fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Creates or replaces a vault.
    pub fn create_or_update(
        &self,
        resource_group: &str,
        vault: &str,
        parameters: &VaultInner,
    ) -> Operation<VaultInner> {
        match spec(
            "Vaults.createOrUpdate",
            VAULT_PATHS,
            ResourceOperation::CreateOrUpdate,
            VAULT_PARAMS,
            KEY_VAULT_API_VERSION,
        ) {
            Ok(spec) => self
                .client
                .send::<VaultInner>(
                    spec
                        .param("resourceGroupName", resource_group)
                        .param("vaultName", vault)
                        .body(parameters),
                    CREATED_RESPONSES,
                )
                .and_then(|response| require_body(response.status(), response.into_body())),
            Err(error) => Operation::failed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_config_is_a_separate_path() {
        let site = get_path(SITE_PATHS, ResourceOperation::Get, SITE_PARAMS).unwrap();
        let config = get_path(SITE_CONFIG_PATHS, ResourceOperation::Get, SITE_PARAMS).unwrap();
        assert!(config.template.starts_with(site.template));
        assert!(config.template.ends_with("/config/web"));
    }

    #[test]
    fn test_every_write_is_a_put() {
        for (paths, params) in [
            (HOST_NAME_BINDING_PATHS, HOST_NAME_BINDING_PARAMS),
            (CERTIFICATE_PATHS, CERTIFICATE_PARAMS),
            (CERTIFICATE_ORDER_PATHS, ORDER_PARAMS),
            (KEY_VAULT_BINDING_PATHS, KEY_VAULT_BINDING_PARAMS),
            (VAULT_PATHS, VAULT_PARAMS),
        ] {
            let path = get_path(paths, ResourceOperation::CreateOrUpdate, params).unwrap();
            assert_eq!(path.http_method, HttpMethod::Put);
        }
    }

    #[test]
    fn test_missing_list_path_is_a_validation_error() {
        let error = spec(
            "Certificates.list",
            CERTIFICATE_PATHS,
            ResourceOperation::List,
            &["subscriptionId", "resourceGroupName"],
            WEB_API_VERSION,
        )
        .unwrap_err();
        assert!(matches!(
            error,
            ValidationError::MissingParameter { operation: "Certificates.list", .. }
        ));
    }
}
