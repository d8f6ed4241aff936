//! Azure App Service web apps and their SSL host name bindings.
//!
//! [`WebApps`] is the entry point. A web app is defined through the staged
//! [`WebAppDefinition`] and changed through [`WebAppUpdate`]; SSL bindings
//! are nested children of both and are committed after the site call.
//!
//! # Example
//!
//! ```rust,ignore
//! use arm_fluent::appservice::WebApps;
//! use arm_fluent::Region;
//!
//! let mut app = WebApps::new(client)
//!     .define("app1")
//!     .with_region(Region::us_west())
//!     .with_existing_resource_group("rg1")
//!     .with_existing_app_service_plan(plan_id)
//!     .define_ssl_binding()
//!         .for_host_name("www.contoso.com")
//!         .with_pfx_certificate_to_upload(std::fs::read("contoso.pfx")?, "password")
//!         .with_sni_based_ssl()
//!         .attach()
//!     .create()
//!     .await?;
//!
//! app.update()
//!     .define_ssl_binding()
//!         .for_host_name("api.contoso.com")
//!         .with_new_standard_ssl_certificate_order("contoso-api")
//!         .with_new_key_vault("contoso-vault", tenant_id)
//!         .with_ip_based_ssl()
//!         .attach()
//!     .apply()
//!     .await?;
//! ```

mod definition;
mod models;
mod operations;
mod ssl_binding;
mod web_app;
mod web_apps;

use crate::fluent::WithCreate;

pub use definition::{WebAppDefinition, WithAppServicePlan};
pub use models::{
    CertificateInner, CertificateOrderInner, CertificateOrderProperties, CertificateProductType,
    CertificateProperties, HostNameBindingInner, HostNameBindingProperties, HostNameSslState,
    KeyVaultBindingInner, KeyVaultBindingProperties, SiteConfig, SiteInner, SiteProperties,
    SslState, VaultInner, VaultProperties, VaultSku,
};
pub use operations::{
    CertificateOrdersClient, CertificatesClient, VaultsClient, WebAppsClient,
    CERTIFICATE_ORDER_API_VERSION, CERTIFICATE_ORDER_NAMESPACE, KEY_VAULT_API_VERSION,
    KEY_VAULT_NAMESPACE, PROVIDER_NAMESPACE, WEB_API_VERSION,
};
pub use ssl_binding::{
    CertificateSource, HostNameSslBindingDefinition, KeyVaultSource, SslBinding, WithCertificate,
    WithKeyVault, WithSslType,
};
pub use web_app::{WebApp, WebAppUpdate};
pub use web_apps::WebApps;

/// An SSL binding defined as part of a new web app.
pub type SslBindingDefinition<S> = HostNameSslBindingDefinition<WebAppDefinition<WithCreate>, S>;

/// An SSL binding defined as part of a web app update.
pub type SslBindingUpdateDefinition<'a, S> = HostNameSslBindingDefinition<WebAppUpdate<'a>, S>;
