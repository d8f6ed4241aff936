//! SSL host name bindings: the TLS child of a web app.
//!
//! A binding is defined inside a web app definition or update with
//! `define_ssl_binding()`. The stages branch on the certificate source:
//!
//! ```text
//! Blank --for_host_name--> WithCertificate
//!     --with_pfx_certificate_to_upload---------------------------\
//!     --with_existing_app_service_certificate_order---------------+--> WithSslType
//!     --with_new_standard_ssl_certificate_order--> WithKeyVault --/
//!                   (with_existing_key_vault | with_new_key_vault)
//! WithSslType --with_sni_based_ssl | with_ip_based_ssl--> WithAttach --attach()--> parent
//! ```
//!
//! A newly ordered certificate is stored in a Key Vault, so only that branch
//! passes through [`WithKeyVault`].
//!
//! On commit each binding installs its certificate as a site certificate,
//! then binds the host name with the certificate's thumbprint.

use std::marker::PhantomData;

use base64::prelude::*;

use crate::appservice::models::{
    CertificateInner, CertificateOrderInner, CertificateOrderProperties, CertificateProductType,
    CertificateProperties, HostNameBindingInner, HostNameBindingProperties,
    KeyVaultBindingInner, KeyVaultBindingProperties, SslState, VaultInner, VaultProperties,
};
use crate::appservice::operations::{
    CertificateOrdersClient, CertificatesClient, VaultsClient, WebAppsClient, KEY_VAULT_NAMESPACE,
};
use crate::fluent::{
    check_child_names, commit_children, Attachable, Blank, ChildResults, PendingAction,
    PendingChildren, WithAttach,
};
use crate::rest::{ArmError, CommitError, Operation, ResourceId, ServiceClient, ValidationError};

/// Stage: the host name is set, a certificate source is required next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithCertificate;

/// Stage: a certificate order is staged, a Key Vault for it is required next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithKeyVault;

/// Stage: the certificate is set, the binding kind is required next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithSslType;

/// The Key Vault receiving a newly ordered certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyVaultSource {
    /// A vault that already exists, by resource id.
    Existing {
        /// Resource id of the vault.
        vault_id: String,
    },
    /// A vault created in the web app's resource group.
    New {
        /// Vault name.
        name: String,
        /// Azure AD tenant of the vault.
        tenant_id: String,
    },
}

/// Where the certificate of a binding comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum CertificateSource {
    /// A PFX file uploaded with the binding.
    Pfx {
        /// PFX content.
        content: Vec<u8>,
        /// PFX password.
        password: String,
    },
    /// An issued App Service certificate order, by resource id.
    ExistingOrder {
        /// Resource id of the order.
        order_id: String,
    },
    /// A standard certificate ordered with the binding.
    NewOrder {
        /// Name of the new order.
        order_name: String,
        /// Vault storing the issued certificate.
        key_vault: KeyVaultSource,
    },
}

impl std::fmt::Debug for CertificateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pfx { content, .. } => f
                .debug_struct("Pfx")
                .field("content", &format_args!("[{} bytes]", content.len()))
                .field("password", &"[REDACTED]")
                .finish(),
            Self::ExistingOrder { order_id } => f
                .debug_struct("ExistingOrder")
                .field("order_id", order_id)
                .finish(),
            Self::NewOrder {
                order_name,
                key_vault,
            } => f
                .debug_struct("NewOrder")
                .field("order_name", order_name)
                .field("key_vault", key_vault)
                .finish(),
        }
    }
}

/// An SSL binding staged on a web app, keyed by host name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslBinding {
    /// Certificate to install.
    pub certificate: CertificateSource,
    /// Binding kind.
    pub ssl_state: SslState,
}

/// Staged definition of an SSL binding, owning its parent builder `P`.
///
/// The same builder serves new web apps and web app updates; see
/// [`SslBindingDefinition`](crate::appservice::SslBindingDefinition) and
/// [`SslBindingUpdateDefinition`](crate::appservice::SslBindingUpdateDefinition).
#[derive(Debug)]
#[must_use = "an SSL binding definition does nothing until attached"]
pub struct HostNameSslBindingDefinition<P, S> {
    parent: P,
    host_name: String,
    order_name: String,
    certificate: Option<CertificateSource>,
    ssl_state: SslState,
    _stage: PhantomData<S>,
}

impl<P, S> HostNameSslBindingDefinition<P, S> {
    fn into_stage<T>(self) -> HostNameSslBindingDefinition<P, T> {
        HostNameSslBindingDefinition {
            parent: self.parent,
            host_name: self.host_name,
            order_name: self.order_name,
            certificate: self.certificate,
            ssl_state: self.ssl_state,
            _stage: PhantomData,
        }
    }

    /// Returns the host name, empty before [`for_host_name`](HostNameSslBindingDefinition::for_host_name).
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.host_name
    }
}

impl<P: Attachable<SslBinding>> HostNameSslBindingDefinition<P, Blank> {
    pub(crate) const fn new(parent: P) -> Self {
        Self {
            parent,
            host_name: String::new(),
            order_name: String::new(),
            certificate: None,
            ssl_state: SslState::Disabled,
            _stage: PhantomData,
        }
    }

    /// Sets the host name to bind.
    pub fn for_host_name(
        mut self,
        host_name: impl Into<String>,
    ) -> HostNameSslBindingDefinition<P, WithCertificate> {
        self.host_name = host_name.into();
        self.into_stage()
    }
}

impl<P: Attachable<SslBinding>> HostNameSslBindingDefinition<P, WithCertificate> {
    /// Uploads a PFX certificate with the binding.
    pub fn with_pfx_certificate_to_upload(
        mut self,
        pfx: impl Into<Vec<u8>>,
        password: impl Into<String>,
    ) -> HostNameSslBindingDefinition<P, WithSslType> {
        self.certificate = Some(CertificateSource::Pfx {
            content: pfx.into(),
            password: password.into(),
        });
        self.into_stage()
    }

    /// Uses the certificate of an issued App Service certificate order.
    pub fn with_existing_app_service_certificate_order(
        mut self,
        order_id: impl Into<String>,
    ) -> HostNameSslBindingDefinition<P, WithSslType> {
        self.certificate = Some(CertificateSource::ExistingOrder {
            order_id: order_id.into(),
        });
        self.into_stage()
    }

    /// Orders a standard certificate for the host name.
    pub fn with_new_standard_ssl_certificate_order(
        mut self,
        order_name: impl Into<String>,
    ) -> HostNameSslBindingDefinition<P, WithKeyVault> {
        self.order_name = order_name.into();
        self.into_stage()
    }
}

impl<P: Attachable<SslBinding>> HostNameSslBindingDefinition<P, WithKeyVault> {
    /// Stores the ordered certificate in an existing vault.
    pub fn with_existing_key_vault(
        self,
        vault_id: impl Into<String>,
    ) -> HostNameSslBindingDefinition<P, WithSslType> {
        self.with_key_vault(KeyVaultSource::Existing {
            vault_id: vault_id.into(),
        })
    }

    /// Stores the ordered certificate in a new vault.
    pub fn with_new_key_vault(
        self,
        name: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> HostNameSslBindingDefinition<P, WithSslType> {
        self.with_key_vault(KeyVaultSource::New {
            name: name.into(),
            tenant_id: tenant_id.into(),
        })
    }

    fn with_key_vault(
        mut self,
        key_vault: KeyVaultSource,
    ) -> HostNameSslBindingDefinition<P, WithSslType> {
        self.certificate = Some(CertificateSource::NewOrder {
            order_name: std::mem::take(&mut self.order_name),
            key_vault,
        });
        self.into_stage()
    }
}

impl<P: Attachable<SslBinding>> HostNameSslBindingDefinition<P, WithSslType> {
    /// Serves TLS with Server Name Indication.
    pub fn with_sni_based_ssl(mut self) -> HostNameSslBindingDefinition<P, WithAttach> {
        self.ssl_state = SslState::SniEnabled;
        self.into_stage()
    }

    /// Serves TLS on a dedicated IP address.
    pub fn with_ip_based_ssl(mut self) -> HostNameSslBindingDefinition<P, WithAttach> {
        self.ssl_state = SslState::IpBasedEnabled;
        self.into_stage()
    }
}

impl<P: Attachable<SslBinding>> HostNameSslBindingDefinition<P, WithAttach> {
    /// Stages the binding in the parent and returns the parent.
    pub fn attach(mut self) -> P {
        // Set on every path into WithAttach.
        if let Some(certificate) = self.certificate {
            self.parent.attach_child(
                self.host_name,
                PendingAction::Create(SslBinding {
                    certificate,
                    ssl_state: self.ssl_state,
                }),
            );
        }
        self.parent
    }
}

/// Name of the site certificate installed for `host_name`.
pub(crate) fn certificate_name_for(host_name: &str) -> String {
    match host_name.strip_prefix("*.") {
        Some(domain) => format!("wildcard.{domain}"),
        None => host_name.to_string(),
    }
}

const BINDING_OPERATION: &str = "WebApps.createOrUpdateHostNameBinding";

fn check_not_blank(
    operation: &'static str,
    parameter: &str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingParameter {
            operation,
            parameter: parameter.to_string(),
        });
    }
    Ok(())
}

/// Rejects a staged binding that could not be sent, before anything is sent.
pub(crate) fn check_ssl_bindings(pending: &PendingChildren<SslBinding>) -> Result<(), ArmError> {
    check_child_names(pending, "hostName", |_| BINDING_OPERATION)?;
    for (_, action) in pending.iter() {
        let Some(binding) = action.value() else {
            continue;
        };
        match &binding.certificate {
            CertificateSource::Pfx { content, .. } => {
                if content.is_empty() {
                    return Err(ValidationError::MissingParameter {
                        operation: "Certificates.createOrUpdate",
                        parameter: "pfxBlob".to_string(),
                    }
                    .into());
                }
            }
            CertificateSource::ExistingOrder { order_id } => {
                ResourceId::parse(order_id)?;
            }
            CertificateSource::NewOrder {
                order_name,
                key_vault,
            } => {
                check_not_blank(
                    "AppServiceCertificateOrders.createOrUpdate",
                    "certificateOrderName",
                    order_name,
                )?;
                match key_vault {
                    KeyVaultSource::Existing { vault_id } => {
                        ResourceId::parse(vault_id)?;
                    }
                    KeyVaultSource::New { name, tenant_id } => {
                        check_not_blank("Vaults.createOrUpdate", "vaultName", name)?;
                        check_not_blank("Vaults.createOrUpdate", "tenantId", tenant_id)?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Places a certificate order and stores its certificate in a vault.
///
/// Returns the Key Vault id and secret name of the certificate.
async fn order_certificate(
    client: &ServiceClient,
    resource_group: &str,
    location: Option<&str>,
    host_name: &str,
    order_name: &str,
    key_vault: &KeyVaultSource,
) -> Result<(String, String), ArmError> {
    let orders = CertificateOrdersClient::new(client.clone());
    let product_type = if host_name.starts_with("*.") {
        CertificateProductType::StandardDomainValidatedWildCardSsl
    } else {
        CertificateProductType::StandardDomainValidatedSsl
    };
    let order = CertificateOrderInner {
        location: Some("global".to_string()),
        properties: CertificateOrderProperties {
            distinguished_name: Some(format!("CN={host_name}")),
            product_type: Some(product_type),
            validity_in_years: Some(1),
            key_size: Some(2048),
            auto_renew: Some(true),
            ..CertificateOrderProperties::default()
        },
        ..CertificateOrderInner::default()
    };
    orders.create_or_update(resource_group, order_name, &order).await?;

    let vault_id = match key_vault {
        KeyVaultSource::Existing { vault_id } => vault_id.clone(),
        KeyVaultSource::New { name, tenant_id } => {
            let vault = VaultInner {
                location: location.map(ToString::to_string),
                properties: VaultProperties {
                    tenant_id: tenant_id.clone(),
                    ..VaultProperties::default()
                },
                ..VaultInner::default()
            };
            let created = VaultsClient::new(client.clone())
                .create_or_update(resource_group, name, &vault)
                .await?;
            created.id.unwrap_or_else(|| {
                ResourceId::new(
                    client.subscription_id().to_string(),
                    resource_group,
                    KEY_VAULT_NAMESPACE,
                    "vaults",
                    name.as_str(),
                )
                .to_string()
            })
        }
    };

    let binding = KeyVaultBindingInner {
        location: Some("global".to_string()),
        properties: KeyVaultBindingProperties {
            key_vault_id: Some(vault_id.clone()),
            key_vault_secret_name: Some(order_name.to_string()),
            ..KeyVaultBindingProperties::default()
        },
        ..KeyVaultBindingInner::default()
    };
    orders
        .create_or_update_key_vault_binding(resource_group, order_name, order_name, &binding)
        .await?;
    Ok((vault_id, order_name.to_string()))
}

/// Installs the certificate of a binding as a site certificate and returns
/// its thumbprint.
async fn install_certificate(
    client: &ServiceClient,
    resource_group: &str,
    location: Option<&str>,
    host_name: &str,
    source: &CertificateSource,
) -> Result<Option<String>, ArmError> {
    let properties = match source {
        CertificateSource::Pfx { content, password } => CertificateProperties {
            pfx_blob: Some(BASE64_STANDARD.encode(content)),
            password: Some(password.clone()),
            ..CertificateProperties::default()
        },
        CertificateSource::ExistingOrder { order_id } => {
            let id = ResourceId::parse(order_id)?;
            let stored = CertificateOrdersClient::new(client.clone())
                .list_key_vault_bindings(id.resource_group_name(), id.name())
                .collect_all()
                .await?
                .into_iter()
                .next()
                .ok_or(ArmError::UnexpectedEmptyBody {
                    status: 200,
                    type_name: std::any::type_name::<KeyVaultBindingInner>(),
                })?;
            CertificateProperties {
                key_vault_id: stored.properties.key_vault_id,
                key_vault_secret_name: stored.properties.key_vault_secret_name,
                ..CertificateProperties::default()
            }
        }
        CertificateSource::NewOrder {
            order_name,
            key_vault,
        } => {
            let (vault_id, secret_name) = order_certificate(
                client,
                resource_group,
                location,
                host_name,
                order_name,
                key_vault,
            )
            .await?;
            CertificateProperties {
                key_vault_id: Some(vault_id),
                key_vault_secret_name: Some(secret_name),
                ..CertificateProperties::default()
            }
        }
    };

    let certificate = CertificateInner {
        location: location.map(ToString::to_string),
        properties,
        ..CertificateInner::default()
    };
    let installed = CertificatesClient::new(client.clone())
        .create_or_update(resource_group, &certificate_name_for(host_name), &certificate)
        .await?;
    tracing::debug!(
        "Installed certificate for '{}' with thumbprint {:?}",
        host_name,
        installed.properties.thumbprint
    );
    Ok(installed.properties.thumbprint)
}

fn binding_body(
    site: &str,
    ssl_state: SslState,
    thumbprint: Option<String>,
) -> HostNameBindingInner {
    HostNameBindingInner {
        properties: HostNameBindingProperties {
            site_name: Some(site.to_string()),
            ssl_state: Some(ssl_state),
            thumbprint,
            ..HostNameBindingProperties::default()
        },
        ..HostNameBindingInner::default()
    }
}

/// Submits the pending SSL bindings of a commit.
///
/// A created binding installs its certificate, then binds the host name. A
/// removed binding turns TLS off for the host name and keeps the host name.
pub(crate) async fn commit_ssl_bindings(
    client: &ServiceClient,
    resource_group: &str,
    site: &str,
    location: Option<&str>,
    pending: &PendingChildren<SslBinding>,
) -> Result<ChildResults<HostNameBindingInner>, CommitError> {
    commit_children(site, pending, |host_name, action| match action {
        PendingAction::Create(binding) | PendingAction::Update(binding) => {
            let client = client.clone();
            let resource_group = resource_group.to_string();
            let site = site.to_string();
            let location = location.map(ToString::to_string);
            let host_name = host_name.to_string();
            let binding = binding.clone();
            Operation::new(async move {
                let thumbprint = install_certificate(
                    &client,
                    &resource_group,
                    location.as_deref(),
                    &host_name,
                    &binding.certificate,
                )
                .await?;
                WebAppsClient::new(client)
                    .create_or_update_host_name_binding(
                        &resource_group,
                        &site,
                        &host_name,
                        &binding_body(&site, binding.ssl_state, thumbprint),
                    )
                    .await
            })
        }
        PendingAction::Delete => WebAppsClient::new(client.clone())
            .create_or_update_host_name_binding(
                resource_group,
                site,
                host_name,
                &binding_body(site, SslState::Disabled, None),
            ),
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pfx(ssl_state: SslState) -> PendingAction<SslBinding> {
        PendingAction::Create(SslBinding {
            certificate: CertificateSource::Pfx {
                content: vec![1, 2, 3],
                password: "secret".to_string(),
            },
            ssl_state,
        })
    }

    #[test]
    fn test_certificate_name_for_wildcard() {
        assert_eq!(certificate_name_for("www.contoso.com"), "www.contoso.com");
        assert_eq!(certificate_name_for("*.contoso.com"), "wildcard.contoso.com");
    }

    #[test]
    fn test_pfx_password_is_redacted() {
        let source = CertificateSource::Pfx {
            content: vec![0; 16],
            password: "hunter2".to_string(),
        };
        let debug = format!("{source:?}");
        assert!(debug.contains("[16 bytes]"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_check_accepts_complete_bindings() {
        let mut pending = PendingChildren::new();
        pending.insert("www.contoso.com", pfx(SslState::SniEnabled));
        pending.insert(
            "api.contoso.com",
            PendingAction::Create(SslBinding {
                certificate: CertificateSource::NewOrder {
                    order_name: "order1".to_string(),
                    key_vault: KeyVaultSource::New {
                        name: "vault1".to_string(),
                        tenant_id: "tenant1".to_string(),
                    },
                },
                ssl_state: SslState::IpBasedEnabled,
            }),
        );
        pending.insert("old.contoso.com", PendingAction::Delete);
        assert!(check_ssl_bindings(&pending).is_ok());
    }

    #[test]
    fn test_check_rejects_blank_host_name() {
        let mut pending = PendingChildren::new();
        pending.insert(" ", pfx(SslState::SniEnabled));
        let error = check_ssl_bindings(&pending).unwrap_err();
        assert!(matches!(
            error,
            ArmError::Validation(ValidationError::MissingParameter { ref parameter, .. })
                if parameter == "hostName"
        ));
    }

    #[test]
    fn test_check_rejects_malformed_order_id() {
        let mut pending = PendingChildren::new();
        pending.insert(
            "www.contoso.com",
            PendingAction::Create(SslBinding {
                certificate: CertificateSource::ExistingOrder {
                    order_id: "not-an-id".to_string(),
                },
                ssl_state: SslState::SniEnabled,
            }),
        );
        let error = check_ssl_bindings(&pending).unwrap_err();
        assert!(matches!(
            error,
            ArmError::Validation(ValidationError::InvalidResourceId { .. })
        ));
    }

    #[test]
    fn test_check_rejects_new_vault_without_tenant() {
        let mut pending = PendingChildren::new();
        pending.insert(
            "www.contoso.com",
            PendingAction::Create(SslBinding {
                certificate: CertificateSource::NewOrder {
                    order_name: "order1".to_string(),
                    key_vault: KeyVaultSource::New {
                        name: "vault1".to_string(),
                        tenant_id: String::new(),
                    },
                },
                ssl_state: SslState::SniEnabled,
            }),
        );
        let error = check_ssl_bindings(&pending).unwrap_err();
        assert!(matches!(
            error,
            ArmError::Validation(ValidationError::MissingParameter { ref parameter, .. })
                if parameter == "tenantId"
        ));
    }
}
