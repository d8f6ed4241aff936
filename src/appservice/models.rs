//! Wire models of the Web, certificate registration and Key Vault providers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How TLS is served for a host name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SslState {
    /// No TLS binding.
    #[default]
    Disabled,
    /// Server Name Indication binding.
    SniEnabled,
    /// Binding on a dedicated IP address.
    IpBasedEnabled,
}

impl SslState {
    /// Returns the wire name of the state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "Disabled",
            Self::SniEnabled => "SniEnabled",
            Self::IpBasedEnabled => "IpBasedEnabled",
        }
    }
}

impl fmt::Display for SslState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TLS state of one host name of a site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostNameSslState {
    /// The host name.
    pub name: String,
    /// Binding kind.
    #[serde(default)]
    pub ssl_state: SslState,
    /// Dedicated IP of an IP based binding.
    #[serde(rename = "virtualIP", default, skip_serializing_if = "Option::is_none")]
    pub virtual_ip: Option<String>,
    /// Thumbprint of the bound certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbprint: Option<String>,
}

impl HostNameSslState {
    /// Returns the binding kind.
    #[must_use]
    pub const fn ssl_state(&self) -> SslState {
        self.ssl_state
    }

    /// Returns the dedicated IP of an IP based binding.
    #[must_use]
    pub fn virtual_ip(&self) -> Option<&str> {
        self.virtual_ip.as_deref()
    }

    /// Returns the thumbprint of the bound certificate.
    #[must_use]
    pub fn thumbprint(&self) -> Option<&str> {
        self.thumbprint.as_deref()
    }
}

/// Configuration of a site (`config/web`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Region of the configuration resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Keep the site loaded while idle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_on: Option<bool>,
    /// .NET Framework version (e.g. `v4.6`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_framework_version: Option<String>,
    /// PHP version, empty to disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub php_version: Option<String>,
    /// Use 32-bit worker processes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use32_bit_worker_process: Option<bool>,
    /// Enable web sockets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_sockets_enabled: Option<bool>,
    /// Default documents in lookup order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_documents: Option<Vec<String>>,
}

/// Settings of a site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteProperties {
    /// Id of the App Service plan hosting the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_farm_id: Option<String>,
    /// Running state; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Whether the site is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Host names bound to the site.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host_names: Vec<String>,
    /// The `*.azurewebsites.net` host name; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_host_name: Option<String>,
    /// TLS state of each host name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host_name_ssl_states: Vec<HostNameSslState>,
    /// Site configuration, when read or set together with the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_config: Option<SiteConfig>,
}

/// A web app or deployment slot as sent and returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInner {
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
    /// Site kind (e.g. `app`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Resource tags.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// Site settings.
    #[serde(default)]
    pub properties: SiteProperties,
}

/// Settings of a host name binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostNameBindingProperties {
    /// Name of the site owning the binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    /// Binding kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_state: Option<SslState>,
    /// Thumbprint of the bound certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbprint: Option<String>,
    /// Dedicated IP of an IP based binding; set by the service.
    #[serde(rename = "virtualIP", default, skip_serializing_if = "Option::is_none")]
    pub virtual_ip: Option<String>,
}

/// A host name binding of a site (`hostNameBindings/{hostName}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostNameBindingInner {
    /// Canonical id; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `{site}/{hostName}`; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Binding settings.
    #[serde(default)]
    pub properties: HostNameBindingProperties,
}

/// Settings of a site certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateProperties {
    /// Base64 PFX content of an uploaded certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pfx_blob: Option<String>,
    /// Password of the PFX content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Key Vault holding the certificate secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_vault_id: Option<String>,
    /// Name of the certificate secret in the vault.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_vault_secret_name: Option<String>,
    /// Host names covered by the certificate; set by the service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host_names: Vec<String>,
    /// Certificate thumbprint; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbprint: Option<String>,
}

/// A certificate usable by the sites of a resource group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInner {
    /// Canonical id; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Region name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Certificate settings.
    #[serde(default)]
    pub properties: CertificateProperties,
}

/// Product of an App Service certificate order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificateProductType {
    /// Single domain certificate.
    StandardDomainValidatedSsl,
    /// Wildcard certificate.
    StandardDomainValidatedWildCardSsl,
}

/// Settings of an App Service certificate order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateOrderProperties {
    /// Subject of the certificate (`CN={host}`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinguished_name: Option<String>,
    /// Ordered product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<CertificateProductType>,
    /// Validity in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity_in_years: Option<u8>,
    /// Key size in bits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_size: Option<u16>,
    /// Renew automatically before expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
    /// Order status; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// An App Service certificate order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateOrderInner {
    /// Canonical id; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Region name; orders are `global`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Order settings.
    #[serde(default)]
    pub properties: CertificateOrderProperties,
}

/// Settings of the Key Vault binding of a certificate order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyVaultBindingProperties {
    /// Key Vault storing the issued certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_vault_id: Option<String>,
    /// Name of the secret in the vault.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_vault_secret_name: Option<String>,
    /// Provisioning state; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

/// The Key Vault binding of a certificate order
/// (`certificateOrders/{order}/certificates/{name}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyVaultBindingInner {
    /// Canonical id; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Region name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Binding settings.
    #[serde(default)]
    pub properties: KeyVaultBindingProperties,
}

/// Pricing tier of a Key Vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSku {
    /// Sku family, always `A`.
    pub family: String,
    /// `standard` or `premium`.
    pub name: String,
}

impl Default for VaultSku {
    fn default() -> Self {
        Self {
            family: "A".to_string(),
            name: "standard".to_string(),
        }
    }
}

/// Settings of a Key Vault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultProperties {
    /// Azure AD tenant authenticating requests to the vault.
    pub tenant_id: String,
    /// Pricing tier.
    #[serde(default)]
    pub sku: VaultSku,
    /// Access policies; the certificate service is granted access separately.
    #[serde(default)]
    pub access_policies: Vec<serde_json::Value>,
}

/// A Key Vault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultInner {
    /// Canonical id; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Region name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Vault settings.
    pub properties: VaultProperties,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_site_reads_ssl_states() {
        let site: SiteInner = serde_json::from_value(json!({
            "name": "app1",
            "location": "westus",
            "properties": {
                "serverFarmId": "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Web/serverfarms/plan1",
                "hostNameSslStates": [
                    { "name": "app1.azurewebsites.net", "sslState": "Disabled" },
                    { "name": "www.contoso.com", "sslState": "IpBasedEnabled", "virtualIP": "10.0.0.4", "thumbprint": "ABC" }
                ]
            }
        }))
        .unwrap();

        let states = &site.properties.host_name_ssl_states;
        assert_eq!(states.len(), 2);
        assert_eq!(states[1].ssl_state(), SslState::IpBasedEnabled);
        assert_eq!(states[1].virtual_ip(), Some("10.0.0.4"));
        assert_eq!(states[1].thumbprint(), Some("ABC"));
    }

    #[test]
    fn test_binding_serializes_only_set_fields() {
        let binding = HostNameBindingInner {
            properties: HostNameBindingProperties {
                ssl_state: Some(SslState::SniEnabled),
                thumbprint: Some("ABC".to_string()),
                ..HostNameBindingProperties::default()
            },
            ..HostNameBindingInner::default()
        };
        assert_eq!(
            serde_json::to_value(&binding).unwrap(),
            json!({ "properties": { "sslState": "SniEnabled", "thumbprint": "ABC" } })
        );
    }
}
