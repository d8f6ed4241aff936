//! The web app wrapper and its update builder.

use std::collections::BTreeMap;
use std::ops::Deref;

use crate::appservice::models::{
    HostNameBindingInner, HostNameSslState, SiteConfig, SiteInner, SslState,
};
use crate::appservice::operations::{WebAppsClient, PROVIDER_NAMESPACE};
use crate::appservice::ssl_binding::{
    check_ssl_bindings, commit_ssl_bindings, HostNameSslBindingDefinition, SslBinding,
};
use crate::fluent::{
    commit_parent, parent_failure, Attachable, Blank, ChildResults, PendingAction, PendingChildren,
};
use crate::rest::{
    ArmError, Operation, Refreshable, Resource, ResourceId, ResourceInner, ServiceClient,
};

impl ResourceInner for SiteInner {
    const KIND: &'static str = "WebApp";

    fn fetch(client: &ServiceClient, id: &ResourceId) -> Operation<Self> {
        WebAppsClient::new(client.clone()).get(id.resource_group_name(), id.name())
    }
}

/// A web app with its site configuration.
///
/// `ssl_bindings()` reflects the last successful commit or refresh.
#[derive(Debug, Clone)]
pub struct WebApp {
    resource: Resource<SiteInner>,
}

impl WebApp {
    pub(crate) fn site_id(client: &ServiceClient, resource_group: &str, name: &str) -> ResourceId {
        ResourceId::new(
            client.subscription_id().to_string(),
            resource_group,
            PROVIDER_NAMESPACE,
            "sites",
            name,
        )
    }

    pub(crate) const fn from_parts(
        client: ServiceClient,
        id: ResourceId,
        inner: SiteInner,
    ) -> Self {
        Self {
            resource: Resource::new(id, inner, client),
        }
    }

    /// Reads a site, then its `config/web` resource.
    pub(crate) fn load(
        client: ServiceClient,
        resource_group: String,
        name: String,
    ) -> Operation<Self> {
        Operation::new(async move {
            let sites = WebAppsClient::new(client.clone());
            let mut inner = sites.get(&resource_group, &name).await?;
            let config = sites.get_configuration(&resource_group, &name).await?;
            inner.properties.site_config = Some(config);
            let id = Self::site_id(&client, &resource_group, &name);
            Ok(Self::from_parts(client, id, inner))
        })
    }

    pub(crate) fn merge_ssl_bindings(&mut self, results: ChildResults<HostNameBindingInner>) {
        let mut inner = self.inner().clone();
        for (host_name, binding) in results {
            let state = HostNameSslState {
                name: host_name.clone(),
                ssl_state: binding.properties.ssl_state.unwrap_or_default(),
                virtual_ip: binding.properties.virtual_ip,
                thumbprint: binding.properties.thumbprint,
            };
            let states = &mut inner.properties.host_name_ssl_states;
            match states.iter_mut().find(|existing| existing.name == host_name) {
                Some(existing) => *existing = state,
                None => states.push(state),
            }
        }
        self.resource.set_inner(inner);
    }

    /// Returns the site name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.resource.name()
    }

    /// Returns the resource group name.
    #[must_use]
    pub fn resource_group_name(&self) -> &str {
        self.resource.resource_group_name()
    }

    /// Returns the canonical identity.
    #[must_use]
    pub const fn id(&self) -> &ResourceId {
        self.resource.id()
    }

    /// Returns the last known server representation.
    #[must_use]
    pub const fn inner(&self) -> &SiteInner {
        self.resource.inner()
    }

    /// Returns the client bound to this web app.
    #[must_use]
    pub const fn client(&self) -> &ServiceClient {
        self.resource.client()
    }

    /// Returns the region name.
    #[must_use]
    pub fn region_name(&self) -> Option<&str> {
        self.inner().location.as_deref()
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.inner().tags
    }

    /// Returns the id of the hosting App Service plan.
    #[must_use]
    pub fn app_service_plan_id(&self) -> Option<&str> {
        self.inner().properties.server_farm_id.as_deref()
    }

    /// Returns the running state (e.g. `Running`).
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.inner().properties.state.as_deref()
    }

    /// Returns the `*.azurewebsites.net` host name.
    #[must_use]
    pub fn default_host_name(&self) -> Option<&str> {
        self.inner().properties.default_host_name.as_deref()
    }

    /// Returns the site configuration read with the site.
    #[must_use]
    pub fn site_config(&self) -> Option<&SiteConfig> {
        self.inner().properties.site_config.as_ref()
    }

    /// Returns the host names with TLS enabled, keyed by host name.
    #[must_use]
    pub fn ssl_bindings(&self) -> BTreeMap<&str, &HostNameSslState> {
        self.inner()
            .properties
            .host_name_ssl_states
            .iter()
            .filter(|state| state.ssl_state != SslState::Disabled)
            .map(|state| (state.name.as_str(), state))
            .collect()
    }

    /// Starts an update of this web app.
    pub fn update(&mut self) -> WebAppUpdate<'_> {
        WebAppUpdate::new(self)
    }
}

impl Refreshable for WebApp {
    async fn refresh(&mut self) -> Result<(), ArmError> {
        let fresh = Self::load(
            self.client().clone(),
            self.resource_group_name().to_string(),
            self.name().to_string(),
        )
        .await?;
        tracing::debug!("Refreshed web app '{}' and its configuration", fresh.name());
        *self = fresh;
        Ok(())
    }
}

impl Deref for WebApp {
    type Target = SiteInner;

    fn deref(&self) -> &Self::Target {
        self.resource.inner()
    }
}

/// Staged changes to a [`WebApp`].
///
/// Nothing is sent until [`apply`](Self::apply), which writes the site and
/// then each staged SSL binding change.
#[derive(Debug)]
#[must_use = "web app changes are sent only by apply()"]
pub struct WebAppUpdate<'a> {
    app: &'a mut WebApp,
    tags: BTreeMap<String, String>,
    ssl_bindings: PendingChildren<SslBinding>,
}

impl<'a> WebAppUpdate<'a> {
    fn new(app: &'a mut WebApp) -> Self {
        let tags = app.tags().clone();
        Self {
            app,
            tags,
            ssl_bindings: PendingChildren::new(),
        }
    }

    /// Sets a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Removes a tag.
    pub fn without_tag(mut self, key: &str) -> Self {
        self.tags.remove(key);
        self
    }

    /// Starts the definition of an SSL binding.
    pub fn define_ssl_binding(self) -> HostNameSslBindingDefinition<Self, Blank> {
        HostNameSslBindingDefinition::new(self)
    }

    /// Turns TLS off for a host name. The host name stays bound to the site.
    pub fn without_ssl_binding(mut self, host_name: impl Into<String>) -> Self {
        self.ssl_bindings.insert(host_name, PendingAction::Delete);
        self
    }

    /// Returns the staged SSL binding changes.
    #[must_use]
    pub const fn pending_ssl_bindings(&self) -> &PendingChildren<SslBinding> {
        &self.ssl_bindings
    }

    /// Sends the staged changes: the site first, then each SSL binding change
    /// in the order it was staged.
    ///
    /// # Errors
    ///
    /// - [`ArmError::Validation`] if a staged binding could not be sent;
    ///   nothing is sent
    /// - [`ArmError::Commit`] naming every failed call; if the site call
    ///   failed no binding call was made
    pub async fn apply(&mut self) -> Result<&WebApp, ArmError> {
        check_ssl_bindings(&self.ssl_bindings)?;

        let client = self.app.client().clone();
        let resource_group = self.app.resource_group_name().to_string();
        let name = self.app.name().to_string();
        let config = self.app.site_config().cloned();
        let mut site = self.app.inner().clone();
        site.tags = self.tags.clone();
        site.properties.site_config = None;

        let returned = commit_parent(
            &name,
            WebAppsClient::new(client.clone()).create_or_update(&resource_group, &name, &site),
        )
        .await
        .map_err(parent_failure)?;

        let location = site.location.clone();
        let results = commit_ssl_bindings(
            &client,
            &resource_group,
            &name,
            location.as_deref(),
            &self.ssl_bindings,
        )
        .await?;

        let mut inner = returned.unwrap_or(site);
        inner.properties.site_config = config;
        self.app.resource.set_inner(inner);
        self.app.merge_ssl_bindings(results);
        self.ssl_bindings.clear();
        tracing::debug!("Applied update of web app '{}'", name);
        Ok(&*self.app)
    }
}

impl Attachable<SslBinding> for WebAppUpdate<'_> {
    fn attach_child(&mut self, name: String, action: PendingAction<SslBinding>) {
        self.ssl_bindings.insert(name, action);
    }
}
