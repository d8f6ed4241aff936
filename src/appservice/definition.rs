//! Staged definition of a new web app.
//!
//! ```text
//! Blank --with_region--> WithResourceGroup --with_existing_resource_group-->
//!       WithAppServicePlan --with_existing_app_service_plan--> WithCreate --create()--> WebApp
//! ```

use std::marker::PhantomData;

use crate::appservice::models::{SiteConfig, SiteInner};
use crate::appservice::operations::WebAppsClient;
use crate::appservice::ssl_binding::{
    check_ssl_bindings, commit_ssl_bindings, HostNameSslBindingDefinition, SslBinding,
};
use crate::appservice::web_app::WebApp;
use crate::config::Region;
use crate::fluent::{
    commit_parent, parent_failure, Attachable, Blank, PendingAction, PendingChildren, WithCreate,
    WithResourceGroup,
};
use crate::rest::{ArmError, ServiceClient};

/// Stage: the resource group is set, an App Service plan is required next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithAppServicePlan;

/// A web app being defined, at stage `S`.
#[derive(Debug)]
#[must_use = "a web app definition does nothing until create() is awaited"]
pub struct WebAppDefinition<S> {
    client: ServiceClient,
    name: String,
    resource_group: String,
    inner: SiteInner,
    ssl_bindings: PendingChildren<SslBinding>,
    _stage: PhantomData<S>,
}

impl<S> WebAppDefinition<S> {
    fn into_stage<T>(self) -> WebAppDefinition<T> {
        WebAppDefinition {
            client: self.client,
            name: self.name,
            resource_group: self.resource_group,
            inner: self.inner,
            ssl_bindings: self.ssl_bindings,
            _stage: PhantomData,
        }
    }

    /// Returns the name of the web app being defined.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl WebAppDefinition<Blank> {
    pub(crate) fn new(client: ServiceClient, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
            resource_group: String::new(),
            inner: SiteInner {
                kind: Some("app".to_string()),
                ..SiteInner::default()
            },
            ssl_bindings: PendingChildren::new(),
            _stage: PhantomData,
        }
    }

    /// Sets the region.
    pub fn with_region(mut self, region: Region) -> WebAppDefinition<WithResourceGroup> {
        self.inner.location = Some(region.to_string());
        self.into_stage()
    }
}

impl WebAppDefinition<WithResourceGroup> {
    /// Places the web app in an existing resource group.
    pub fn with_existing_resource_group(
        mut self,
        resource_group: impl Into<String>,
    ) -> WebAppDefinition<WithAppServicePlan> {
        self.resource_group = resource_group.into();
        self.into_stage()
    }
}

impl WebAppDefinition<WithAppServicePlan> {
    /// Hosts the web app on an existing App Service plan, by resource id.
    pub fn with_existing_app_service_plan(
        mut self,
        plan_id: impl Into<String>,
    ) -> WebAppDefinition<WithCreate> {
        self.inner.properties.server_farm_id = Some(plan_id.into());
        self.into_stage()
    }
}

impl WebAppDefinition<WithCreate> {
    /// Sets a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.tags.insert(key.into(), value.into());
        self
    }

    /// Sets the site configuration written with the site.
    pub fn with_site_config(mut self, config: SiteConfig) -> Self {
        self.inner.properties.site_config = Some(config);
        self
    }

    /// Starts the definition of an SSL binding.
    pub fn define_ssl_binding(self) -> HostNameSslBindingDefinition<Self, Blank> {
        HostNameSslBindingDefinition::new(self)
    }

    /// Returns the SSL bindings staged for creation.
    #[must_use]
    pub const fn pending_ssl_bindings(&self) -> &PendingChildren<SslBinding> {
        &self.ssl_bindings
    }

    /// Creates the web app, then each staged SSL binding in the order it was
    /// attached.
    ///
    /// On success the staged bindings are cleared. On failure they are kept,
    /// so the same definition can be created again.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::Validation`] for a missing parameter of the site or
    /// of a staged binding (nothing is sent) or [`ArmError::Commit`] naming
    /// every failed call.
    pub async fn create(&mut self) -> Result<WebApp, ArmError> {
        check_ssl_bindings(&self.ssl_bindings)?;

        let returned = commit_parent(
            &self.name,
            WebAppsClient::new(self.client.clone()).create_or_update(
                &self.resource_group,
                &self.name,
                &self.inner,
            ),
        )
        .await
        .map_err(parent_failure)?;

        let results = commit_ssl_bindings(
            &self.client,
            &self.resource_group,
            &self.name,
            self.inner.location.as_deref(),
            &self.ssl_bindings,
        )
        .await?;

        let inner = returned.unwrap_or_else(|| self.inner.clone());
        let id = WebApp::site_id(&self.client, &self.resource_group, &self.name);
        let mut app = WebApp::from_parts(self.client.clone(), id, inner);
        app.merge_ssl_bindings(results);

        self.ssl_bindings.clear();
        tracing::debug!(
            "Created web app '{}' with {} SSL binding(s)",
            self.name,
            app.ssl_bindings().len()
        );
        Ok(app)
    }
}

impl Attachable<SslBinding> for WebAppDefinition<WithCreate> {
    fn attach_child(&mut self, name: String, action: PendingAction<SslBinding>) {
        self.ssl_bindings.insert(name, action);
    }
}
