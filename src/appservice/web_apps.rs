//! Entry point for web apps.

use crate::appservice::definition::WebAppDefinition;
use crate::appservice::models::SiteInner;
use crate::appservice::operations::WebAppsClient;
use crate::appservice::web_app::WebApp;
use crate::fluent::Blank;
use crate::rest::{Operation, PagedOperation, ServiceClient};

/// Web apps of one subscription.
#[derive(Debug, Clone)]
pub struct WebApps {
    client: ServiceClient,
}

impl WebApps {
    /// Creates the collection for the client's subscription.
    #[must_use]
    pub const fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Starts the definition of a new web app.
    pub fn define(&self, name: impl Into<String>) -> WebAppDefinition<Blank> {
        WebAppDefinition::new(self.client.clone(), name)
    }

    /// Reads a web app together with its site configuration.
    pub fn get_by_resource_group(
        &self,
        resource_group: impl Into<String>,
        name: impl Into<String>,
    ) -> Operation<WebApp> {
        WebApp::load(self.client.clone(), resource_group.into(), name.into())
    }

    /// Lists the web apps of a resource group, without their configuration.
    pub fn list_by_resource_group(&self, resource_group: &str) -> PagedOperation<SiteInner> {
        WebAppsClient::new(self.client.clone()).list_by_resource_group(resource_group)
    }

    /// Deletes a web app.
    pub fn delete_by_resource_group(&self, resource_group: &str, name: &str) -> Operation<()> {
        WebAppsClient::new(self.client.clone()).delete(resource_group, name)
    }
}
