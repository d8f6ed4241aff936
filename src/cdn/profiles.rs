//! Entry point for CDN profiles.

use crate::cdn::definition::ProfileDefinition;
use crate::cdn::models::ProfileInner;
use crate::cdn::operations::ProfilesClient;
use crate::cdn::profile::Profile;
use crate::fluent::Blank;
use crate::rest::{Operation, PagedOperation, ServiceClient};

/// CDN profiles of one subscription.
///
/// # Example
///
/// ```rust,ignore
/// let profiles = Profiles::new(client);
/// let mut profile = profiles.get_by_resource_group("rg1", "profile1").await?;
/// for (name, endpoint) in profile.endpoints() {
///     println!("{name}: {:?}", endpoint.host_name());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Profiles {
    client: ServiceClient,
}

impl Profiles {
    /// Creates the collection for the client's subscription.
    #[must_use]
    pub const fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Starts the definition of a new profile.
    pub fn define(&self, name: impl Into<String>) -> ProfileDefinition<Blank> {
        ProfileDefinition::new(self.client.clone(), name)
    }

    /// Reads a profile together with its endpoints.
    pub fn get_by_resource_group(
        &self,
        resource_group: impl Into<String>,
        name: impl Into<String>,
    ) -> Operation<Profile> {
        Profile::load(self.client.clone(), resource_group.into(), name.into())
    }

    /// Lists the profiles of a resource group.
    pub fn list_by_resource_group(&self, resource_group: &str) -> PagedOperation<ProfileInner> {
        ProfilesClient::new(self.client.clone()).list_by_resource_group(resource_group)
    }

    /// Lists the profiles of the subscription.
    pub fn list(&self) -> PagedOperation<ProfileInner> {
        ProfilesClient::new(self.client.clone()).list()
    }

    /// Deletes a profile and its endpoints.
    pub fn delete_by_resource_group(&self, resource_group: &str, name: &str) -> Operation<()> {
        ProfilesClient::new(self.client.clone()).delete(resource_group, name)
    }
}
