//! Resource wrappers: a typed value bound to its remote identity.
//!
//! A [`Resource<T>`] owns the last known server representation of one
//! resource, its immutable [`ResourceId`] and the [`ServiceClient`] used to
//! talk to it. Identity-derived accessors never look at the value.
//!
//! [`Refreshable::refresh`] re-reads the resource and replaces the value
//! only on success; on any error (including Not-Found for a deleted
//! resource) the previous value is kept.
//!
//! # Implementing a resource kind
//!
//! ```rust,ignore
//! impl ResourceInner for ProfileInner {
//!     const KIND: &'static str = "Profile";
//!
//!     fn fetch(client: &ServiceClient, id: &ResourceId) -> Operation<Self> {
//!         ProfilesClient::new(client.clone()).get(id.resource_group_name(), id.name())
//!     }
//! }
//! ```

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::rest::client::ServiceClient;
use crate::rest::errors::ArmError;
use crate::rest::operation::Operation;
use crate::rest::resource_id::ResourceId;

/// A serializable resource value with a canonical read operation.
pub trait ResourceInner: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Human-readable kind, used in error messages (e.g. "Endpoint").
    const KIND: &'static str;

    /// Builds the canonical GET for the resource identified by `id`.
    fn fetch(client: &ServiceClient, id: &ResourceId) -> Operation<Self>;
}

/// Re-reads a wrapper's state from the service.
#[allow(async_fn_in_trait)]
pub trait Refreshable {
    /// Replaces the local state with the server's.
    ///
    /// # Errors
    ///
    /// Returns the error of the failed read; the local state is unchanged.
    async fn refresh(&mut self) -> Result<(), ArmError>;
}

/// A typed resource value with its identity and client.
#[derive(Debug, Clone)]
pub struct Resource<T> {
    id: ResourceId,
    inner: T,
    client: ServiceClient,
}

impl<T: ResourceInner> Resource<T> {
    /// Binds a value to its identity.
    #[must_use]
    pub const fn new(id: ResourceId, inner: T, client: ServiceClient) -> Self {
        Self { id, inner, client }
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// Returns the name of the parent resource, if this is a child.
    #[must_use]
    pub fn parent_name(&self) -> Option<&str> {
        self.id.parent_name()
    }

    /// Returns the resource group name.
    #[must_use]
    pub fn resource_group_name(&self) -> &str {
        self.id.resource_group_name()
    }

    /// Returns the canonical identity.
    #[must_use]
    pub const fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Returns the last known server representation.
    #[must_use]
    pub const fn inner(&self) -> &T {
        &self.inner
    }

    /// Consumes the wrapper, returning the value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Returns the client bound to this resource.
    #[must_use]
    pub const fn client(&self) -> &ServiceClient {
        &self.client
    }

    /// Replaces the value with a new authoritative representation.
    pub(crate) fn set_inner(&mut self, inner: T) {
        self.inner = inner;
    }

    /// Builds the canonical GET for this resource without applying it.
    pub fn fetch(&self) -> Operation<T> {
        T::fetch(&self.client, &self.id)
    }
}

impl<T: ResourceInner> Refreshable for Resource<T> {
    async fn refresh(&mut self) -> Result<(), ArmError> {
        let fresh = self.fetch().await?;
        tracing::debug!("Refreshed {} '{}'", T::KIND, self.id);
        self.inner = fresh;
        Ok(())
    }
}

impl<T> Deref for Resource<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenCredential;
    use crate::clients::HttpResponse;
    use crate::config::{ArmConfig, SubscriptionId};
    use crate::rest::CloudError;
    use serde::Deserialize;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        size: u32,
    }

    impl ResourceInner for Widget {
        const KIND: &'static str = "Widget";

        fn fetch(_client: &ServiceClient, id: &ResourceId) -> Operation<Self> {
            match id.name() {
                "gone" => Operation::failed(CloudError::from_response(&HttpResponse::new(
                    404,
                    HashMap::new(),
                    r#"{"error":{"code":"NotFound","message":"deleted"}}"#,
                ))),
                _ => Operation::ready(Self { size: 2 }),
            }
        }
    }

    fn client() -> ServiceClient {
        let config = ArmConfig::builder()
            .subscription_id(SubscriptionId::new("sub1").unwrap())
            .build()
            .unwrap();
        ServiceClient::new(config, Arc::new(StaticTokenCredential::new("token")))
    }

    fn widget(name: &str) -> Resource<Widget> {
        let id = ResourceId::new("sub1", "rg1", "Test.Widgets", "widgets", name)
            .child("parts", name);
        Resource::new(id, Widget { size: 1 }, client())
    }

    #[test]
    fn test_identity_accessors() {
        let resource = widget("w1");
        assert_eq!(resource.name(), "w1");
        assert_eq!(resource.parent_name(), Some("w1"));
        assert_eq!(resource.resource_group_name(), "rg1");
        assert_eq!(resource.size, 1);
    }

    #[tokio::test]
    async fn test_refresh_replaces_value() {
        let mut resource = widget("w1");
        resource.refresh().await.unwrap();
        assert_eq!(resource.inner(), &Widget { size: 2 });
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_value() {
        let mut resource = widget("gone");
        let error = resource.refresh().await.unwrap_err();
        assert!(error.is_not_found());
        assert_eq!(resource.inner(), &Widget { size: 1 });
    }
}
