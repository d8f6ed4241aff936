//! Staged definition of a new CDN profile.
//!
//! ```text
//! Blank --with_region--> WithResourceGroup --with_existing_resource_group--> WithSku
//!       --with_*_sku--> WithCreate --create()--> Profile
//! ```

use std::marker::PhantomData;

use crate::cdn::endpoint::EndpointDefinition;
use crate::cdn::models::{EndpointInner, ProfileInner, Sku, SkuName};
use crate::cdn::operations::ProfilesClient;
use crate::cdn::profile::{check_endpoints, commit_endpoints, free_endpoint_name, Profile};
use crate::config::Region;
use crate::fluent::{
    commit_parent, parent_failure, Attachable, Blank, PendingAction, PendingChildren, WithCreate,
    WithResourceGroup,
};
use crate::rest::{ArmError, ServiceClient};

/// Stage: the resource group is set, a pricing tier is required next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithSku;

/// A profile being defined, at stage `S`.
#[derive(Debug)]
#[must_use = "a profile definition does nothing until create() is awaited"]
pub struct ProfileDefinition<S> {
    client: ServiceClient,
    name: String,
    resource_group: String,
    inner: ProfileInner,
    endpoints: PendingChildren<EndpointInner>,
    _stage: PhantomData<S>,
}

impl<S> ProfileDefinition<S> {
    fn into_stage<T>(self) -> ProfileDefinition<T> {
        ProfileDefinition {
            client: self.client,
            name: self.name,
            resource_group: self.resource_group,
            inner: self.inner,
            endpoints: self.endpoints,
            _stage: PhantomData,
        }
    }

    /// Returns the name of the profile being defined.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ProfileDefinition<Blank> {
    pub(crate) fn new(client: ServiceClient, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
            resource_group: String::new(),
            inner: ProfileInner::default(),
            endpoints: PendingChildren::new(),
            _stage: PhantomData,
        }
    }

    /// Sets the region.
    pub fn with_region(mut self, region: Region) -> ProfileDefinition<WithResourceGroup> {
        self.inner.location = Some(region.to_string());
        self.into_stage()
    }
}

impl ProfileDefinition<WithResourceGroup> {
    /// Places the profile in an existing resource group.
    pub fn with_existing_resource_group(
        mut self,
        resource_group: impl Into<String>,
    ) -> ProfileDefinition<WithSku> {
        self.resource_group = resource_group.into();
        self.into_stage()
    }
}

impl ProfileDefinition<WithSku> {
    /// Sets the pricing tier.
    pub fn with_sku(mut self, sku: SkuName) -> ProfileDefinition<WithCreate> {
        self.inner.sku = Some(Sku { name: sku });
        self.into_stage()
    }

    /// Uses the Standard Akamai tier.
    pub fn with_standard_akamai_sku(self) -> ProfileDefinition<WithCreate> {
        self.with_sku(SkuName::StandardAkamai)
    }

    /// Uses the Standard Verizon tier.
    pub fn with_standard_verizon_sku(self) -> ProfileDefinition<WithCreate> {
        self.with_sku(SkuName::StandardVerizon)
    }

    /// Uses the Premium Verizon tier.
    pub fn with_premium_verizon_sku(self) -> ProfileDefinition<WithCreate> {
        self.with_sku(SkuName::PremiumVerizon)
    }
}

impl ProfileDefinition<WithCreate> {
    /// Sets a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.tags.insert(key.into(), value.into());
        self
    }

    /// Adds an endpoint with a generated name pulling from `origin_host`.
    pub fn with_new_endpoint(self, origin_host: &str) -> Self {
        let name = free_endpoint_name(origin_host, self.endpoints.len() + 1, |name| {
            self.endpoints.contains(name)
        });
        self.define_new_endpoint(name).with_origin(origin_host).attach()
    }

    /// Starts the definition of an endpoint.
    pub fn define_new_endpoint(self, name: impl Into<String>) -> EndpointDefinition<Self, Blank> {
        EndpointDefinition::new(self, name)
    }

    /// Returns the endpoints staged for creation.
    #[must_use]
    pub const fn pending_endpoints(&self) -> &PendingChildren<EndpointInner> {
        &self.endpoints
    }

    /// Creates the profile, then each staged endpoint in the order it was
    /// attached.
    ///
    /// On success the staged endpoints are cleared. On failure they are kept,
    /// so the same definition can be created again.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::Validation`] for a missing parameter of the profile
    /// or of a staged endpoint (nothing is sent) or [`ArmError::Commit`]
    /// naming every failed call.
    pub async fn create(&mut self) -> Result<Profile, ArmError> {
        check_endpoints(&self.endpoints)?;
        let returned = commit_parent(
            &self.name,
            ProfilesClient::new(self.client.clone()).create(
                &self.resource_group,
                &self.name,
                &self.inner,
            ),
        )
        .await
        .map_err(parent_failure)?;

        let results = commit_endpoints(
            &self.client,
            &self.resource_group,
            &self.name,
            self.inner.location.as_deref(),
            &self.endpoints,
        )
        .await?;

        let inner = returned.unwrap_or_else(|| self.inner.clone());
        let id = Profile::profile_id(&self.client, &self.resource_group, &self.name);
        let mut profile = Profile::from_parts(self.client.clone(), id, inner, Vec::new());
        profile.merge_endpoints(results);

        self.endpoints.clear();
        tracing::debug!(
            "Created profile '{}' with {} endpoint(s)",
            self.name,
            profile.endpoints().len()
        );
        Ok(profile)
    }
}

impl Attachable<EndpointInner> for ProfileDefinition<WithCreate> {
    fn attach_child(&mut self, name: String, action: PendingAction<EndpointInner>) {
        self.endpoints.insert(name, action);
    }
}
