//! The CDN profile wrapper and its update builder.

use std::collections::BTreeMap;
use std::ops::Deref;

use crate::cdn::endpoint::{Endpoint, EndpointDefinition, EndpointUpdate};
use crate::cdn::models::{
    EndpointInner, EndpointUpdateParameters, ProfileInner, ProfileUpdateParameters, SkuName,
};
use crate::cdn::operations::{EndpointsClient, ProfilesClient, PROVIDER_NAMESPACE};
use crate::fluent::{
    check_child_names, commit_children, commit_parent, parent_failure, Attachable, Blank,
    ChildResults, PendingAction, PendingChildren,
};
use crate::rest::{
    ArmError, CommitAction, CommitError, Operation, Refreshable, Resource, ResourceId,
    ResourceInner, ServiceClient, ValidationError,
};

impl ResourceInner for ProfileInner {
    const KIND: &'static str = "Profile";

    fn fetch(client: &ServiceClient, id: &ResourceId) -> Operation<Self> {
        ProfilesClient::new(client.clone()).get(id.resource_group_name(), id.name())
    }
}

/// A CDN profile with its endpoints.
///
/// `endpoints()` reflects the last successful commit or refresh.
#[derive(Debug, Clone)]
pub struct Profile {
    resource: Resource<ProfileInner>,
    endpoints: BTreeMap<String, Endpoint>,
}

impl Profile {
    pub(crate) fn profile_id(
        client: &ServiceClient,
        resource_group: &str,
        name: &str,
    ) -> ResourceId {
        ResourceId::new(
            client.subscription_id().to_string(),
            resource_group,
            PROVIDER_NAMESPACE,
            "profiles",
            name,
        )
    }

    pub(crate) fn from_parts(
        client: ServiceClient,
        id: ResourceId,
        inner: ProfileInner,
        endpoints: Vec<EndpointInner>,
    ) -> Self {
        let mut profile = Self {
            resource: Resource::new(id, inner, client),
            endpoints: BTreeMap::new(),
        };
        for endpoint in endpoints {
            let name = endpoint.name.clone().or_else(|| {
                endpoint
                    .id
                    .as_deref()
                    .and_then(|id| ResourceId::parse(id).ok())
                    .map(|id| id.name().to_string())
            });
            match name {
                Some(name) => profile.put_endpoint(name, endpoint),
                None => tracing::warn!(
                    "Skipping endpoint without name or id in profile '{}'",
                    profile.name()
                ),
            }
        }
        profile
    }

    /// Reads a profile and all of its endpoints.
    pub(crate) fn load(
        client: ServiceClient,
        resource_group: String,
        name: String,
    ) -> Operation<Self> {
        Operation::new(async move {
            let inner = ProfilesClient::new(client.clone())
                .get(&resource_group, &name)
                .await?;
            let endpoints = EndpointsClient::new(client.clone())
                .list_by_profile(&resource_group, &name)
                .collect_all()
                .await?;
            let id = Self::profile_id(&client, &resource_group, &name);
            Ok(Self::from_parts(client, id, inner, endpoints))
        })
    }

    fn put_endpoint(&mut self, name: String, inner: EndpointInner) {
        let id = self.resource.id().child("endpoints", name.as_str());
        let endpoint = Resource::new(id, inner, self.resource.client().clone());
        self.endpoints.insert(name, endpoint);
    }

    pub(crate) fn merge_endpoints(&mut self, results: ChildResults<Option<EndpointInner>>) {
        for (name, result) in results {
            match result {
                Some(inner) => self.put_endpoint(name, inner),
                None => {
                    self.endpoints.remove(&name);
                }
            }
        }
    }

    /// Returns the profile name.
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
    pub const fn inner(&self) -> &ProfileInner {
        self.resource.inner()
    }

    /// Returns the client bound to this profile.
    #[must_use]
    pub const fn client(&self) -> &ServiceClient {
        self.resource.client()
    }

    /// Returns the region name.
    #[must_use]
    pub fn region_name(&self) -> Option<&str> {
        self.inner().location.as_deref()
    }

    /// Returns the pricing tier.
    #[must_use]
    pub fn sku(&self) -> Option<SkuName> {
        self.inner().sku.map(|sku| sku.name)
    }

    /// Returns `true` for the Premium Verizon tier.
    #[must_use]
    pub fn is_premium_verizon(&self) -> bool {
        self.sku() == Some(SkuName::PremiumVerizon)
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.inner().tags
    }

    /// Returns the resource state (e.g. `Active`).
    #[must_use]
    pub fn resource_state(&self) -> Option<&str> {
        self.inner()
            .properties
            .as_ref()
            .and_then(|properties| properties.resource_state.as_deref())
    }

    /// Returns the endpoints keyed by name.
    #[must_use]
    pub const fn endpoints(&self) -> &BTreeMap<String, Endpoint> {
        &self.endpoints
    }

    /// Starts an update of this profile.
    pub fn update(&mut self) -> ProfileUpdate<'_> {
        ProfileUpdate::new(self)
    }
}

impl Refreshable for Profile {
    async fn refresh(&mut self) -> Result<(), ArmError> {
        let fresh = Self::load(
            self.client().clone(),
            self.resource_group_name().to_string(),
            self.name().to_string(),
        )
        .await?;
        tracing::debug!(
            "Refreshed profile '{}' with {} endpoint(s)",
            fresh.name(),
            fresh.endpoints.len()
        );
        *self = fresh;
        Ok(())
    }
}

impl Deref for Profile {
    type Target = ProfileInner;

    fn deref(&self) -> &Self::Target {
        self.resource.inner()
    }
}

/// Generates an endpoint name from an origin host that is not in `taken`.
///
/// Indexes are tried upward from `start`.
pub(crate) fn free_endpoint_name(
    origin_host: &str,
    start: usize,
    taken: impl Fn(&str) -> bool,
) -> String {
    let mut index = start;
    loop {
        let name = endpoint_name_for(origin_host, index);
        if !taken(&name) {
            return name;
        }
        index += 1;
    }
}

/// Generates an endpoint name from an origin host.
///
/// Dots become dashes, other characters outside `[a-z0-9-]` are dropped and
/// `index` is appended to keep names distinct within one builder.
pub(crate) fn endpoint_name_for(origin_host: &str, index: usize) -> String {
    let base: String = origin_host
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == '.' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(40)
        .collect();
    let base = base.trim_matches('-');
    if base.is_empty() {
        format!("endpoint-{index}")
    } else {
        format!("{base}-{index}")
    }
}

/// Rejects a staged endpoint without a name.
pub(crate) fn check_endpoints(
    pending: &PendingChildren<EndpointInner>,
) -> Result<(), ArmError> {
    check_child_names(pending, "endpointName", |action| match action {
        CommitAction::Create => "Endpoints.create",
        CommitAction::Update => "Endpoints.update",
        CommitAction::Delete => "Endpoints.delete",
    })
    .map_err(ArmError::from)
}

/// Submits the pending endpoints of a commit.
///
/// Created endpoints without a location get `location`. A write answered
/// without a body yields the value that was sent; a delete yields `None`.
pub(crate) async fn commit_endpoints(
    client: &ServiceClient,
    resource_group: &str,
    profile: &str,
    location: Option<&str>,
    pending: &PendingChildren<EndpointInner>,
) -> Result<ChildResults<Option<EndpointInner>>, CommitError> {
    let endpoints = EndpointsClient::new(client.clone());
    commit_children(profile, pending, |name, action| match action {
        PendingAction::Create(body) => {
            let mut sent = body.clone();
            if sent.location.is_none() {
                sent.location = location.map(ToString::to_string);
            }
            let operation = endpoints.create(resource_group, profile, name, &sent);
            operation.map(move |returned| Some(returned.unwrap_or(sent)))
        }
        PendingAction::Update(body) => {
            let sent = body.clone();
            endpoints
                .update(
                    resource_group,
                    profile,
                    name,
                    &EndpointUpdateParameters::from(body),
                )
                .map(move |returned| Some(returned.unwrap_or(sent)))
        }
        PendingAction::Delete => endpoints
            .delete(resource_group, profile, name)
            .map(|()| None),
    })
    .await
}

/// Staged changes to a [`Profile`].
///
/// Nothing is sent until [`apply`](Self::apply). If `apply` fails the staged
/// changes and the profile are left as they were, so it can be retried.
#[derive(Debug)]
#[must_use = "profile changes are sent only by apply()"]
pub struct ProfileUpdate<'a> {
    profile: &'a mut Profile,
    tags: BTreeMap<String, String>,
    endpoints: PendingChildren<EndpointInner>,
    errors: Vec<ValidationError>,
}

impl<'a> ProfileUpdate<'a> {
    fn new(profile: &'a mut Profile) -> Self {
        let tags = profile.tags().clone();
        Self {
            profile,
            tags,
            endpoints: PendingChildren::new(),
            errors: Vec::new(),
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

    /// Adds an endpoint with a generated name pulling from `origin_host`.
    pub fn with_new_endpoint(self, origin_host: &str) -> Self {
        let start = self.profile.endpoints.len() + self.endpoints.len() + 1;
        let name = free_endpoint_name(origin_host, start, |name| {
            self.profile.endpoints.contains_key(name) || self.endpoints.contains(name)
        });
        self.define_new_endpoint(name).with_origin(origin_host).attach()
    }

    /// Starts the definition of a new endpoint.
    pub fn define_new_endpoint(self, name: impl Into<String>) -> EndpointDefinition<Self, Blank> {
        EndpointDefinition::new(self, name)
    }

    /// Starts changes to an existing endpoint.
    ///
    /// An unknown name is reported by [`apply`](Self::apply) as
    /// [`ValidationError::UnknownChild`] before anything is sent.
    pub fn update_endpoint(mut self, name: &str) -> EndpointUpdate<'a> {
        let staged = match self.endpoints.get(name) {
            Some(PendingAction::Create(inner)) => Some((inner.clone(), true)),
            Some(PendingAction::Update(inner)) => Some((inner.clone(), false)),
            Some(PendingAction::Delete) | None => None,
        };
        let (inner, creating) = match staged {
            Some(staged) => staged,
            None => match self.profile.endpoints.get(name) {
                Some(endpoint) => (endpoint.inner().clone(), false),
                None => {
                    self.errors.push(ValidationError::UnknownChild {
                        kind: EndpointInner::KIND,
                        name: name.to_string(),
                        parent: self.profile.name().to_string(),
                    });
                    (EndpointInner::default(), false)
                }
            },
        };
        EndpointUpdate::new(self, name.to_string(), inner, creating)
    }

    /// Stages the removal of an endpoint.
    pub fn without_endpoint(mut self, name: impl Into<String>) -> Self {
        self.endpoints.insert(name, PendingAction::Delete);
        self
    }

    /// Returns the staged endpoint changes.
    #[must_use]
    pub const fn pending_endpoints(&self) -> &PendingChildren<EndpointInner> {
        &self.endpoints
    }

    /// Sends the staged changes: the profile PATCH first, then each endpoint
    /// change in the order it was staged.
    ///
    /// # Errors
    ///
    /// - [`ArmError::Validation`] if a staged change refers to an unknown
    ///   endpoint or has a blank name; nothing is sent
    /// - [`ArmError::Commit`] naming every failed call; if the profile call
    ///   failed no endpoint call was made
    pub async fn apply(&mut self) -> Result<&Profile, ArmError> {
        if let Some(error) = self.errors.first() {
            return Err(error.clone().into());
        }
        check_endpoints(&self.endpoints)?;

        let client = self.profile.client().clone();
        let resource_group = self.profile.resource_group_name().to_string();
        let name = self.profile.name().to_string();
        let parameters = ProfileUpdateParameters {
            tags: self.tags.clone(),
        };

        let returned = commit_parent(
            &name,
            ProfilesClient::new(client.clone()).update(&resource_group, &name, &parameters),
        )
        .await
        .map_err(parent_failure)?;

        let location = self.profile.inner().location.clone();
        let results = commit_endpoints(
            &client,
            &resource_group,
            &name,
            location.as_deref(),
            &self.endpoints,
        )
        .await?;

        let inner = returned.unwrap_or_else(|| ProfileInner {
            tags: self.tags.clone(),
            ..self.profile.inner().clone()
        });
        self.profile.resource.set_inner(inner);
        self.profile.merge_endpoints(results);
        self.endpoints.clear();
        tracing::debug!("Applied update of profile '{}'", name);
        Ok(&*self.profile)
    }
}

impl Attachable<EndpointInner> for ProfileUpdate<'_> {
    fn attach_child(&mut self, name: String, action: PendingAction<EndpointInner>) {
        self.endpoints.insert(name, action);
    }
}
