//! CDN endpoints: the child resource of a profile.
//!
//! Endpoints are defined inside a profile definition or update with
//! `define_new_endpoint(name)`, which returns an [`EndpointDefinition`] that
//! owns the parent builder until `attach()` hands it back:
//!
//! ```rust,ignore
//! let profile = profiles
//!     .define("profile1")
//!     .with_region(Region::us_central())
//!     .with_existing_resource_group("rg1")
//!     .with_standard_akamai_sku()
//!     .define_new_endpoint("ep1")
//!         .with_origin_named("origin1", "mylinuxapp.azurewebsites.net")
//!         .with_content_type_to_compress("text/plain")
//!         .with_geo_filter("/path/videos", GeoFilterAction::Block, "AR")
//!         .with_http_port(85)
//!         .attach()
//!     .create()
//!     .await?;
//! ```
//!
//! `attach()` only exists once an origin has been given, so an endpoint
//! without an origin cannot be attached.

use std::marker::PhantomData;

use crate::cdn::models::{
    DeepCreatedOrigin, DeepCreatedOriginProperties, EndpointInner, EndpointProperties, GeoFilter,
    GeoFilterAction, QueryStringCachingBehavior,
};
use crate::cdn::operations::EndpointsClient;
use crate::cdn::profile::ProfileUpdate;
use crate::fluent::{Attachable, Blank, PendingAction, WithAttach};
use crate::rest::{Operation, Resource, ResourceId, ResourceInner, ServiceClient, ValidationError};

/// Default name of an origin given without a name.
pub const DEFAULT_ORIGIN_NAME: &str = "origin";

/// A CDN endpoint bound to its identity.
pub type Endpoint = Resource<EndpointInner>;

impl ResourceInner for EndpointInner {
    const KIND: &'static str = "Endpoint";

    fn fetch(client: &ServiceClient, id: &ResourceId) -> Operation<Self> {
        match id.parent_name() {
            Some(profile) => EndpointsClient::new(client.clone()).get(
                id.resource_group_name(),
                profile,
                id.name(),
            ),
            None => Operation::failed(ValidationError::InvalidResourceId {
                id: id.to_string(),
                reason: "an endpoint id needs a parent profile",
            }),
        }
    }
}

impl Resource<EndpointInner> {
    /// Returns the public host name (`{name}.azureedge.net`).
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.inner().properties.host_name.as_deref()
    }

    /// Returns the host name of the first origin.
    #[must_use]
    pub fn origin_host_name(&self) -> Option<&str> {
        self.first_origin().map(|origin| origin.host_name.as_str())
    }

    /// Returns the HTTP port of the first origin.
    #[must_use]
    pub fn http_port(&self) -> Option<u16> {
        self.first_origin().and_then(|origin| origin.http_port)
    }

    /// Returns the HTTPS port of the first origin.
    #[must_use]
    pub fn https_port(&self) -> Option<u16> {
        self.first_origin().and_then(|origin| origin.https_port)
    }

    /// Returns the optimization scenario.
    #[must_use]
    pub fn optimization_type(&self) -> Option<&str> {
        self.inner().properties.optimization_type.as_deref()
    }

    /// Returns the host header sent to the origin.
    #[must_use]
    pub fn origin_host_header(&self) -> Option<&str> {
        self.inner().properties.origin_host_header.as_deref()
    }

    /// Returns the path prefix on the origin.
    #[must_use]
    pub fn origin_path(&self) -> Option<&str> {
        self.inner().properties.origin_path.as_deref()
    }

    /// Returns whether HTTP traffic is allowed.
    #[must_use]
    pub fn is_http_allowed(&self) -> bool {
        self.inner().properties.is_http_allowed.unwrap_or(false)
    }

    /// Returns whether HTTPS traffic is allowed.
    #[must_use]
    pub fn is_https_allowed(&self) -> bool {
        self.inner().properties.is_https_allowed.unwrap_or(false)
    }

    /// Returns whether edge compression is enabled.
    #[must_use]
    pub fn is_compression_enabled(&self) -> bool {
        self.inner().properties.is_compression_enabled.unwrap_or(false)
    }

    /// Returns the MIME types compressed at the edge.
    #[must_use]
    pub fn content_types_to_compress(&self) -> &[String] {
        self.inner()
            .properties
            .content_types_to_compress
            .as_deref()
            .unwrap_or_default()
    }

    /// Returns the query string caching mode.
    #[must_use]
    pub fn query_string_caching_behavior(&self) -> Option<QueryStringCachingBehavior> {
        self.inner().properties.query_string_caching_behavior
    }

    /// Returns the geo filters.
    #[must_use]
    pub fn geo_filters(&self) -> &[GeoFilter] {
        self.inner().properties.geo_filters.as_deref().unwrap_or_default()
    }

    /// Returns the resource state (e.g. `Running`).
    #[must_use]
    pub fn resource_state(&self) -> Option<&str> {
        self.inner().properties.resource_state.as_deref()
    }

    fn first_origin(&self) -> Option<&DeepCreatedOriginProperties> {
        self.inner()
            .properties
            .origins
            .first()
            .and_then(|origin| origin.properties.as_ref())
    }
}

fn first_origin_mut(
    properties: &mut EndpointProperties,
) -> Option<&mut DeepCreatedOriginProperties> {
    properties
        .origins
        .first_mut()
        .and_then(|origin| origin.properties.as_mut())
}

fn add_content_type(properties: &mut EndpointProperties, content_type: String) {
    let types = properties.content_types_to_compress.get_or_insert_with(Vec::new);
    if !types.contains(&content_type) {
        types.push(content_type);
    }
}

fn add_geo_filter(
    properties: &mut EndpointProperties,
    relative_path: String,
    action: GeoFilterAction,
    country_code: String,
) {
    let filters = properties.geo_filters.get_or_insert_with(Vec::new);
    match filters
        .iter_mut()
        .find(|filter| filter.relative_path == relative_path && filter.action == action)
    {
        Some(filter) => {
            if !filter.country_codes.contains(&country_code) {
                filter.country_codes.push(country_code);
            }
        }
        None => filters.push(GeoFilter {
            relative_path,
            action,
            country_codes: vec![country_code],
        }),
    }
}

/// Staged definition of a new endpoint, owning its parent builder `P`.
#[derive(Debug)]
#[must_use = "an endpoint definition does nothing until attached"]
pub struct EndpointDefinition<P, S> {
    parent: P,
    name: String,
    inner: EndpointInner,
    _stage: PhantomData<S>,
}

impl<P: Attachable<EndpointInner>> EndpointDefinition<P, Blank> {
    pub(crate) fn new(parent: P, name: impl Into<String>) -> Self {
        Self {
            parent,
            name: name.into(),
            inner: EndpointInner::default(),
            _stage: PhantomData,
        }
    }

    /// Sets the origin host, using the default origin name.
    pub fn with_origin(self, host_name: impl Into<String>) -> EndpointDefinition<P, WithAttach> {
        self.with_origin_named(DEFAULT_ORIGIN_NAME, host_name)
    }

    /// Sets a named origin host.
    pub fn with_origin_named(
        mut self,
        origin_name: impl Into<String>,
        host_name: impl Into<String>,
    ) -> EndpointDefinition<P, WithAttach> {
        self.inner.properties.origins = vec![DeepCreatedOrigin {
            name: origin_name.into(),
            properties: Some(DeepCreatedOriginProperties {
                host_name: host_name.into(),
                http_port: None,
                https_port: None,
            }),
        }];
        EndpointDefinition {
            parent: self.parent,
            name: self.name,
            inner: self.inner,
            _stage: PhantomData,
        }
    }
}

impl<P: Attachable<EndpointInner>> EndpointDefinition<P, WithAttach> {
    /// Sets the host header sent to the origin.
    pub fn with_origin_host_header(mut self, host_header: impl Into<String>) -> Self {
        self.inner.properties.origin_host_header = Some(host_header.into());
        self
    }

    /// Sets the path prefix on the origin.
    pub fn with_origin_path(mut self, path: impl Into<String>) -> Self {
        self.inner.properties.origin_path = Some(path.into());
        self
    }

    /// Allows or forbids HTTP traffic.
    pub fn with_http_allowed(mut self, allowed: bool) -> Self {
        self.inner.properties.is_http_allowed = Some(allowed);
        self
    }

    /// Allows or forbids HTTPS traffic.
    pub fn with_https_allowed(mut self, allowed: bool) -> Self {
        self.inner.properties.is_https_allowed = Some(allowed);
        self
    }

    /// Sets the HTTP port of the origin.
    pub fn with_http_port(mut self, port: u16) -> Self {
        if let Some(origin) = first_origin_mut(&mut self.inner.properties) {
            origin.http_port = Some(port);
        }
        self
    }

    /// Sets the HTTPS port of the origin.
    pub fn with_https_port(mut self, port: u16) -> Self {
        if let Some(origin) = first_origin_mut(&mut self.inner.properties) {
            origin.https_port = Some(port);
        }
        self
    }

    /// Adds a MIME type to compress.
    pub fn with_content_type_to_compress(mut self, content_type: impl Into<String>) -> Self {
        add_content_type(&mut self.inner.properties, content_type.into());
        self
    }

    /// Enables or disables edge compression.
    pub fn with_compression_enabled(mut self, enabled: bool) -> Self {
        self.inner.properties.is_compression_enabled = Some(enabled);
        self
    }

    /// Sets the query string caching mode.
    pub fn with_query_string_caching_behavior(
        mut self,
        behavior: QueryStringCachingBehavior,
    ) -> Self {
        self.inner.properties.query_string_caching_behavior = Some(behavior);
        self
    }

    /// Adds a country to the geo filter of `relative_path`.
    pub fn with_geo_filter(
        mut self,
        relative_path: impl Into<String>,
        action: GeoFilterAction,
        country_code: impl Into<String>,
    ) -> Self {
        add_geo_filter(
            &mut self.inner.properties,
            relative_path.into(),
            action,
            country_code.into(),
        );
        self
    }

    /// Stages the endpoint in the parent and returns the parent.
    pub fn attach(mut self) -> P {
        self.parent
            .attach_child(self.name, PendingAction::Create(self.inner));
        self.parent
    }
}

/// Staged changes to an existing endpoint, owning the profile update.
#[derive(Debug)]
#[must_use = "endpoint changes are staged only when parent() is called"]
pub struct EndpointUpdate<'a> {
    parent: ProfileUpdate<'a>,
    name: String,
    inner: EndpointInner,
    creating: bool,
}

impl<'a> EndpointUpdate<'a> {
    pub(crate) fn new(
        parent: ProfileUpdate<'a>,
        name: String,
        inner: EndpointInner,
        creating: bool,
    ) -> Self {
        Self {
            parent,
            name,
            inner,
            creating,
        }
    }

    /// Sets the host header sent to the origin.
    pub fn with_origin_host_header(mut self, host_header: impl Into<String>) -> Self {
        self.inner.properties.origin_host_header = Some(host_header.into());
        self
    }

    /// Sets the path prefix on the origin.
    pub fn with_origin_path(mut self, path: impl Into<String>) -> Self {
        self.inner.properties.origin_path = Some(path.into());
        self
    }

    /// Allows or forbids HTTP traffic.
    pub fn with_http_allowed(mut self, allowed: bool) -> Self {
        self.inner.properties.is_http_allowed = Some(allowed);
        self
    }

    /// Allows or forbids HTTPS traffic.
    pub fn with_https_allowed(mut self, allowed: bool) -> Self {
        self.inner.properties.is_https_allowed = Some(allowed);
        self
    }

    /// Adds a MIME type to compress.
    pub fn with_content_type_to_compress(mut self, content_type: impl Into<String>) -> Self {
        add_content_type(&mut self.inner.properties, content_type.into());
        self
    }

    /// Removes a MIME type from the compressed set.
    pub fn without_content_type_to_compress(mut self, content_type: &str) -> Self {
        if let Some(types) = self.inner.properties.content_types_to_compress.as_mut() {
            types.retain(|existing| existing != content_type);
        }
        self
    }

    /// Enables or disables edge compression.
    pub fn with_compression_enabled(mut self, enabled: bool) -> Self {
        self.inner.properties.is_compression_enabled = Some(enabled);
        self
    }

    /// Sets the query string caching mode.
    pub fn with_query_string_caching_behavior(
        mut self,
        behavior: QueryStringCachingBehavior,
    ) -> Self {
        self.inner.properties.query_string_caching_behavior = Some(behavior);
        self
    }

    /// Adds a country to the geo filter of `relative_path`.
    pub fn with_geo_filter(
        mut self,
        relative_path: impl Into<String>,
        action: GeoFilterAction,
        country_code: impl Into<String>,
    ) -> Self {
        add_geo_filter(
            &mut self.inner.properties,
            relative_path.into(),
            action,
            country_code.into(),
        );
        self
    }

    /// Removes every geo filter.
    pub fn without_geo_filters(mut self) -> Self {
        self.inner.properties.geo_filters = Some(Vec::new());
        self
    }

    /// Sets a tag on the endpoint.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.tags.insert(key.into(), value.into());
        self
    }

    /// Stages the changes and returns the profile update.
    pub fn parent(mut self) -> ProfileUpdate<'a> {
        let action = if self.creating {
            PendingAction::Create(self.inner)
        } else {
            PendingAction::Update(self.inner)
        };
        self.parent.attach_child(self.name, action);
        self.parent
    }
}
