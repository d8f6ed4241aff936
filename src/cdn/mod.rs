//! Azure CDN profiles and endpoints.
//!
//! [`Profiles`] is the entry point. A profile is defined through the staged
//! [`ProfileDefinition`] and changed through [`ProfileUpdate`]; endpoints are
//! nested children of both and are committed after the profile call.
//!
//! # Example
//!
//! ```rust,ignore
//! use arm_fluent::cdn::Profiles;
//! use arm_fluent::Region;
//!
//! let profiles = Profiles::new(client);
//! let mut profile = profiles
//!     .define("profile1")
//!     .with_region(Region::us_central())
//!     .with_existing_resource_group("rg1")
//!     .with_premium_verizon_sku()
//!     .with_new_endpoint("supername.cloudapp.net")
//!     .create()
//!     .await?;
//!
//! profile
//!     .update()
//!     .with_tag("provider", "cdn")
//!     .update_endpoint("supername-cloudapp-net-1")
//!         .without_geo_filters()
//!         .with_http_allowed(true)
//!         .parent()
//!     .apply()
//!     .await?;
//! ```
//!
//! [`ProfilesClient`] and [`EndpointsClient`] expose the underlying
//! operations without the builders.

mod definition;
mod endpoint;
mod models;
mod operations;
mod profile;
mod profiles;

pub use crate::fluent::WithResourceGroup;
pub use definition::{ProfileDefinition, WithSku};
pub use endpoint::{Endpoint, EndpointDefinition, EndpointUpdate, DEFAULT_ORIGIN_NAME};
pub use models::{
    DeepCreatedOrigin, DeepCreatedOriginProperties, EndpointInner, EndpointProperties,
    EndpointPropertiesUpdateParameters, EndpointUpdateParameters, GeoFilter, GeoFilterAction,
    ProfileInner, ProfileProperties, ProfileUpdateParameters, QueryStringCachingBehavior, Sku,
    SkuName,
};
pub use operations::{
    EndpointsClient, ProfilesClient, API_VERSION, CREATE_RESPONSES, DELETE_RESPONSES,
    ENDPOINT_PATHS, PROFILE_PATHS, PROVIDER_NAMESPACE, UPDATE_RESPONSES,
};
pub use profile::{Profile, ProfileUpdate};
pub use profiles::Profiles;
