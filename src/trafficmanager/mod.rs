//! Azure Traffic Manager endpoints.
//!
//! Only the endpoint operations are exposed; endpoints are addressed by
//! resource group, profile, [`EndpointType`] and name.
//!
//! ```rust,ignore
//! use arm_fluent::trafficmanager::{EndpointType, EndpointsClient};
//!
//! let endpoints = EndpointsClient::new(client);
//! let endpoint = endpoints
//!     .get("rg1", "profile1", EndpointType::ExternalEndpoints, "e1")
//!     .await?;
//! ```

mod endpoints;
mod models;

pub use endpoints::{
    EndpointsClient, API_VERSION, CREATE_OR_UPDATE_RESPONSES, DELETE_RESPONSES, PATHS,
};
pub use models::{EndpointInner, EndpointProperties, EndpointStatus, EndpointType};
