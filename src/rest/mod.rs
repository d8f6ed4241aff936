//! The generic request/response pipeline.
//!
//! This module provides everything a resource kind needs to talk to the
//! management endpoint:
//!
//! - **[`ServiceClient`]** and **[`RequestSpec`]**: parameter validation, path
//!   and query construction, dispatch
//! - **[`ResponseTable`]**: the per-operation status table of the wire codec
//! - **[`Operation<T>`]**: one deferred call with its deferred, callback and
//!   blocking invocation forms
//! - **[`PagedOperation<T>`]**: lazy `nextLink` pagination as a `Stream`
//! - **[`Resource<T>`]** and **[`ResourceId`]**: resource wrappers bound to
//!   their remote identity, with [`Refreshable::refresh`]
//! - **[`ArmError`]**: the error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use arm_fluent::rest::{RequestSpec, ResponseTable, ServiceClient};
//! use futures::TryStreamExt;
//!
//! let client = ServiceClient::new(config, credential);
//!
//! // Deferred form
//! let profile = client.send::<ProfileInner>(get_spec, ResponseTable::OK).await?;
//!
//! // Paged listing, fetched lazily
//! let mut endpoints = client.list::<EndpointInner>(list_spec, ResponseTable::OK).into_stream();
//! while let Some(endpoint) = endpoints.try_next().await? {
//!     println!("{:?}", endpoint.name);
//! }
//!
//! // Blocking form (outside any async runtime)
//! let profile = client.send::<ProfileInner>(get_spec, ResponseTable::OK).blocking()?;
//! ```

mod client;
mod codec;
mod errors;
mod operation;
mod pager;
mod path;
mod resource;
mod resource_id;
mod response;

// Public exports
pub use client::{RequestSpec, ServiceClient, SUBSCRIPTION_PARAM};
pub use codec::{encode_body, require_body, ResponseShape, ResponseTable};
pub use errors::{
    ArmError, CloudError, CloudErrorDetail, CloudErrorKind, CommitAction, CommitError,
    Constituent, ConstituentFailure, ValidationError,
};
pub use operation::{Operation, ServiceCall};
pub use pager::{Page, PagedOperation};
pub use path::{build_path, get_path, template_params, ResourceOperation, ResourcePath};
pub use resource::{Refreshable, Resource, ResourceInner};
pub use resource_id::ResourceId;
pub use response::ServiceResponse;
