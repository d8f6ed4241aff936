//! HTTP client types for management API communication.
//!
//! This module provides the transport layer underneath the request pipeline.
//! It builds URLs and headers, attaches the bearer token and dispatches
//! requests through a pluggable transport. It does not interpret status codes
//! and never retries.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: Joins configuration, credential and transport
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: Status, headers and raw body of a response
//! - [`HttpMethod`]: Supported HTTP methods (GET, PUT, PATCH, DELETE, POST)
//! - [`HttpTransport`]: The transport seam, with [`ReqwestTransport`] as default
//! - [`PreparedRequest`]: What a transport receives
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use arm_fluent::clients::{HttpClient, HttpMethod, HttpRequest};
//! use arm_fluent::{ArmConfig, StaticTokenCredential, SubscriptionId};
//!
//! let config = ArmConfig::builder()
//!     .subscription_id(SubscriptionId::new("my-subscription")?)
//!     .build()?;
//! let client = HttpClient::new(config, Arc::new(StaticTokenCredential::new("token")));
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "subscriptions/my-subscription/resourceGroups")
//!     .query_param("api-version", "2016-09-01")
//!     .build()?;
//!
//! let response = client.request(request).await?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{HttpError, InvalidHttpRequestError, TransportError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, CORRELATION_ID_HEADER, REQUEST_ID_HEADER};
pub use transport::{HttpTransport, PreparedRequest, ReqwestTransport};
