//! # ARM Fluent SDK
//!
//! A Rust SDK for Azure Resource Manager style REST APIs, providing
//! type-safe configuration, a uniform async request pipeline and staged
//! fluent builders for defining and updating resources together with their
//! nested children.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ArmConfig`] and [`ArmConfigBuilder`]
//! - Validated newtypes for subscription ids, base URLs, regions and api-versions
//! - Bearer token injection through the [`TokenCredential`] trait
//! - An async request pipeline ([`ServiceClient`]) with per-operation status
//!   tables, typed decoding and lazy paging
//! - Deferred operations usable awaited, blocking or with a callback
//! - Staged builders whose children are committed after their parent
//! - Resource wrappers with identity accessors and all-or-nothing refresh
//!
//! ## Quick Start
//!
//! ```rust
//! use arm_fluent::{ArmConfig, SubscriptionId};
//!
//! let config = ArmConfig::builder()
//!     .subscription_id(SubscriptionId::new("00000000-0000-0000-0000-000000000000").unwrap())
//!     .accept_language("en-US")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://management.azure.com");
//! ```
//!
//! ## Defining Resources
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use arm_fluent::{ArmConfig, Region, ServiceClient, StaticTokenCredential, SubscriptionId};
//! use arm_fluent::cdn::Profiles;
//!
//! let config = ArmConfig::builder()
//!     .subscription_id(SubscriptionId::new("my-subscription")?)
//!     .build()?;
//! let client = ServiceClient::new(config, Arc::new(StaticTokenCredential::new(token)));
//!
//! let profile = Profiles::new(client)
//!     .define("profile1")
//!     .with_region(Region::us_central())
//!     .with_existing_resource_group("rg1")
//!     .with_standard_akamai_sku()
//!     .define_new_endpoint("ep1")
//!         .with_origin("origin.example.com")
//!         .attach()
//!     .create()
//!     .await?;
//! ```
//!
//! ## Invocation Forms
//!
//! Every operation returns an [`rest::Operation`] (or [`rest::PagedOperation`]
//! for collections). Nothing is sent until it is consumed:
//!
//! ```rust,ignore
//! // Awaited
//! let endpoint = endpoints.get("rg1", "profile1", "ep1").await?;
//!
//! // Blocking, outside any Tokio runtime
//! let endpoint = endpoints.get("rg1", "profile1", "ep1").blocking()?;
//!
//! // With a callback; the returned handle can cancel the call
//! let call = endpoints
//!     .get("rg1", "profile1", "ep1")
//!     .subscribe(|result| println!("{result:?}"));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Missing parameters are rejected before any request
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No hidden retries**: Every failure is surfaced to the caller

pub mod appservice;
pub mod auth;
pub mod cdn;
pub mod clients;
pub mod config;
pub mod error;
pub mod fluent;
pub mod rest;
pub mod sql;
pub mod trafficmanager;

// Re-export public types at crate root for convenience
pub use auth::{StaticTokenCredential, TokenCredential};
pub use config::{ApiVersion, ArmConfig, ArmConfigBuilder, BaseUrl, Region, SubscriptionId};
pub use error::ConfigError;

// Re-export pipeline types
pub use rest::{ArmError, Operation, PagedOperation, ServiceClient, ServiceResponse};
