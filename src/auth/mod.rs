//! Authentication collaborators for the ARM fluent SDK.
//!
//! The SDK does not acquire or refresh credentials itself. Every request asks
//! a [`TokenCredential`] for a bearer token and sends it in the
//! `Authorization` header; how the token is obtained is up to the
//! implementation.
//!
//! # Overview
//!
//! - [`TokenCredential`]: Async provider of bearer tokens
//! - [`AccessToken`]: A bearer token value
//! - [`StaticTokenCredential`]: A credential that always returns the same token
//! - [`CredentialError`]: Failure to obtain a token
//!
//! # Example
//!
//! ```rust
//! use arm_fluent::{StaticTokenCredential, TokenCredential};
//!
//! # tokio_test::block_on(async {
//! let credential = StaticTokenCredential::new("my-token");
//! let token = credential
//!     .get_token("https://management.azure.com/.default")
//!     .await
//!     .unwrap();
//! assert_eq!(token.secret(), "my-token");
//! # });
//! ```

mod credential;

pub use credential::{AccessToken, CredentialError, StaticTokenCredential, TokenCredential};
