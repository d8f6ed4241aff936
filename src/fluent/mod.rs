//! Building blocks of the staged fluent builders.
//!
//! Builders are type-state machines: each stage is a zero-sized marker type
//! and the builder struct is generic over it, so a method exists only on the
//! stages where it is legal. Required setters move the builder to the next
//! stage; optional setters return the same stage.
//!
//! Nested children are defined with a child builder that takes its parent by
//! value. The child's `attach()` stages it in the parent's
//! [`PendingChildren`] through [`Attachable`] and returns the parent. Nothing
//! is sent until the parent's terminal operation (`create()` or `apply()`),
//! which issues the calls through [`commit_parent`] and [`commit_children`].
//!
//! # Example
//!
//! ```rust,ignore
//! let profile = Profiles::new(client)
//!     .define("profile1")
//!     .with_region(Region::us_central())
//!     .with_existing_resource_group("rg1")
//!     .with_standard_akamai_sku()
//!     .define_new_endpoint("ep1")
//!         .with_origin("origin.example.com")
//!         .with_http_port(8080)
//!         .attach()
//!     .create()
//!     .await?;
//! ```

mod attach;
mod commit;

pub use attach::{Attachable, PendingAction, PendingChildren};
pub use commit::{
    check_child_names, commit_children, commit_parent, parent_failure, ChildResults,
};

/// Marker for a builder with no required field set yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blank;

/// Marker for a top-level definition whose region is set and which needs a
/// resource group next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithResourceGroup;

/// Marker for a child builder ready to be attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithAttach;

/// Marker for a parent definition ready to be created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithCreate;
