//! Remote identity of a resource.
//!
//! A [`ResourceId`] renders to and parses from the canonical id string:
//!
//! ```text
//! /subscriptions/{sub}/resourceGroups/{rg}/providers/{ns}/{type}/{name}[/{childType}/{childName}]*
//! ```
//!
//! The fixed keys (`subscriptions`, `resourceGroups`, `providers`) are matched
//! case-insensitively when parsing; values keep their case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::rest::errors::ValidationError;

/// The immutable identity of a resource.
///
/// # Example
///
/// ```rust
/// use arm_fluent::rest::ResourceId;
///
/// let id: ResourceId = "/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.Cdn/profiles/p1/endpoints/e1"
///     .parse()
///     .unwrap();
///
/// assert_eq!(id.name(), "e1");
/// assert_eq!(id.parent_name(), Some("p1"));
/// assert_eq!(id.resource_group_name(), "rg1");
/// assert_eq!(id.full_resource_type(), "Microsoft.Cdn/profiles/endpoints");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    subscription_id: String,
    resource_group: String,
    provider_namespace: String,
    parents: Vec<(String, String)>,
    resource_type: String,
    name: String,
}

impl ResourceId {
    /// Creates the id of a top-level resource.
    #[must_use]
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        provider_namespace: impl Into<String>,
        resource_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            provider_namespace: provider_namespace.into(),
            parents: Vec::new(),
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// Returns the id of a child of this resource.
    #[must_use]
    pub fn child(&self, resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        let mut parents = self.parents.clone();
        parents.push((self.resource_type.clone(), self.name.clone()));
        Self {
            subscription_id: self.subscription_id.clone(),
            resource_group: self.resource_group.clone(),
            provider_namespace: self.provider_namespace.clone(),
            parents,
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// Returns the id of the direct parent, if this is a child resource.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (parent_parents, (resource_type, name)) = match self.parents.split_last() {
            Some((last, rest)) => (rest.to_vec(), last.clone()),
            None => return None,
        };
        Some(Self {
            subscription_id: self.subscription_id.clone(),
            resource_group: self.resource_group.clone(),
            provider_namespace: self.provider_namespace.clone(),
            parents: parent_parents,
            resource_type,
            name,
        })
    }

    /// Parses a canonical id string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidResourceId`] if the string does not
    /// follow the canonical layout.
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &'static str| ValidationError::InvalidResourceId {
            id: id.to_string(),
            reason,
        };

        let trimmed = id.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Err(invalid("must start with '/'"));
        };
        let segments: Vec<&str> = rest.trim_end_matches('/').split('/').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(invalid("contains an empty segment"));
        }

        let expect_key = |index: usize, key: &str, reason: &'static str| {
            segments
                .get(index)
                .filter(|segment| segment.eq_ignore_ascii_case(key))
                .map(|_| ())
                .ok_or_else(|| invalid(reason))
        };

        expect_key(0, "subscriptions", "missing 'subscriptions' segment")?;
        expect_key(2, "resourceGroups", "missing 'resourceGroups' segment")?;
        expect_key(4, "providers", "missing 'providers' segment")?;

        if segments.len() < 8 {
            return Err(invalid("missing resource type or name"));
        }
        let chain = &segments[6..];
        if chain.len() % 2 != 0 {
            return Err(invalid("resource type without a name"));
        }

        let mut pairs: Vec<(String, String)> = chain
            .chunks(2)
            .map(|pair| (pair[0].to_string(), pair[1].to_string()))
            .collect();
        let Some((resource_type, name)) = pairs.pop() else {
            return Err(invalid("missing resource type or name"));
        };

        Ok(Self {
            subscription_id: segments[1].to_string(),
            resource_group: segments[3].to_string(),
            provider_namespace: segments[5].to_string(),
            parents: pairs,
            resource_type,
            name,
        })
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name of the direct parent, if any.
    #[must_use]
    pub fn parent_name(&self) -> Option<&str> {
        self.parents.last().map(|(_, name)| name.as_str())
    }

    /// Returns the resource group name.
    #[must_use]
    pub fn resource_group_name(&self) -> &str {
        &self.resource_group
    }

    /// Returns the subscription id.
    #[must_use]
    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// Returns the provider namespace (e.g. `Microsoft.Cdn`).
    #[must_use]
    pub fn provider_namespace(&self) -> &str {
        &self.provider_namespace
    }

    /// Returns the last type segment (e.g. `endpoints`).
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the `(type, name)` chain of ancestors, outermost first.
    #[must_use]
    pub fn parents(&self) -> &[(String, String)] {
        &self.parents
    }

    /// Returns the namespace-qualified type (e.g. `Microsoft.Cdn/profiles/endpoints`).
    #[must_use]
    pub fn full_resource_type(&self) -> String {
        let mut full = self.provider_namespace.clone();
        for (resource_type, _) in &self.parents {
            full.push('/');
            full.push_str(resource_type);
        }
        full.push('/');
        full.push_str(&self.resource_type);
        full
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{}",
            self.subscription_id, self.resource_group, self.provider_namespace
        )?;
        for (resource_type, name) in &self.parents {
            write!(f, "/{resource_type}/{name}")?;
        }
        write!(f, "/{}/{}", self.resource_type, self.name)
    }
}

impl FromStr for ResourceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// Verify ResourceId is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceId>();
};
