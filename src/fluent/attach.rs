//! Pending child sets and the attach contract.

use crate::rest::CommitAction;

/// What a commit will do for one child.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction<C> {
    /// Create the child from this value.
    Create(C),
    /// Update the child to this value.
    Update(C),
    /// Delete the child.
    Delete,
}

impl<C> PendingAction<C> {
    /// Returns the commit action this entry performs.
    #[must_use]
    pub const fn commit_action(&self) -> CommitAction {
        match self {
            Self::Create(_) => CommitAction::Create,
            Self::Update(_) => CommitAction::Update,
            Self::Delete => CommitAction::Delete,
        }
    }

    /// Returns the staged value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&C> {
        match self {
            Self::Create(value) | Self::Update(value) => Some(value),
            Self::Delete => None,
        }
    }
}

/// Ordered map from child name to its pending action.
///
/// Iteration follows insertion order. Staging a name again replaces its
/// action in place, so the original position is kept.
///
/// # Example
///
/// ```rust
/// use arm_fluent::fluent::{PendingAction, PendingChildren};
///
/// let mut pending = PendingChildren::new();
/// pending.insert("b", PendingAction::Create(1));
/// pending.insert("a", PendingAction::Create(2));
/// pending.insert("b", PendingAction::Update(3));
///
/// assert_eq!(pending.names(), vec!["b", "a"]);
/// assert_eq!(pending.get("b"), Some(&PendingAction::Update(3)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChildren<C> {
    entries: Vec<(String, PendingAction<C>)>,
}

impl<C> Default for PendingChildren<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C> PendingChildren<C> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages `action` for `name`, replacing any earlier action for that name.
    pub fn insert(&mut self, name: impl Into<String>, action: PendingAction<C>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = action,
            None => self.entries.push((name, action)),
        }
    }

    /// Returns the staged action for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PendingAction<C>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, action)| action)
    }

    /// Returns a mutable reference to the staged action for `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut PendingAction<C>> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, action)| action)
    }

    /// Returns `true` if `name` has a staged action.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of staged children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, action)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PendingAction<C>)> {
        self.entries
            .iter()
            .map(|(name, action)| (name.as_str(), action))
    }

    /// Returns the staged names in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Drops every staged action.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A parent stage that can receive attached children of type `C`.
///
/// A child builder owns its parent while it is being configured and hands
/// it back from `attach()`; this is the only way it mutates the parent.
pub trait Attachable<C> {
    /// Appends a child to the parent's pending set.
    fn attach_child(&mut self, name: String, action: PendingAction<C>);
}
