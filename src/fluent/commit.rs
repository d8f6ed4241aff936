//! Commit sequencing for builders with pending children.
//!
//! A commit issues the parent call first. If it fails, no child call is
//! attempted. Otherwise every pending child is submitted in insertion order;
//! a failing child does not stop the remaining ones, and all failures are
//! collected into one [`CommitError`].

use crate::fluent::attach::{PendingAction, PendingChildren};
use crate::rest::{
    ArmError, CommitAction, CommitError, Constituent, ConstituentFailure, Operation,
    ValidationError,
};

/// Successful child calls of a commit, in the order they were issued.
pub type ChildResults<R> = Vec<(String, R)>;

/// Runs the parent call of a commit.
///
/// # Errors
///
/// Returns a [`CommitError`] holding only the parent's failure.
pub async fn commit_parent<T: Send + 'static>(
    resource: &str,
    operation: Operation<T>,
) -> Result<T, CommitError> {
    operation.await.map_err(|error| {
        tracing::warn!("Commit of '{}' failed on the parent call: {}", resource, error);
        CommitError {
            resource: resource.to_string(),
            failures: vec![ConstituentFailure {
                constituent: Constituent::Parent {
                    name: resource.to_string(),
                },
                error,
            }],
        }
    })
}

/// Converts a failed parent commit into an [`ArmError`].
///
/// A parent rejected before dispatch surfaces as its validation error;
/// anything else stays a [`ArmError::Commit`].
#[must_use]
pub fn parent_failure(mut error: CommitError) -> ArmError {
    if error.failures.len() == 1 && error.failures[0].error.is_validation() {
        return error.failures.remove(0).error;
    }
    ArmError::Commit(error)
}

/// Checks that every pending child has a name before anything is sent.
///
/// `operation` names the child call for each action; a blank name is
/// reported as the missing `parameter` of that call.
///
/// # Errors
///
/// Returns [`ValidationError::MissingParameter`] for the first blank name.
pub fn check_child_names<C>(
    pending: &PendingChildren<C>,
    parameter: &str,
    operation: impl Fn(CommitAction) -> &'static str,
) -> Result<(), ValidationError> {
    match pending.iter().find(|(name, _)| name.trim().is_empty()) {
        Some((_, action)) => Err(ValidationError::MissingParameter {
            operation: operation(action.commit_action()),
            parameter: parameter.to_string(),
        }),
        None => Ok(()),
    }
}

/// Submits every pending child in insertion order.
///
/// `call` builds the operation for one child. Returns the results of the
/// successful calls, or every failure if at least one call failed.
///
/// # Errors
///
/// Returns a [`CommitError`] naming each failed child.
pub async fn commit_children<C, R, F>(
    resource: &str,
    pending: &PendingChildren<C>,
    mut call: F,
) -> Result<ChildResults<R>, CommitError>
where
    R: Send + 'static,
    F: FnMut(&str, &PendingAction<C>) -> Operation<R>,
{
    let mut results = Vec::with_capacity(pending.len());
    let mut failures = Vec::new();

    for (name, action) in pending.iter() {
        match call(name, action).await {
            Ok(result) => results.push((name.to_string(), result)),
            Err(error) => {
                tracing::warn!(
                    "Commit of '{}': {} of child '{}' failed: {}",
                    resource,
                    action.commit_action(),
                    name,
                    error
                );
                failures.push(ConstituentFailure {
                    constituent: Constituent::Child {
                        name: name.to_string(),
                        action: action.commit_action(),
                    },
                    error,
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(results)
    } else {
        Err(CommitError {
            resource: resource.to_string(),
            failures,
        })
    }
}
