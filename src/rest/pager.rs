//! Lazy pagination over `value` + `nextLink` list responses.
//!
//! A [`PagedOperation<T>`] holds the first page request and a way to fetch a
//! continuation link. Pages are requested one at a time, only when the items
//! of the previous page have been consumed, and the link is followed
//! verbatim. The sequence ends at the first page without a link. It is not
//! restartable: re-invoke the list operation for a fresh sequence.

use std::fmt;
use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};

use crate::rest::errors::ArmError;
use crate::rest::operation::{Operation, ServiceCall};

/// One page of a list response.
///
/// # Example
///
/// ```rust
/// use arm_fluent::rest::Page;
///
/// let page: Page<u32> = serde_json::from_str(r#"{"value":[1,2],"nextLink":"https://x/next"}"#).unwrap();
/// assert_eq!(page.value, vec![1, 2]);
/// assert!(page.has_next());
///
/// let last: Page<u32> = serde_json::from_str(r#"{"value":[3],"nextLink":null}"#).unwrap();
/// assert!(!last.has_next());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items of this page.
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    /// Link to the next page; absent or null on the last page.
    #[serde(rename = "nextLink", default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

impl<T> Page<T> {
    /// Returns `true` if a non-empty continuation link is present.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next_link().is_some()
    }

    /// Returns the continuation link, ignoring blank values.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.next_link
            .as_deref()
            .filter(|link| !link.trim().is_empty())
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            next_link: None,
        }
    }
}

type NextPage<T> = Arc<dyn Fn(String) -> Operation<Page<T>> + Send + Sync>;

enum Cursor<T> {
    First(Operation<Page<T>>),
    Next(String),
    Done,
}

/// A lazily paginated list operation.
///
/// Like [`Operation`], it is consumed by whichever form drives it:
/// [`into_stream`](Self::into_stream) / [`pages`](Self::pages) (deferred),
/// [`subscribe`](Self::subscribe) (callback) or
/// [`blocking`](Self::blocking).
#[must_use = "list operations do nothing unless consumed"]
pub struct PagedOperation<T> {
    first: Operation<Page<T>>,
    next: NextPage<T>,
}

impl<T: Send + 'static> PagedOperation<T> {
    /// Creates a paged operation from the first page request and a
    /// continuation fetcher.
    pub fn new<F>(first: Operation<Page<T>>, next: F) -> Self
    where
        F: Fn(String) -> Operation<Page<T>> + Send + Sync + 'static,
    {
        Self {
            first,
            next: Arc::new(next),
        }
    }

    /// A paged operation that fails with `error` without doing any I/O.
    pub fn failed(error: impl Into<ArmError>) -> Self {
        let error = error.into();
        Self::new(Operation::failed(error), |_| {
            Operation::failed(ArmError::Runtime {
                message: "continuation requested after a failed first page".to_string(),
            })
        })
    }

    /// Streams whole pages. A failed request ends the stream after its error.
    pub fn pages(self) -> BoxStream<'static, Result<Page<T>, ArmError>> {
        let next = self.next;
        stream::try_unfold(Cursor::First(self.first), move |cursor| {
            let next = Arc::clone(&next);
            async move {
                let page = match cursor {
                    Cursor::First(operation) => operation.await?,
                    Cursor::Next(link) => {
                        tracing::debug!("Following next link {}", link);
                        (next.as_ref())(link).await?
                    }
                    Cursor::Done => return Ok(None),
                };
                let cursor = page
                    .next_link()
                    .map_or(Cursor::Done, |link| Cursor::Next(link.to_string()));
                Ok(Some((page, cursor)))
            }
        })
        .boxed()
    }

    /// Streams the flattened items of all pages, in order.
    pub fn into_stream(self) -> BoxStream<'static, Result<T, ArmError>> {
        self.pages()
            .map_ok(|page| stream::iter(page.value.into_iter().map(Ok::<T, ArmError>)))
            .try_flatten()
            .boxed()
    }

    /// Collects every item of every page.
    pub fn collect_all(self) -> Operation<Vec<T>> {
        let items = self.into_stream();
        Operation::new(items.try_collect())
    }

    /// Callback form: collects all items on the current runtime.
    pub fn subscribe<F>(self, callback: F) -> ServiceCall
    where
        F: FnOnce(Result<Vec<T>, ArmError>) + Send + 'static,
    {
        self.collect_all().subscribe(callback)
    }

    /// Blocking form: collects all items on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns the first error of any page request.
    pub fn blocking(self) -> Result<Vec<T>, ArmError> {
        self.collect_all().blocking()
    }
}

impl<T> fmt::Debug for PagedOperation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedOperation")
            .field("item", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}
