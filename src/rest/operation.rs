//! Deferred operations and their three invocation forms.
//!
//! An [`Operation<T>`] describes one logical call. Nothing happens until it
//! is driven, and it is consumed by whichever form drives it, so one
//! operation is dispatched at most once:
//!
//! - **deferred**: `.await` it (it implements [`IntoFuture`])
//! - **callback**: [`Operation::subscribe`] spawns it on the current Tokio
//!   runtime and hands the result to a callback; the returned
//!   [`ServiceCall`] can cancel it
//! - **blocking**: [`Operation::blocking`] drives it to completion on a
//!   private current-thread runtime
//!
//! Dropping an operation before completion drops the in-flight transport
//! future; nothing is reported.

use std::fmt;
use std::future::{Future, IntoFuture};

use futures::future::{self, BoxFuture, FutureExt};
use tokio::task::JoinHandle;

use crate::rest::errors::ArmError;

/// A lazily executed operation resolving to `Result<T, ArmError>`.
///
/// # Example
///
/// ```rust
/// use arm_fluent::rest::Operation;
///
/// let op = Operation::new(async { Ok(21) }).map(|n| n * 2);
/// assert_eq!(op.blocking().unwrap(), 42);
/// ```
#[must_use = "operations do nothing unless awaited, subscribed or run blocking"]
pub struct Operation<T> {
    future: BoxFuture<'static, Result<T, ArmError>>,
}

impl<T: Send + 'static> Operation<T> {
    /// Wraps a future.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, ArmError>> + Send + 'static,
    {
        Self {
            future: future.boxed(),
        }
    }

    /// An operation that fails with `error` without doing any I/O.
    pub fn failed(error: impl Into<ArmError>) -> Self {
        Self {
            future: future::ready(Err(error.into())).boxed(),
        }
    }

    /// An operation that succeeds with `value` without doing any I/O.
    pub fn ready(value: T) -> Self {
        Self {
            future: future::ready(Ok(value)).boxed(),
        }
    }

    /// Transforms the success value.
    pub fn map<U, F>(self, f: F) -> Operation<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Operation::new(self.future.map(|result| result.map(f)))
    }

    /// Transforms the success value with a fallible function.
    pub fn and_then<U, F>(self, f: F) -> Operation<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Result<U, ArmError> + Send + 'static,
    {
        Operation::new(self.future.map(|result| result.and_then(f)))
    }

    /// Callback form: runs the operation on the current Tokio runtime and
    /// passes the result to `callback`.
    ///
    /// Without a runtime the callback receives [`ArmError::Runtime`]
    /// immediately and the returned handle is already finished.
    pub fn subscribe<F>(self, callback: F) -> ServiceCall
    where
        F: FnOnce(Result<T, ArmError>) + Send + 'static,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let future = self.future;
                ServiceCall {
                    handle: Some(handle.spawn(async move {
                        callback(future.await);
                    })),
                }
            }
            Err(_) => {
                callback(Err(ArmError::Runtime {
                    message: "subscribe() requires a running Tokio runtime".to_string(),
                }));
                ServiceCall { handle: None }
            }
        }
    }

    /// Blocking form: drives the operation to completion on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns the operation's own error, or [`ArmError::Runtime`] when called
    /// from inside an async runtime (use `.await` there).
    pub fn blocking(self) -> Result<T, ArmError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(ArmError::Runtime {
                message: "blocking() cannot be called from within an async runtime; await the operation instead".to_string(),
            });
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ArmError::Runtime {
                message: e.to_string(),
            })?;

        runtime.block_on(self.future)
    }
}

impl<T> IntoFuture for Operation<T> {
    type Output = Result<T, ArmError>;
    type IntoFuture = BoxFuture<'static, Result<T, ArmError>>;

    fn into_future(self) -> Self::IntoFuture {
        self.future
    }
}

impl<T> fmt::Debug for Operation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("output", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

/// Handle to an operation started with [`Operation::subscribe`].
///
/// Dropping the handle does not cancel the operation; call
/// [`ServiceCall::cancel`] for that. A cancelled operation never invokes its
/// callback.
#[derive(Debug)]
pub struct ServiceCall {
    handle: Option<JoinHandle<()>>,
}

impl ServiceCall {
    /// Cancels the operation, dropping any in-flight request.
    pub fn cancel(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }

    /// Returns `true` once the operation completed or was cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits until the operation ends. Returns `false` if it was cancelled.
    pub async fn join(self) -> bool {
        match self.handle {
            Some(handle) => handle.await.is_ok(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::ValidationError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn validation_error() -> ValidationError {
        ValidationError::MissingBody { operation: "test" }
    }

    #[tokio::test]
    async fn test_deferred_form_awaits_result() {
        let value = Operation::new(async { Ok("done") }).await.unwrap();
        assert_eq!(value, "done");
    }

    #[tokio::test]
    async fn test_operation_is_lazy_until_driven() {
        let polled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polled);
        let op = Operation::new(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert_eq!(polled.load(Ordering::SeqCst), 0);
        op.await.unwrap();
        assert_eq!(polled.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_operation_yields_error() {
        let error = Operation::<()>::failed(validation_error()).await.unwrap_err();
        assert!(error.is_validation());
    }

    #[tokio::test]
    async fn test_and_then_propagates_errors() {
        let result = Operation::ready(1)
            .and_then(|_| Err::<u8, _>(ArmError::from(validation_error())))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_callback_form_delivers_result() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let call = Operation::ready(7).subscribe(move |result| {
            let _ = tx.send(result);
        });

        assert_eq!(rx.await.unwrap().unwrap(), 7);
        assert!(call.join().await);
    }

    #[tokio::test]
    async fn test_cancelled_callback_is_never_invoked() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&invoked);
        let call = Operation::new(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        call.cancel();
        assert!(!call.join().await);
        assert_eq!(invoked.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_blocking_form_outside_runtime() {
        assert_eq!(Operation::ready(5).map(|n| n + 1).blocking().unwrap(), 6);
    }

    #[test]
    fn test_subscribe_without_runtime_reports_error() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let call = Operation::ready(1).subscribe(move |result| {
            assert!(matches!(result, Err(ArmError::Runtime { .. })));
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(call.is_finished());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blocking_inside_runtime_is_rejected() {
        let error = Operation::ready(1).blocking().unwrap_err();
        assert!(matches!(error, ArmError::Runtime { .. }));
    }
}
