//! Owned, cancellable scheduling for burst-collapsed side effects.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

/// Single-slot scheduler: at most one action is pending at a time, and
/// scheduling a new one supersedes whatever was pending.
///
/// Dropping the scheduler aborts the pending action, so a timer can never
/// outlive its owner and fire into a torn-down screen.
#[derive(Debug, Default)]
pub(crate) struct Debounce {
    pending: Option<JoinHandle<()>>,
}

impl Debounce {
    /// Run `action` once `delay` has elapsed without another `schedule` or
    /// [`Debounce::cancel`] call.
    ///
    /// Must be called from within a Tokio runtime.
    pub(crate) fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            action.await;
        }));
    }

    /// Abort the pending action, if any.
    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debounce {
    fn drop(&mut self) {
        self.cancel();
    }
}
