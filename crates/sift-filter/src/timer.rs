//! A single-slot, cancel-and-reschedule timer.
//!
//! [`DebounceTimer`] owns at most one scheduled callback. Scheduling a new
//! one aborts the previous task first, and dropping the timer aborts whatever
//! is still pending.

use std::time::Duration;

use sift_core::{Error, Result};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Owned handle to at most one delayed callback on the Tokio runtime.
#[derive(Debug)]
pub struct DebounceTimer {
    delay: Duration,
    runtime: Handle,
    pending: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    /// Create a timer bound to the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`] when called outside a Tokio runtime.
    pub fn new(delay: Duration) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| Error::runtime(format!("debounce timer needs a Tokio runtime: {e}")))?;
        Ok(Self {
            delay,
            runtime,
            pending: None,
        })
    }

    /// Run `callback` once `delay` has elapsed, replacing any pending callback.
    pub fn schedule<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        }));
    }

    /// Abort the pending callback. Returns `true` if one had not fired yet.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    /// Whether a scheduled callback has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_for_make = Arc::clone(&hits);
        let make = move || -> Box<dyn FnOnce() + Send> {
            let hits = Arc::clone(&hits_for_make);
            Box::new(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        (hits, make)
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        let result = DebounceTimer::new(Duration::from_millis(10));
        assert!(matches!(result, Err(Error::Runtime(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (hits, make) = counter();
        let mut timer = DebounceTimer::new(Duration::from_millis(300)).unwrap();

        timer.schedule(make());
        assert!(timer.is_pending());

        sleep(Duration::from_millis(250)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(100)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_pending() {
        let (hits, make) = counter();
        let mut timer = DebounceTimer::new(Duration::from_millis(300)).unwrap();

        timer.schedule(make());
        sleep(Duration::from_millis(200)).await;
        timer.schedule(make());
        sleep(Duration::from_millis(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_reports_pending() {
        let (hits, make) = counter();
        let mut timer = DebounceTimer::new(Duration::from_millis(50)).unwrap();

        assert!(!timer.cancel());
        timer.schedule(make());
        assert!(timer.cancel());
        assert!(!timer.is_pending());

        sleep(Duration::from_millis(100)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending() {
        let (hits, make) = counter();
        {
            let mut timer = DebounceTimer::new(Duration::from_millis(50)).unwrap();
            timer.schedule(make());
        }

        sleep(Duration::from_millis(100)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
