//! Debounce and throttle on the tokio clock.
//!
//! ```text
//! Debouncer (300 ms):   a  b   c ......... run(c)
//!                       └──┴───┴─ each call restarts the timer
//!
//! Throttle (1 s):       a  b  c ...... d
//!                       ✓  ✗  ✗        ✓   first call per window passes
//! ```

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::trace;

/// Runs only the last of a burst of calls, once `delay` has passed quietly.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// The standard search-box debouncer.
    pub fn for_search() -> Self {
        Self::new(Duration::from_millis(retail_core::SEARCH_DEBOUNCE_MS))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `task`, cancelling any call still waiting.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = pending.replace(handle) {
            trace!("Debounced call superseded");
            previous.abort();
        }
    }

    /// Drops the waiting call, if any.
    pub fn cancel(&self) {
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Lets the first call of every `window` through and drops the rest.
#[derive(Debug)]
pub struct Throttle {
    window: Duration,
    last: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Throttle {
            window,
            last: Mutex::new(None),
        }
    }

    /// True when the caller may proceed now.
    pub fn try_acquire(&self) -> bool {
        let now = Instant::now();
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match *last {
            Some(at) if now.duration_since(at) < self.window => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_runs_last_call_only() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let seen = Arc::new(Mutex::new(Vec::new()));

        for term in ["s", "su", "sua"] {
            let seen = seen.clone();
            debouncer.call(async move {
                seen.lock().unwrap().push(term);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["sua"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_cancel() {
        let debouncer = Debouncer::for_search();
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        debouncer.call(async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_window() {
        let throttle = Throttle::new(Duration::from_secs(1));
        assert!(throttle.try_acquire());
        assert!(!throttle.try_acquire());

        tokio::time::advance(Duration::from_millis(999)).await;
        assert!(!throttle.try_acquire());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(throttle.try_acquire());
    }
}
