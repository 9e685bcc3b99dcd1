//! Background cache warming
//!
//! Runs a sequence of cache-populating accessors on one background thread so
//! that commands issued moments after login observe already-warm caches. The
//! triggering call never waits on the result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::Result;
use tracing::debug;

/// A cache-populating closure run by [`prefetch`]. Accessors exist only for
/// their side effect of warming a cache; any value is discarded.
pub type Accessor = Box<dyn FnOnce() -> Result<()> + Send>;

/// Handle to a running prefetch task.
pub struct PrefetchHandle {
    cancelled: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

impl PrefetchHandle {
    /// Request cooperative cancellation. An accessor already executing
    /// completes its single step; the flag is checked between accessors,
    /// not inside one.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Block until the prefetch thread exits.
    pub fn join(self) {
        let _ = self.thread.join();
    }
}

/// Spawn one background thread that runs each accessor in order, cheaper and
/// more foundational data first, until all complete, one fails, or
/// cancellation is requested.
///
/// An accessor error ends the run and is logged, never propagated to the
/// caller of `prefetch`: warming is opportunistic, and the interactive path
/// refetches on demand through the same caches.
pub fn prefetch(accessors: Vec<Accessor>) -> PrefetchHandle {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);

    let thread = thread::spawn(move || {
        for (index, accessor) in accessors.into_iter().enumerate() {
            if flag.load(Ordering::Relaxed) {
                debug!(completed = index, "Prefetch cancelled");
                return;
            }
            if let Err(e) = accessor() {
                debug!(accessor = index, error = %e, "Prefetch accessor failed, ending run");
                return;
            }
        }
        debug!("Prefetch complete");
    });

    PrefetchHandle { cancelled, thread }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::Mutex;

    #[test]
    fn test_accessors_run_in_order() {
        let order = Arc::new(Mutex::new(Vec::new()));

        let accessors: Vec<Accessor> = (0..3)
            .map(|i| {
                let order = Arc::clone(&order);
                Box::new(move || {
                    order.lock().unwrap().push(i);
                    Ok(())
                }) as Accessor
            })
            .collect();

        prefetch(accessors).join();
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_cancel_checked_between_accessors() {
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let second_ran = Arc::new(AtomicBool::new(false));

        let first: Accessor = Box::new(move || {
            started_tx.send(()).unwrap();
            // Hold the run mid-accessor until the test has cancelled
            release_rx.recv().unwrap();
            Ok(())
        });
        let flag = Arc::clone(&second_ran);
        let second: Accessor = Box::new(move || {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        let handle = prefetch(vec![first, second]);
        started_rx.recv().unwrap();
        handle.cancel();
        release_tx.send(()).unwrap();
        handle.join();

        // The in-flight accessor finished, but the next one never started
        assert!(!second_ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_error_ends_run_silently() {
        let second_ran = Arc::new(AtomicBool::new(false));

        let first: Accessor = Box::new(|| Err(anyhow::anyhow!("remote fetch failed")));
        let flag = Arc::clone(&second_ran);
        let second: Accessor = Box::new(move || {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        // The error must not surface here
        prefetch(vec![first, second]).join();
        assert!(!second_ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_empty_accessor_list() {
        prefetch(Vec::new()).join();
    }
}
