//! Debounced input for asynchronous consumers.
//!
//! The autocomplete never computes its own `loading` flag. A caller that
//! wants "search after typing pauses" owns a [`Debouncer`], restarts it on
//! every raw input notification and feeds [`Debouncer::is_pending`] back as
//! the loading flag. The debouncer owns at most one pending timer: restarting
//! replaces it, and dropping the debouncer stops it so nothing fires after
//! teardown.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//! use picklist::Debouncer;
//! use picklist_core::SharedTimerManager;
//!
//! let timers = Arc::new(SharedTimerManager::new());
//! let mut debouncer = Debouncer::new(timers.clone(), Duration::from_millis(600));
//!
//! let start = Instant::now();
//! debouncer.restart_at(start);
//! assert!(debouncer.is_pending());
//!
//! timers.process_expired_at(start + Duration::from_millis(600));
//! assert!(debouncer.poll());
//! assert!(!debouncer.is_pending());
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use picklist_core::logging::targets;
use picklist_core::{SharedTimerManager, TimerId};

use crate::config::{AutocompleteConfig, DEFAULT_DEBOUNCE_MS};

/// Owns the single pending timer of a debounce window.
#[derive(Debug)]
pub struct Debouncer {
    timers: Arc<SharedTimerManager>,
    delay: Duration,
    pending: Option<TimerId>,
}

impl Debouncer {
    /// The canonical quiet window.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(DEFAULT_DEBOUNCE_MS);

    /// A debouncer scheduling on `timers` with the given quiet window.
    pub fn new(timers: Arc<SharedTimerManager>, delay: Duration) -> Self {
        Self {
            timers,
            delay,
            pending: None,
        }
    }

    /// A debouncer using the window from `config`.
    pub fn from_config(timers: Arc<SharedTimerManager>, config: &AutocompleteConfig) -> Self {
        Self::new(timers, config.debounce_delay())
    }

    /// The quiet window.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start a new window now, cancelling any pending one.
    pub fn restart(&mut self) {
        self.restart_at(Instant::now());
    }

    /// Start a new window at `now`, cancelling any pending one.
    pub fn restart_at(&mut self, now: Instant) {
        self.cancel();
        let id = self.timers.start_one_shot_at(now, self.delay);
        tracing::trace!(target: targets::DEBOUNCE, ?id, delay = ?self.delay, "debounce window started");
        self.pending = Some(id);
    }

    /// Stop the pending window, if any.
    ///
    /// Returns `true` if a window was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(id) => {
                // The timer may already have fired; that is not an error here.
                let stopped = self.timers.stop(id).is_ok();
                if stopped {
                    tracing::trace!(target: targets::DEBOUNCE, ?id, "debounce window cancelled");
                }
                stopped
            }
            None => false,
        }
    }

    /// Whether a window is running and has not elapsed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some_and(|id| self.timers.is_active(id))
    }

    /// Report, once, that the pending window elapsed.
    ///
    /// Call after the timer manager processed expired timers.
    pub fn poll(&mut self) -> bool {
        match self.pending {
            Some(id) if !self.timers.is_active(id) => {
                self.pending = None;
                tracing::debug!(target: targets::DEBOUNCE, ?id, "debounce window elapsed");
                true
            }
            _ => false,
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
