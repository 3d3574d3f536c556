//! Debounced value settling for rapidly-changing input
//!
//! The search box emits a change on every keystroke, but the product query
//! should only fire once the user pauses. `Debouncer` tracks the latest
//! source value and exposes it downstream only after it has remained
//! unchanged for the configured delay.
//!
//! All methods take an explicit [`Instant`] so the behavior is fully
//! deterministic under test; the UI loop passes `Instant::now()`.

use std::time::{Duration, Instant};

/// A pending value waiting out its settle delay
#[derive(Debug, Clone)]
struct Pending {
    value: String,
    deadline: Instant,
}

/// Delays propagation of a changing text value until it has been stable
/// for a fixed interval.
///
/// Any change before the delay elapses restarts the wait; intermediate
/// values are never observable. Only [`Debouncer::poll`] moves a pending
/// value into the settled slot.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    settled: String,
    pending: Option<Pending>,
}

impl Debouncer {
    /// Create a debouncer with the given delay and initial settled value
    #[must_use]
    pub fn new(delay: Duration, initial: impl Into<String>) -> Self {
        Self {
            delay,
            settled: initial.into(),
            pending: None,
        }
    }

    /// Record a new source value, restarting the settle timer
    ///
    /// A value identical to the one already pending does not restart the
    /// timer (the source did not change).
    pub fn update(&mut self, value: &str, now: Instant) {
        if let Some(pending) = &self.pending {
            if pending.value == value {
                return;
            }
        } else if self.settled == value {
            return;
        }

        self.pending = Some(Pending {
            value: value.to_string(),
            deadline: now + self.delay,
        });
    }

    /// Settle the pending value if its deadline has passed
    ///
    /// Returns the newly settled value at most once per burst, and only if
    /// it differs from the previously settled value.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline);
        if !due {
            return None;
        }

        let pending = self.pending.take()?;
        if pending.value == self.settled {
            return None;
        }

        self.settled = pending.value;
        Some(&self.settled)
    }

    /// The last settled value
    #[must_use]
    pub fn settled(&self) -> &str {
        &self.settled
    }

    /// Whether a value is waiting out its delay
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending value without settling it
    ///
    /// Used on teardown so a stale value cannot surface after the consumer
    /// is gone.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(350);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_settles_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY, "");

        debouncer.update("lamp", start);
        assert_eq!(debouncer.poll(start + ms(100)), None);
        assert_eq!(debouncer.poll(start + DELAY), Some("lamp"));
        assert_eq!(debouncer.settled(), "lamp");
    }

    #[test]
    fn test_burst_yields_only_final_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY, "");

        // Changes spaced well under the delay: none of the intermediate
        // values may ever be observed.
        debouncer.update("l", start);
        debouncer.update("la", start + ms(100));
        debouncer.update("lam", start + ms(200));
        debouncer.update("lamp", start + ms(300));

        assert_eq!(debouncer.poll(start + ms(340)), None);
        assert_eq!(debouncer.poll(start + ms(300) + DELAY), Some("lamp"));
        // Exactly once.
        assert_eq!(debouncer.poll(start + ms(1000) + DELAY), None);
    }

    #[test]
    fn test_change_restarts_wait() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY, "");

        debouncer.update("la", start);
        debouncer.update("lam", start + ms(340));

        // The first deadline has passed but was superseded.
        assert_eq!(debouncer.poll(start + ms(360)), None);
        assert_eq!(debouncer.poll(start + ms(340) + DELAY), Some("lam"));
    }

    #[test]
    fn test_returning_to_settled_value_is_silent() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY, "lamp");

        debouncer.update("lam", start);
        debouncer.update("lamp", start + ms(100));

        // Settling on the value we already had produces no emission.
        assert_eq!(debouncer.poll(start + ms(100) + DELAY), None);
        assert_eq!(debouncer.settled(), "lamp");
    }

    #[test]
    fn test_repeated_identical_update_does_not_restart() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY, "");

        debouncer.update("lamp", start);
        // Re-reporting the same value at t=300 must not push the deadline.
        debouncer.update("lamp", start + ms(300));
        assert_eq!(debouncer.poll(start + DELAY), Some("lamp"));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY, "");

        debouncer.update("lamp", start);
        debouncer.cancel();

        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + DELAY), None);
        assert_eq!(debouncer.settled(), "");
    }
}
