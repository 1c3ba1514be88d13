use std::time::{Duration, Instant};

/// Single-slot cancellable deadline: at most one value waits at a time,
/// and scheduling a new one replaces whatever was pending.
///
/// Time is passed in by the caller so the UI loop drives it from
/// `Instant::now()` and tests drive it from a fixed origin.
#[derive(Debug)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending value is due (zero once overdue).
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(due, _)| due.saturating_duration_since(now))
    }

    /// Yields the pending value once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        let is_due = matches!(&self.pending, Some((due, _)) if now >= *due);
        if is_due {
            self.cancel()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_secs(2);

    #[test]
    fn fires_only_after_delay() {
        let t0 = Instant::now();
        let mut d = Debounce::new(DELAY);
        d.schedule("abc", t0);
        assert_eq!(d.take_due(t0 + Duration::from_millis(1999)), None);
        assert_eq!(d.take_due(t0 + DELAY), Some("abc"));
        assert!(!d.is_pending());
        assert_eq!(d.take_due(t0 + DELAY * 2), None);
    }

    #[test]
    fn reschedule_replaces_pending_value_and_deadline() {
        let t0 = Instant::now();
        let mut d = Debounce::new(DELAY);
        d.schedule("a", t0);
        d.schedule("ab", t0 + Duration::from_millis(1500));
        assert_eq!(d.take_due(t0 + DELAY), None);
        assert_eq!(
            d.take_due(t0 + Duration::from_millis(3500)),
            Some("ab")
        );
    }

    #[test]
    fn cancel_clears_pending() {
        let t0 = Instant::now();
        let mut d = Debounce::new(DELAY);
        d.schedule(1, t0);
        assert_eq!(d.cancel(), Some(1));
        assert_eq!(d.take_due(t0 + DELAY), None);
        assert_eq!(d.remaining(t0), None);
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let t0 = Instant::now();
        let mut d = Debounce::new(DELAY);
        d.schedule((), t0);
        assert_eq!(d.remaining(t0), Some(DELAY));
        assert_eq!(
            d.remaining(t0 + Duration::from_millis(500)),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(d.remaining(t0 + DELAY * 3), Some(Duration::ZERO));
    }
}
