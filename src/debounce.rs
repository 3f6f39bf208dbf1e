use std::time::{Duration, Instant};

/// Trailing-edge debouncer driven by an external clock. Each `push`
/// restarts the delay; `poll` yields the latest value once per quiet period.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn push(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.deadline()?;
        if now < due {
            return None;
        }
        self.pending.take().map(|(_, v)| v)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(due, _)| *due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_after_delay() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(MS * 180);
        d.push(t0, "a");
        assert_eq!(d.poll(t0 + MS * 179), None);
        assert_eq!(d.poll(t0 + MS * 180), Some("a"));
        assert_eq!(d.poll(t0 + MS * 500), None);
    }

    #[test]
    fn test_keystrokes_coalesce() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(MS * 180);
        d.push(t0, "a");
        d.push(t0 + MS * 100, "an");
        d.push(t0 + MS * 200, "ann");
        assert_eq!(d.poll(t0 + MS * 300), None);
        assert_eq!(d.deadline(), Some(t0 + MS * 380));
        assert_eq!(d.poll(t0 + MS * 380), Some("ann"));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(MS * 10);
        d.push(t0, 1);
        d.cancel();
        assert_eq!(d.poll(t0 + MS * 20), None);
    }
}
